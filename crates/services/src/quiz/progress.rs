/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based number of the question on screen, capped at `total`.
    pub position: usize,
    pub total: usize,
    pub score: u32,
    pub is_finished: bool,
}

impl QuizProgress {
    /// Label such as `"Question 2 of 10"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Question {} of {}", self.position, self.total)
    }
}
