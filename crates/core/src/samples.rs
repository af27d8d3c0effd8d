//! Questions that ship with the binary.
//!
//! [`fallback_questions`] keeps a quiz playable when the bank is empty or
//! unreachable. [`seed_questions`] populates a fresh database.

use crate::model::{Difficulty, Question};

/// Number of questions in the built-in fallback set.
pub const FALLBACK_QUESTION_COUNT: usize = 5;

fn q(prompt: &str, options: [&str; 4], correct: &str, difficulty: Difficulty) -> Question {
    Question::new(prompt, options.map(str::to_string), correct, difficulty)
}

/// The fixed fallback set. Served for any requested difficulty.
#[must_use]
pub fn fallback_questions() -> Vec<Question> {
    vec![
        q("What is 2 + 2?", ["3", "4", "5", "6"], "4", Difficulty::Easy),
        q(
            "What is the capital of France?",
            ["Berlin", "Madrid", "Paris", "Rome"],
            "Paris",
            Difficulty::Easy,
        ),
        q(
            "Which planet is known as the Red Planet?",
            ["Earth", "Mars", "Jupiter", "Venus"],
            "Mars",
            Difficulty::Easy,
        ),
        q(
            "What is the largest ocean on Earth?",
            ["Atlantic", "Indian", "Arctic", "Pacific"],
            "Pacific",
            Difficulty::Easy,
        ),
        q("How many continents are there?", ["5", "6", "7", "8"], "7", Difficulty::Easy),
    ]
}

/// Starter bank used by `app seed`, a few questions per difficulty.
#[must_use]
pub fn seed_questions() -> Vec<Question> {
    let mut questions = fallback_questions();
    questions.extend([
        q(
            "Which gas do plants absorb from the air?",
            ["Oxygen", "Nitrogen", "Carbon dioxide", "Helium"],
            "Carbon dioxide",
            Difficulty::Medium,
        ),
        q(
            "Who wrote 'Romeo and Juliet'?",
            ["Charles Dickens", "William Shakespeare", "Jane Austen", "Mark Twain"],
            "William Shakespeare",
            Difficulty::Medium,
        ),
        q(
            "What is the square root of 144?",
            ["10", "11", "12", "14"],
            "12",
            Difficulty::Medium,
        ),
        q(
            "Which is the highest mountain in the world?",
            ["K2", "Kangchenjunga", "Lhotse", "Mount Everest"],
            "Mount Everest",
            Difficulty::Medium,
        ),
        q(
            "What is the chemical symbol for tungsten?",
            ["Tu", "W", "Tn", "Wo"],
            "W",
            Difficulty::Hard,
        ),
        q(
            "In which year did the Berlin Wall fall?",
            ["1987", "1989", "1991", "1993"],
            "1989",
            Difficulty::Hard,
        ),
        q(
            "Which element has atomic number 79?",
            ["Silver", "Platinum", "Gold", "Mercury"],
            "Gold",
            Difficulty::Hard,
        ),
        q(
            "What is the smallest prime number greater than 100?",
            ["101", "103", "107", "109"],
            "101",
            Difficulty::Hard,
        ),
    ]);
    questions
}
