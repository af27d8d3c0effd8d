mod admin_vm;
mod quiz_vm;
mod score_vm;
mod time_fmt;

pub use admin_vm::{QuestionFormVm, QuestionRowVm, map_question_rows, parse_difficulty, parse_question_id};
pub use quiz_vm::{Feedback, QuizStep, QuizVm, fallback_notice};
pub use score_vm::{LEADERBOARD_LIMIT, ReportVm, ScoreRowVm, map_leaderboard, map_report};
pub use time_fmt::{format_average, format_datetime};
