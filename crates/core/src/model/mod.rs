mod difficulty;
mod ids;
mod question;
mod score;
mod user;

pub use difficulty::{Difficulty, ParseDifficultyError};
pub use ids::{ParseIdError, QuestionId};
pub use question::{BankQuestion, OptionKey, Question, QuestionDraft, QuestionError};
pub use score::{ScoreEntry, ScoreTotals, mean_score};
pub use user::{NewUser, RESERVED_ADMIN_NAME, UserAccount, UserError, Username, ValidatedUser};
