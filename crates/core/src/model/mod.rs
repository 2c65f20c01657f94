mod config;
mod ids;
mod question;
mod score;
mod session;
mod taker;

pub use config::{
    ConfigError, DEFAULT_SECONDS_PER_QUESTION, MAX_QUESTION_COUNT, MIN_QUESTION_COUNT,
    QuizConfig, TimingPolicy,
};
pub use ids::{QuestionId, SessionId};
pub use question::{Question, QuestionDraft, QuestionError, TypeFilter};
pub use score::{OptionMark, ResultFilter, ScoreReport, Verdict, score};
pub use session::{QuizSession, SessionChange, SessionQuestion, SessionStateError};
pub use taker::{MAX_TAKER_NAME_CHARS, TakerName, TakerNameError};
