use thiserror::Error;

use crate::model::question::TypeFilter;

/// Smallest session a taker may request.
pub const MIN_QUESTION_COUNT: u32 = 5;
/// Largest session a taker may request.
pub const MAX_QUESTION_COUNT: u32 = 500;
/// Default per-question allowance used to size the countdown.
pub const DEFAULT_SECONDS_PER_QUESTION: u32 = 60;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("a quiz needs at least {MIN_QUESTION_COUNT} questions, got {requested}")]
    CountTooSmall { requested: u32 },

    #[error("a quiz can have at most {MAX_QUESTION_COUNT} questions, got {requested}")]
    CountTooLarge { requested: u32 },

    #[error("seconds per question must be > 0")]
    InvalidSecondsPerQuestion,
}

/// What the taker asked for on the setup screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizConfig {
    requested_count: u32,
    filter: TypeFilter,
}

impl QuizConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` if `requested_count` is outside
    /// `MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT`.
    pub fn new(requested_count: u32, filter: TypeFilter) -> Result<Self, ConfigError> {
        if requested_count < MIN_QUESTION_COUNT {
            return Err(ConfigError::CountTooSmall {
                requested: requested_count,
            });
        }
        if requested_count > MAX_QUESTION_COUNT {
            return Err(ConfigError::CountTooLarge {
                requested: requested_count,
            });
        }
        Ok(Self {
            requested_count,
            filter,
        })
    }

    #[must_use]
    pub fn requested_count(&self) -> u32 {
        self.requested_count
    }

    #[must_use]
    pub fn filter(&self) -> TypeFilter {
        self.filter
    }
}

/// How long the countdown gives per question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingPolicy {
    seconds_per_question: u32,
}

impl TimingPolicy {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSecondsPerQuestion` for zero.
    pub fn new(seconds_per_question: u32) -> Result<Self, ConfigError> {
        if seconds_per_question == 0 {
            return Err(ConfigError::InvalidSecondsPerQuestion);
        }
        Ok(Self {
            seconds_per_question,
        })
    }

    #[must_use]
    pub fn seconds_per_question(&self) -> u32 {
        self.seconds_per_question
    }

    /// Total budget for a session of `question_count` questions.
    #[must_use]
    pub fn budget_secs(&self, question_count: usize) -> u32 {
        let count = u32::try_from(question_count).unwrap_or(u32::MAX);
        count.saturating_mul(self.seconds_per_question)
    }
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self {
            seconds_per_question: DEFAULT_SECONDS_PER_QUESTION,
        }
    }
}
