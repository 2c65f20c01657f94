//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{SessionStateError, TakerNameError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `QuestionBankLoader`.
///
/// An empty bank is not an error; see `BankLoad::Empty`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadError {
    #[error("question bank unreachable: {0}")]
    Unreachable(String),
    #[error("question bank malformed: {0}")]
    Malformed(String),
}

impl From<StorageError> for LoadError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Serialization(msg) => LoadError::Malformed(msg),
            other => LoadError::Unreachable(other.to_string()),
        }
    }
}

/// Errors emitted by quiz session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("the question bank has no questions")]
    EmptyBank,
    #[error("no {filter} questions available in the bank")]
    NoEligibleQuestions { filter: &'static str },
    #[error("quiz already submitted")]
    AlreadySubmitted,
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    State(#[from] SessionStateError),
}

/// Errors emitted by `NameService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NameServiceError {
    #[error(transparent)]
    Invalid(#[from] TakerNameError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
