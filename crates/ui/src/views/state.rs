use dioxus::prelude::*;

use services::{LoadError, NameServiceError, SessionError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    EmptyBank,
    BankUnreachable,
    BankMalformed,
    NoEligibleQuestions,
    InvalidCount,
    NameTooLong,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::EmptyBank => "The question bank has no questions yet.",
            ViewError::BankUnreachable => "Could not reach the question bank.",
            ViewError::BankMalformed => "The question bank could not be read.",
            ViewError::NoEligibleQuestions => "No questions of that type are available.",
            ViewError::InvalidCount => "Choose between 5 and 500 questions.",
            ViewError::NameTooLong => "Names can be at most 64 characters.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }

    /// Informational rather than a failure.
    #[must_use]
    pub fn is_notice(self) -> bool {
        matches!(self, ViewError::EmptyBank | ViewError::NoEligibleQuestions)
    }

    #[must_use]
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            ViewError::BankUnreachable | ViewError::BankMalformed | ViewError::Unknown
        )
    }
}

impl From<&SessionError> for ViewError {
    fn from(err: &SessionError) -> Self {
        match err {
            SessionError::EmptyBank => ViewError::EmptyBank,
            SessionError::NoEligibleQuestions { .. } => ViewError::NoEligibleQuestions,
            SessionError::Load(LoadError::Unreachable(_)) => ViewError::BankUnreachable,
            SessionError::Load(LoadError::Malformed(_)) => ViewError::BankMalformed,
            _ => ViewError::Unknown,
        }
    }
}

impl From<&NameServiceError> for ViewError {
    fn from(err: &NameServiceError) -> Self {
        match err {
            NameServiceError::Invalid(_) => ViewError::NameTooLong,
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
