#![forbid(unsafe_code)]

pub mod app_services;
pub mod bank;
pub mod error;
pub mod name_service;
pub mod sessions;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use bank::{
    BankLoad, BankSummary, HttpBankSource, QuestionBank, QuestionBankLoader, bank_source_for,
};
pub use error::{AppServicesError, LoadError, NameServiceError, SessionError};
pub use name_service::NameService;
pub use sessions::{
    QuestionView, QuizLoopService, QuizProgress, QuizResults, QuizRun, ResultsView,
    SessionBuilder, SessionPlan, SubmitReason, TickOutcome,
};
