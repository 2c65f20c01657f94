use thiserror::Error;

use crate::model::{ConfigError, QuestionError, SessionStateError, TakerNameError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Session(#[from] SessionStateError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    TakerName(#[from] TakerNameError),
}
