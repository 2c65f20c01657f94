use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::repository::{BankSource, StorageError};

/// Well-known relative location of the bank when nothing else is configured.
pub const DEFAULT_BANK_PATH: &str = "quiz.json";

/// Reads the bank from a file on disk.
#[derive(Debug, Clone)]
pub struct FileBankSource {
    path: PathBuf,
}

impl FileBankSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for FileBankSource {
    fn default() -> Self {
        Self::new(DEFAULT_BANK_PATH)
    }
}

#[async_trait]
impl BankSource for FileBankSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>, StorageError> {
        tokio::fs::read(&self.path).await.map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                StorageError::NotFound(self.describe())
            } else {
                StorageError::Connection(format!("{}: {err}", self.describe()))
            }
        })
    }
}
