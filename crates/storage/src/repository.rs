use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Where the raw question bank comes from.
#[async_trait]
pub trait BankSource: Send + Sync {
    /// Human-readable location, used in logs and error messages.
    fn describe(&self) -> String;

    /// Fetch the raw payload.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when the bank does not exist and
    /// `StorageError::Connection` for any other transport failure.
    async fn fetch(&self) -> Result<Vec<u8>, StorageError>;
}

/// Durable slot for the last-used display name.
#[async_trait]
pub trait NameStore: Send + Sync {
    /// Read the stored name, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn get_taker_name(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored name. `None` clears it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    async fn save_taker_name(&self, name: Option<&str>) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    bank: Arc<Mutex<Option<Vec<u8>>>>,
    taker_name: Arc<Mutex<Option<String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository serving the given bank payload.
    #[must_use]
    pub fn with_bank(payload: impl Into<Vec<u8>>) -> Self {
        let repo = Self::new();
        repo.set_bank(payload);
        repo
    }

    /// Replace the bank payload. Poisoned locks are recovered.
    pub fn set_bank(&self, payload: impl Into<Vec<u8>>) {
        let mut guard = self
            .bank
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(payload.into());
    }

    /// Simulate an unreachable bank.
    pub fn clear_bank(&self) {
        let mut guard = self
            .bank
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = None;
    }
}

#[async_trait]
impl BankSource for InMemoryRepository {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>, StorageError> {
        let guard = self
            .bank
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .clone()
            .ok_or_else(|| StorageError::NotFound("memory bank is empty".to_string()))
    }
}

#[async_trait]
impl NameStore for InMemoryRepository {
    async fn get_taker_name(&self) -> Result<Option<String>, StorageError> {
        let guard = self
            .taker_name
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_taker_name(&self, name: Option<&str>) -> Result<(), StorageError> {
        let mut guard = self
            .taker_name
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = name.map(str::to_owned);
        Ok(())
    }
}

/// Aggregates the bank source and name store behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub bank: Arc<dyn BankSource>,
    pub names: Arc<dyn NameStore>,
}

impl Storage {
    #[must_use]
    pub fn from_repository(repo: InMemoryRepository) -> Self {
        let bank: Arc<dyn BankSource> = Arc::new(repo.clone());
        let names: Arc<dyn NameStore> = Arc::new(repo);
        Self { bank, names }
    }
}
