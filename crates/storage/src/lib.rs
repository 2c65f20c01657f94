#![forbid(unsafe_code)]

pub mod file;
pub mod repository;
pub mod sqlite;

pub use file::{DEFAULT_BANK_PATH, FileBankSource};
pub use repository::{BankSource, InMemoryRepository, NameStore, Storage, StorageError};
