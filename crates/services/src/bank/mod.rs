mod http;
mod loader;

use std::sync::Arc;

use storage::{BankSource, FileBankSource};

pub use http::HttpBankSource;
pub use loader::{BankLoad, BankSummary, QuestionBank, QuestionBankLoader, parse_bank};

/// Pick a source for a configured bank location: `http(s)://` URLs are
/// fetched over HTTP, anything else is read as a file path.
#[must_use]
pub fn bank_source_for(location: &str) -> Arc<dyn BankSource> {
    let trimmed = location.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Arc::new(HttpBankSource::new(trimmed))
    } else {
        Arc::new(FileBankSource::new(trimmed))
    }
}
