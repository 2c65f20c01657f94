use async_trait::async_trait;
use reqwest::StatusCode;
use storage::{BankSource, StorageError};

/// Fetches the bank with a plain HTTP GET.
#[derive(Clone)]
pub struct HttpBankSource {
    client: reqwest::Client,
    url: String,
}

impl HttpBankSource {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl BankSource for HttpBankSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<u8>, StorageError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(self.url.clone()));
        }
        if !status.is_success() {
            return Err(StorageError::Connection(format!(
                "{} returned status {status}",
                self.url
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(body.to_vec())
    }
}
