use std::sync::Arc;

use quiz_core::model::TimingPolicy;
use storage::BankSource;
use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::name_service::NameService;
use crate::sessions::QuizLoopService;

/// Assembles app-facing services.
#[derive(Clone)]
pub struct AppServices {
    quiz_loop: Arc<QuizLoopService>,
    names: Arc<NameService>,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage, clock: Clock, timing: TimingPolicy) -> Self {
        let quiz_loop = Arc::new(
            QuizLoopService::new(clock, Arc::clone(&storage.bank)).with_timing(timing),
        );
        let names = Arc::new(NameService::new(Arc::clone(&storage.names)));
        Self { quiz_loop, names }
    }

    /// Build services whose name store is backed by `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        bank: Arc<dyn BankSource>,
        clock: Clock,
        timing: TimingPolicy,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url, bank).await?;
        Ok(Self::new(&storage, clock, timing))
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn names(&self) -> Arc<NameService> {
        Arc::clone(&self.names)
    }
}
