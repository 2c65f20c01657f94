use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracing::debug;

use quiz_core::model::TakerName;
use storage::NameStore;

use crate::error::NameServiceError;

/// Reads and writes the remembered taker name.
///
/// Saves are serialized and a save that has been overtaken by a newer one is
/// skipped, so the stored value always ends on the latest edit.
#[derive(Clone)]
pub struct NameService {
    store: Arc<dyn NameStore>,
    latest: Arc<AtomicU64>,
    write_lock: Arc<Mutex<()>>,
}

impl NameService {
    #[must_use]
    pub fn new(store: Arc<dyn NameStore>) -> Self {
        Self {
            store,
            latest: Arc::new(AtomicU64::new(0)),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Load the persisted name. A stored value that no longer validates is
    /// treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `NameServiceError::Storage` on storage failures.
    pub async fn load(&self) -> Result<Option<TakerName>, NameServiceError> {
        let stored = self.store.get_taker_name().await?;
        Ok(TakerName::from_persisted(stored))
    }

    /// Normalize and persist the name as typed. Blank input clears it.
    ///
    /// The edit's place in line is taken when this is called, not when the
    /// returned future first runs.
    ///
    /// # Errors
    ///
    /// Returns `NameServiceError::Invalid` if the name is too long, or
    /// `NameServiceError::Storage` if persistence fails.
    pub fn save(
        &self,
        raw: &str,
    ) -> impl Future<Output = Result<Option<TakerName>, NameServiceError>> + Send + 'static {
        let parsed = TakerName::parse(raw);
        let generation = parsed
            .is_ok()
            .then(|| self.latest.fetch_add(1, Ordering::SeqCst) + 1);
        let store = Arc::clone(&self.store);
        let latest = Arc::clone(&self.latest);
        let write_lock = Arc::clone(&self.write_lock);

        async move {
            let name = parsed?;
            let _guard = write_lock.lock().await;
            if generation != Some(latest.load(Ordering::SeqCst)) {
                debug!(?generation, "taker name save superseded");
                return Ok(name);
            }
            store
                .save_taker_name(name.as_ref().map(TakerName::as_str))
                .await?;
            debug!(cleared = name.is_none(), "taker name saved");
            Ok(name)
        }
    }
}
