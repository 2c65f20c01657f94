use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use quiz_core::model::{Question, QuestionDraft, QuestionId, TypeFilter};
use storage::BankSource;

use crate::error::LoadError;

/// The validated pool of questions a session draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn eligible_count(&self, filter: TypeFilter) -> usize {
        self.questions.iter().filter(|q| filter.admits(q)).count()
    }

    #[must_use]
    pub fn summary(&self) -> BankSummary {
        let multi = self.eligible_count(TypeFilter::Multi);
        BankSummary {
            total: self.len(),
            single: self.len() - multi,
            multi,
        }
    }
}

/// Counts reported by `app check` and the setup screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BankSummary {
    pub total: usize,
    pub single: usize,
    pub multi: usize,
}

/// Result of a successful fetch. Zero entries is a distinct signal, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankLoad {
    Loaded(QuestionBank),
    Empty,
}

impl BankLoad {
    #[must_use]
    pub fn into_bank(self) -> Option<QuestionBank> {
        match self {
            BankLoad::Loaded(bank) => Some(bank),
            BankLoad::Empty => None,
        }
    }
}

/// Parse and validate a raw bank payload (a JSON array of question records).
///
/// # Errors
///
/// Returns `LoadError::Malformed` when the payload is not a JSON array of
/// records or a record fails validation.
pub fn parse_bank(payload: &[u8]) -> Result<BankLoad, LoadError> {
    let drafts: Vec<QuestionDraft> =
        serde_json::from_slice(payload).map_err(|err| LoadError::Malformed(err.to_string()))?;
    if drafts.is_empty() {
        return Ok(BankLoad::Empty);
    }

    let questions = drafts
        .into_iter()
        .enumerate()
        .map(|(index, draft)| {
            let id = QuestionId::new(u64::try_from(index).unwrap_or(u64::MAX));
            draft
                .validate(id)
                .map_err(|err| LoadError::Malformed(format!("record {index}: {err}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(BankLoad::Loaded(QuestionBank::new(questions)))
}

/// Fetches and validates the bank from its configured source.
#[derive(Clone)]
pub struct QuestionBankLoader {
    source: Arc<dyn BankSource>,
}

impl QuestionBankLoader {
    #[must_use]
    pub fn new(source: Arc<dyn BankSource>) -> Self {
        Self { source }
    }

    #[must_use]
    pub fn describe(&self) -> String {
        self.source.describe()
    }

    /// Fetch and validate the bank. No retry is attempted.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Unreachable` for transport failures and
    /// `LoadError::Malformed` for unparseable payloads.
    pub async fn load(&self) -> Result<BankLoad, LoadError> {
        let location = self.source.describe();
        let payload = self.source.fetch().await.map_err(|err| {
            warn!(%location, error = %err, "question bank fetch failed");
            LoadError::from(err)
        })?;

        let loaded = parse_bank(&payload).inspect_err(|err| {
            warn!(%location, error = %err, "question bank rejected");
        })?;

        match &loaded {
            BankLoad::Loaded(bank) => {
                let summary = bank.summary();
                info!(
                    %location,
                    total = summary.total,
                    single = summary.single,
                    multi = summary.multi,
                    "question bank loaded"
                );
            }
            BankLoad::Empty => info!(%location, "question bank is empty"),
        }
        Ok(loaded)
    }
}
