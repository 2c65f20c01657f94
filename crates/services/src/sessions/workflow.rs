use std::sync::Arc;

use rand::Rng;
use tracing::info;

use quiz_core::model::{QuizConfig, TakerName, TimingPolicy};
use storage::BankSource;

use super::plan::SessionBuilder;
use super::service::QuizRun;
use crate::Clock;
use crate::bank::{BankLoad, BankSummary, QuestionBank, QuestionBankLoader};
use crate::error::SessionError;

/// Orchestrates bank loading and quiz start.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    loader: QuestionBankLoader,
    timing: TimingPolicy,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, source: Arc<dyn BankSource>) -> Self {
        Self {
            clock,
            loader: QuestionBankLoader::new(source),
            timing: TimingPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_timing(mut self, timing: TimingPolicy) -> Self {
        self.timing = timing;
        self
    }

    #[must_use]
    pub fn timing(&self) -> TimingPolicy {
        self.timing
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Where the bank is fetched from, for display and logs.
    #[must_use]
    pub fn bank_location(&self) -> String {
        self.loader.describe()
    }

    /// Fetch the bank, treating an empty bank as an error for quiz start.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyBank` for an empty bank and
    /// `SessionError::Load` when the bank cannot be fetched or parsed.
    pub async fn load_bank(&self) -> Result<QuestionBank, SessionError> {
        match self.loader.load().await? {
            BankLoad::Loaded(bank) => Ok(bank),
            BankLoad::Empty => Err(SessionError::EmptyBank),
        }
    }

    /// Load and validate the bank without starting anything.
    ///
    /// # Errors
    ///
    /// Same as [`QuizLoopService::load_bank`].
    pub async fn check_bank(&self) -> Result<BankSummary, SessionError> {
        Ok(self.load_bank().await?.summary())
    }

    /// Fetch the bank and start a fresh run. The bank is re-fetched on every
    /// start.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when the bank cannot be loaded, is empty, or has
    /// no question matching the filter.
    pub async fn start_quiz(
        &self,
        config: QuizConfig,
        taker_name: Option<TakerName>,
    ) -> Result<QuizRun, SessionError> {
        let bank = self.load_bank().await?;
        self.start_from_bank(&bank, config, taker_name, &mut rand::rng())
    }

    /// Start a run from an already loaded bank with a caller-supplied rng.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoEligibleQuestions` when nothing in the bank
    /// matches the filter.
    pub fn start_from_bank<R: Rng + ?Sized>(
        &self,
        bank: &QuestionBank,
        config: QuizConfig,
        taker_name: Option<TakerName>,
        rng: &mut R,
    ) -> Result<QuizRun, SessionError> {
        let plan = SessionBuilder::from_config(&config).build(bank, rng);
        let (multi, single, short) = (plan.multi_selected, plan.single_selected, plan.is_short());

        let run = QuizRun::start(plan, config, self.timing, taker_name, self.clock.now())?;
        info!(
            session_id = %run.id(),
            filter = config.filter().as_str(),
            requested = run.requested(),
            selected = run.session().len(),
            multi,
            single,
            budget_secs = run.budget_secs(),
            "quiz started"
        );
        if short {
            info!(
                session_id = %run.id(),
                "bank has fewer eligible questions than requested"
            );
        }
        Ok(run)
    }
}
