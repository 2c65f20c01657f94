use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{info, warn};

use quiz_core::countdown::{Countdown, TimerEvent, TimerPhase};
use quiz_core::model::{
    QuizConfig, QuizSession, ResultFilter, ScoreReport, SessionChange, SessionId, TakerName,
    TimingPolicy, score,
};
use quiz_core::time::elapsed_secs;

use super::plan::SessionPlan;
use super::progress::QuizProgress;
use super::view::{PaletteEntry, QuestionView, ResultsView, palette};
use crate::error::SessionError;

//
// ─── SUBMISSION ────────────────────────────────────────────────────────────────
//

/// What ended the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitReason {
    Manual,
    Expired,
}

impl SubmitReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SubmitReason::Manual => "manual",
            SubmitReason::Expired => "expired",
        }
    }
}

impl fmt::Display for SubmitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Written exactly once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResults {
    pub report: ScoreReport,
    pub reason: SubmitReason,
    pub submitted_at: DateTime<Utc>,
    pub elapsed_secs: u64,
}

/// Outcome of feeding elapsed time into a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub events: Vec<TimerEvent>,
    pub auto_submitted: bool,
}

//
// ─── RUN ───────────────────────────────────────────────────────────────────────
//

/// One timed attempt: the session, its countdown and the submission slot.
///
/// All mutation goes through `&mut self`, so the tick loop and user input are
/// serialized by whoever owns the run.
pub struct QuizRun {
    id: SessionId,
    taker_name: Option<TakerName>,
    config: QuizConfig,
    requested: usize,
    session: QuizSession,
    countdown: Countdown,
    budget_secs: u32,
    started_at: DateTime<Utc>,
    results: Option<QuizResults>,
}

impl QuizRun {
    /// Start a run from a built plan. The countdown budget is sized from the
    /// questions actually selected.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoEligibleQuestions` if the plan is empty.
    pub fn start(
        plan: SessionPlan,
        config: QuizConfig,
        timing: TimingPolicy,
        taker_name: Option<TakerName>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let requested = plan.requested;
        let session = QuizSession::new(plan.questions).map_err(|_| {
            SessionError::NoEligibleQuestions {
                filter: config.filter().as_str(),
            }
        })?;
        let budget_secs = timing.budget_secs(session.len());

        Ok(Self {
            id: SessionId::random(),
            taker_name,
            config,
            requested,
            countdown: Countdown::new(budget_secs),
            budget_secs,
            session,
            started_at,
            results: None,
        })
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn taker_name(&self) -> Option<&TakerName> {
        self.taker_name.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> QuizConfig {
        self.config
    }

    /// Count asked for at setup; `session().len()` may be smaller.
    #[must_use]
    pub fn requested(&self) -> usize {
        self.requested
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn budget_secs(&self) -> u32 {
        self.budget_secs
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.countdown.remaining_secs()
    }

    #[must_use]
    pub fn timer_phase(&self) -> TimerPhase {
        self.countdown.phase()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn results(&self) -> Option<&QuizResults> {
        self.results.as_ref()
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.results.is_some()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let answered = self.session.answered_count();
        QuizProgress {
            total: self.session.len(),
            answered,
            unanswered: self.session.len() - answered,
            marked: self.session.marked_indices().len(),
            current: self.session.current_index(),
            is_submitted: self.is_submitted(),
        }
    }

    #[must_use]
    pub fn question_view(&self) -> QuestionView {
        QuestionView::from_session(&self.session)
    }

    #[must_use]
    pub fn palette(&self) -> Vec<PaletteEntry> {
        palette(&self.session)
    }

    /// `None` until the run has been submitted.
    #[must_use]
    pub fn results_view(&self, filter: ResultFilter) -> Option<ResultsView> {
        self.results.as_ref().map(|results| {
            ResultsView::build(
                &self.session,
                &results.report,
                self.taker_name.as_ref(),
                results.elapsed_secs,
                filter,
            )
        })
    }

    //
    // ─── TAKER INPUT ───────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `SessionError::State` for a bad index, an unknown option, or a
    /// submitted run.
    pub fn select_answer(&mut self, index: usize, answer: &str) -> Result<SessionChange, SessionError> {
        Ok(self.session.select_answer(index, answer)?)
    }

    /// # Errors
    ///
    /// See [`QuizRun::select_answer`].
    pub fn select_current(&mut self, answer: &str) -> Result<SessionChange, SessionError> {
        self.select_answer(self.session.current_index(), answer)
    }

    /// # Errors
    ///
    /// Returns `SessionError::State` for a bad index or a submitted run.
    pub fn toggle_mark(&mut self, index: usize) -> Result<SessionChange, SessionError> {
        Ok(self.session.toggle_mark(index)?)
    }

    /// # Errors
    ///
    /// Returns `SessionError::State` for a submitted run.
    pub fn toggle_mark_current(&mut self) -> Result<SessionChange, SessionError> {
        self.toggle_mark(self.session.current_index())
    }

    pub fn go_to(&mut self, index: usize) -> SessionChange {
        self.session.go_to(index)
    }

    pub fn next(&mut self) -> SessionChange {
        self.session.next()
    }

    pub fn previous(&mut self) -> SessionChange {
        self.session.previous()
    }

    //
    // ─── TIME AND SUBMISSION ───────────────────────────────────────────────────
    //

    /// One second elapsed. Submits automatically when the countdown expires.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        self.advance(1, now)
    }

    /// Several seconds elapsed at once (a late or coalesced tick).
    pub fn advance(&mut self, secs: u32, now: DateTime<Utc>) -> TickOutcome {
        let events = self.countdown.advance(secs);
        let mut auto_submitted = false;
        for event in &events {
            match event {
                TimerEvent::Warning => {
                    info!(session_id = %self.id, remaining = self.remaining_secs(), "time warning");
                }
                TimerEvent::Danger => {
                    warn!(session_id = %self.id, remaining = self.remaining_secs(), "time almost up");
                }
                TimerEvent::Expired => {
                    if self.results.is_none() {
                        self.finalize(SubmitReason::Expired, now);
                        auto_submitted = true;
                    }
                }
            }
        }
        TickOutcome {
            events,
            auto_submitted,
        }
    }

    /// Stop the countdown, then score and lock the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadySubmitted` if the run was already
    /// submitted, manually or by expiry. The recorded results are unchanged.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<&QuizResults, SessionError> {
        if self.results.is_some() {
            return Err(SessionError::AlreadySubmitted);
        }
        self.countdown.cancel();
        Ok(self.finalize(SubmitReason::Manual, now))
    }

    fn finalize(&mut self, reason: SubmitReason, now: DateTime<Utc>) -> &QuizResults {
        let report = score(&mut self.session);
        info!(
            session_id = %self.id,
            %reason,
            correct = report.correct_count,
            total = report.total_count,
            percent = report.percent(),
            "quiz submitted"
        );
        self.results.insert(QuizResults {
            report,
            reason,
            submitted_at: now,
            elapsed_secs: elapsed_secs(self.started_at, now),
        })
    }
}

impl fmt::Debug for QuizRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizRun")
            .field("id", &self.id)
            .field("questions", &self.session.len())
            .field("current", &self.session.current_index())
            .field("remaining_secs", &self.remaining_secs())
            .field("submitted", &self.is_submitted())
            .finish_non_exhaustive()
    }
}
