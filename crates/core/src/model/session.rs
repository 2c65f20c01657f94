use std::collections::BTreeSet;

use thiserror::Error;

use crate::model::question::Question;
use crate::model::score::Verdict;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStateError {
    #[error("a session needs at least one question")]
    NoQuestions,

    #[error("question index {index} out of range for a session of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{answer:?} is not an option of question {index}")]
    UnknownOption { index: usize, answer: String },

    #[error("session already submitted")]
    Locked,
}

/// What a mutation did, so a presentation layer can re-render just that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChange {
    Selected { index: usize },
    Marked { index: usize, marked: bool },
    Navigated { from: usize, to: usize },
    Unchanged,
}

//
// ─── SESSION QUESTION ──────────────────────────────────────────────────────────
//

/// A session-owned copy of a bank question plus the taker's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionQuestion {
    question: Question,
    selected: BTreeSet<String>,
    verdict: Option<Verdict>,
}

impl SessionQuestion {
    #[must_use]
    pub fn new(question: Question) -> Self {
        Self {
            question,
            selected: BTreeSet::new(),
            verdict: None,
        }
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    #[must_use]
    pub fn is_selected(&self, option: &str) -> bool {
        self.selected.contains(option)
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Set once when the session is scored.
    #[must_use]
    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub(crate) fn record_verdict(&mut self, verdict: Verdict) -> Verdict {
        *self.verdict.get_or_insert(verdict)
    }

    fn select(&mut self, answer: &str) {
        if self.question.is_multi_choice() {
            if !self.selected.remove(answer) {
                self.selected.insert(answer.to_owned());
            }
        } else {
            self.selected.clear();
            self.selected.insert(answer.to_owned());
        }
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Ordered questions, cursor, review marks and answers for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<SessionQuestion>,
    current_index: usize,
    marked_for_review: BTreeSet<usize>,
    locked: bool,
}

impl QuizSession {
    /// # Errors
    ///
    /// Returns `SessionStateError::NoQuestions` for an empty list.
    pub fn new(questions: Vec<SessionQuestion>) -> Result<Self, SessionStateError> {
        if questions.is_empty() {
            return Err(SessionStateError::NoQuestions);
        }
        Ok(Self {
            questions,
            current_index: 0,
            marked_for_review: BTreeSet::new(),
            locked: false,
        })
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
    pub fn questions(&self) -> &[SessionQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&SessionQuestion> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current(&self) -> &SessionQuestion {
        &self.questions[self.current_index]
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn is_marked(&self, index: usize) -> bool {
        self.marked_for_review.contains(&index)
    }

    #[must_use]
    pub fn marked_indices(&self) -> Vec<usize> {
        self.marked_for_review.iter().copied().collect()
    }

    #[must_use]
    pub fn is_answered(&self, index: usize) -> bool {
        self.questions.get(index).is_some_and(SessionQuestion::is_answered)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.questions.iter().filter(|q| q.is_answered()).count()
    }

    #[must_use]
    pub fn unanswered_indices(&self) -> Vec<usize> {
        self.questions
            .iter()
            .enumerate()
            .filter(|(_, q)| !q.is_answered())
            .map(|(index, _)| index)
            .collect()
    }

    /// `(current_index + 1) / len`, for display only.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_fraction(&self) -> f64 {
        (self.current_index + 1) as f64 / self.questions.len() as f64
    }

    /// Record a selection for the question at `index`.
    ///
    /// Multi-choice questions toggle `answer`; single-choice questions replace
    /// the selection with it.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::Locked` after submission,
    /// `IndexOutOfRange` for a bad index and `UnknownOption` for an answer
    /// that is not one of the question's options.
    pub fn select_answer(
        &mut self,
        index: usize,
        answer: &str,
    ) -> Result<SessionChange, SessionStateError> {
        self.ensure_unlocked()?;
        let len = self.questions.len();
        let question = self
            .questions
            .get_mut(index)
            .ok_or(SessionStateError::IndexOutOfRange { index, len })?;
        if !question.question().has_option(answer) {
            return Err(SessionStateError::UnknownOption {
                index,
                answer: answer.to_owned(),
            });
        }
        question.select(answer);
        Ok(SessionChange::Selected { index })
    }

    /// Flip the review mark on the question at `index`.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::Locked` after submission or
    /// `IndexOutOfRange` for a bad index.
    pub fn toggle_mark(&mut self, index: usize) -> Result<SessionChange, SessionStateError> {
        self.ensure_unlocked()?;
        self.ensure_index(index)?;
        let marked = if self.marked_for_review.remove(&index) {
            false
        } else {
            self.marked_for_review.insert(index);
            true
        };
        Ok(SessionChange::Marked { index, marked })
    }

    /// Move the cursor. Out-of-range targets leave it where it is.
    pub fn go_to(&mut self, index: usize) -> SessionChange {
        if index >= self.questions.len() || index == self.current_index {
            return SessionChange::Unchanged;
        }
        let from = self.current_index;
        self.current_index = index;
        SessionChange::Navigated { from, to: index }
    }

    pub fn next(&mut self) -> SessionChange {
        self.go_to(self.current_index + 1)
    }

    pub fn previous(&mut self) -> SessionChange {
        match self.current_index.checked_sub(1) {
            Some(index) => self.go_to(index),
            None => SessionChange::Unchanged,
        }
    }

    pub(crate) fn questions_mut(&mut self) -> &mut [SessionQuestion] {
        &mut self.questions
    }

    pub(crate) fn lock(&mut self) {
        self.locked = true;
    }

    fn ensure_unlocked(&self) -> Result<(), SessionStateError> {
        if self.locked {
            Err(SessionStateError::Locked)
        } else {
            Ok(())
        }
    }

    fn ensure_index(&self, index: usize) -> Result<(), SessionStateError> {
        if index < self.questions.len() {
            Ok(())
        } else {
            Err(SessionStateError::IndexOutOfRange {
                index,
                len: self.questions.len(),
            })
        }
    }
}
