use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question has no answer options")]
    NoOptions,

    #[error("question has an empty answer key")]
    EmptyAnswerKey,

    #[error("answer key entry {answer:?} is not one of the options")]
    KeyNotInOptions { answer: String },
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// A question record exactly as it appears in the bank file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    #[serde(alias = "text")]
    pub question: String,
    #[serde(alias = "options")]
    pub answer_options: Vec<String>,
    pub correct_answers: Vec<String>,
    #[serde(default)]
    pub is_multi_choice: bool,
}

impl QuestionDraft {
    /// Validate the record and attach its bank position.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the text is blank, there are no options,
    /// the key is empty, or a key entry is not among the options.
    pub fn validate(self, id: QuestionId) -> Result<Question, QuestionError> {
        if self.question.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if self.answer_options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        if self.correct_answers.is_empty() {
            return Err(QuestionError::EmptyAnswerKey);
        }
        if let Some(stray) = self
            .correct_answers
            .iter()
            .find(|answer| !self.answer_options.contains(answer))
        {
            return Err(QuestionError::KeyNotInOptions {
                answer: stray.clone(),
            });
        }

        Ok(Question {
            id,
            text: self.question,
            answer_options: self.answer_options,
            correct_answers: self.correct_answers.into_iter().collect(),
            is_multi_choice: self.is_multi_choice,
        })
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// An immutable question from the bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    answer_options: Vec<String>,
    correct_answers: BTreeSet<String>,
    is_multi_choice: bool,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn answer_options(&self) -> &[String] {
        &self.answer_options
    }

    #[must_use]
    pub fn correct_answers(&self) -> &BTreeSet<String> {
        &self.correct_answers
    }

    #[must_use]
    pub fn is_multi_choice(&self) -> bool {
        self.is_multi_choice
    }

    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.answer_options.iter().any(|candidate| candidate == option)
    }

    #[must_use]
    pub fn is_correct_option(&self, option: &str) -> bool {
        self.correct_answers.contains(option)
    }
}

//
// ─── TYPE FILTER ───────────────────────────────────────────────────────────────
//

/// Which question types a session draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    Single,
    Multi,
    #[default]
    Mixed,
}

impl TypeFilter {
    pub const ALL: [TypeFilter; 3] = [TypeFilter::Mixed, TypeFilter::Single, TypeFilter::Multi];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TypeFilter::Single => "single",
            TypeFilter::Multi => "multi",
            TypeFilter::Mixed => "mixed",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TypeFilter::Single => "Single choice",
            TypeFilter::Multi => "Multiple choice",
            TypeFilter::Mixed => "Mixed",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "single" => Some(TypeFilter::Single),
            "multi" => Some(TypeFilter::Multi),
            "mixed" => Some(TypeFilter::Mixed),
            _ => None,
        }
    }

    /// Returns true when a question of this kind is eligible.
    #[must_use]
    pub fn admits(self, question: &Question) -> bool {
        match self {
            TypeFilter::Single => !question.is_multi_choice(),
            TypeFilter::Multi => question.is_multi_choice(),
            TypeFilter::Mixed => true,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
