use chrono::{DateTime, Utc};
use dioxus::prelude::Key;

use quiz_core::model::SessionChange;
use services::{QuizRun, SessionError};

use crate::views::ViewError;
use crate::vm::time_fmt::format_remaining;

/// Inputs the quiz screen accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(String),
    ToggleMark,
    Next,
    Previous,
    GoTo(usize),
    Submit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizOutcome {
    Updated(SessionChange),
    Submitted,
}

/// Apply one intent to the run.
///
/// Submitting a run the timer already submitted is reported as `Submitted`,
/// so a late click lands on the results like the expiry did.
///
/// # Errors
///
/// Returns `ViewError::Unknown` if the run rejects the input.
pub fn apply_intent(
    run: &mut QuizRun,
    intent: QuizIntent,
    now: DateTime<Utc>,
) -> Result<QuizOutcome, ViewError> {
    let change = match intent {
        QuizIntent::Select(option) => run.select_current(&option),
        QuizIntent::ToggleMark => run.toggle_mark_current(),
        QuizIntent::Next => Ok(run.next()),
        QuizIntent::Previous => Ok(run.previous()),
        QuizIntent::GoTo(index) => Ok(run.go_to(index)),
        QuizIntent::Submit => {
            return match run.submit(now) {
                Ok(_) | Err(SessionError::AlreadySubmitted) => Ok(QuizOutcome::Submitted),
                Err(err) => Err(ViewError::from(&err)),
            };
        }
    };
    change
        .map(QuizOutcome::Updated)
        .map_err(|err| ViewError::from(&err))
}

/// Arrow keys move between questions.
#[must_use]
pub fn intent_for_key(key: &Key) -> Option<QuizIntent> {
    match key {
        Key::ArrowLeft => Some(QuizIntent::Previous),
        Key::ArrowRight => Some(QuizIntent::Next),
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: String,
    pub selected: bool,
    pub class: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteCellVm {
    pub index: usize,
    pub label: String,
    pub class: String,
}

/// Everything the quiz screen renders for the current state of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizScreenVm {
    pub position_label: String,
    pub text: String,
    pub hint: &'static str,
    pub is_multi_choice: bool,
    pub options: Vec<OptionVm>,
    pub marked: bool,
    pub progress_percent: u32,
    pub can_previous: bool,
    pub can_next: bool,
    pub palette: Vec<PaletteCellVm>,
    pub timer_label: String,
    pub timer_class: &'static str,
    pub unanswered: usize,
    pub is_submitted: bool,
}

impl QuizScreenVm {
    #[must_use]
    pub fn from_run(run: &QuizRun) -> Self {
        let question = run.question_view();
        let progress = run.progress();
        let palette = run
            .palette()
            .into_iter()
            .map(|cell| {
                let mut class = String::from("palette__cell");
                if cell.answered {
                    class.push_str(" palette__cell--answered");
                }
                if cell.marked {
                    class.push_str(" palette__cell--marked");
                }
                if cell.current {
                    class.push_str(" palette__cell--current");
                }
                PaletteCellVm {
                    index: cell.index,
                    label: (cell.index + 1).to_string(),
                    class,
                }
            })
            .collect();

        Self {
            position_label: question.position_label(),
            hint: if question.is_multi_choice {
                "Select all that apply."
            } else {
                "Select one answer."
            },
            text: question.text,
            is_multi_choice: question.is_multi_choice,
            options: question
                .options
                .into_iter()
                .map(|option| OptionVm {
                    class: if option.selected {
                        "option option--selected"
                    } else {
                        "option"
                    },
                    selected: option.selected,
                    label: option.label,
                })
                .collect(),
            marked: question.marked,
            progress_percent: progress_percent(question.progress),
            can_previous: question.index > 0,
            can_next: question.index + 1 < question.total,
            palette,
            timer_label: format_remaining(run.remaining_secs()),
            timer_class: run.timer_phase().css_class(),
            unanswered: progress.unanswered,
            is_submitted: progress.is_submitted,
        }
    }

    #[must_use]
    pub fn mark_label(&self) -> &'static str {
        if self.marked {
            "Unmark review"
        } else {
            "Mark for review"
        }
    }

    #[must_use]
    pub fn submit_prompt(&self) -> String {
        match self.unanswered {
            0 => "Submit your answers?".to_string(),
            1 => "You have 1 unanswered question. Submit anyway?".to_string(),
            n => format!("You have {n} unanswered questions. Submit anyway?"),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn progress_percent(fraction: f64) -> u32 {
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u32
}
