use quiz_core::model::{OptionMark, ResultFilter, Verdict};
use services::{QuizRun, SubmitReason};

use crate::vm::time_fmt::{format_datetime, format_elapsed};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultOptionVm {
    pub label: String,
    pub class: &'static str,
    pub note: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultItemVm {
    pub number: usize,
    pub text: String,
    pub verdict_label: &'static str,
    pub class: &'static str,
    pub options: Vec<ResultOptionVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub headline: String,
    pub elapsed_label: String,
    pub submitted_label: String,
    pub reason_note: Option<&'static str>,
    pub filter: ResultFilter,
    pub items: Vec<ResultItemVm>,
}

fn option_class(mark: OptionMark) -> &'static str {
    if mark.incorrectly_chosen {
        "result-option result-option--wrong"
    } else if mark.correct && mark.chosen {
        "result-option result-option--correct result-option--chosen"
    } else if mark.correct {
        "result-option result-option--correct"
    } else {
        "result-option"
    }
}

fn option_note(mark: OptionMark) -> Option<&'static str> {
    match (mark.correct, mark.chosen) {
        (true, true) => Some("your answer"),
        (true, false) => Some("correct answer"),
        (false, true) => Some("your answer (incorrect)"),
        (false, false) => None,
    }
}

/// `None` until the run is submitted.
#[must_use]
pub fn map_results(run: &QuizRun, filter: ResultFilter) -> Option<ResultsVm> {
    let results = run.results()?;
    let view = run.results_view(filter)?;

    let items = view
        .items
        .iter()
        .map(|item| ResultItemVm {
            number: item.index + 1,
            text: item.text.clone(),
            verdict_label: match item.verdict {
                Verdict::Correct => "Correct",
                Verdict::Incorrect => "Wrong",
            },
            class: match item.verdict {
                Verdict::Correct => "result-item result-item--correct",
                Verdict::Incorrect => "result-item result-item--wrong",
            },
            options: item
                .options
                .iter()
                .map(|option| ResultOptionVm {
                    label: option.label.clone(),
                    class: option_class(option.mark),
                    note: option_note(option.mark),
                })
                .collect(),
        })
        .collect();

    Some(ResultsVm {
        headline: view.headline(),
        elapsed_label: format_elapsed(view.elapsed_secs),
        submitted_label: format!("Submitted {}", format_datetime(results.submitted_at)),
        reason_note: match results.reason {
            SubmitReason::Expired => Some("Time ran out; your answers were submitted automatically."),
            SubmitReason::Manual => None,
        },
        filter,
        items,
    })
}
