//! Read-only projections of a quiz run for the presentation layer.

use quiz_core::model::{
    OptionMark, QuizSession, ResultFilter, ScoreReport, SessionQuestion, TakerName, Verdict,
};

//
// ─── QUESTION SCREEN ───────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub label: String,
    pub selected: bool,
}

/// The current question as the quiz screen renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionView {
    pub index: usize,
    pub total: usize,
    pub text: String,
    pub is_multi_choice: bool,
    pub options: Vec<OptionView>,
    pub marked: bool,
    pub progress: f64,
}

impl QuestionView {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        let index = session.current_index();
        let item = session.current();
        Self {
            index,
            total: session.len(),
            text: item.question().text().to_owned(),
            is_multi_choice: item.question().is_multi_choice(),
            options: item
                .question()
                .answer_options()
                .iter()
                .map(|label| OptionView {
                    label: label.clone(),
                    selected: item.is_selected(label),
                })
                .collect(),
            marked: session.is_marked(index),
            progress: session.progress_fraction(),
        }
    }

    /// "Question 3 of 10".
    #[must_use]
    pub fn position_label(&self) -> String {
        format!("Question {} of {}", self.index + 1, self.total)
    }
}

/// One cell of the question palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub index: usize,
    pub answered: bool,
    pub marked: bool,
    pub current: bool,
}

#[must_use]
pub fn palette(session: &QuizSession) -> Vec<PaletteEntry> {
    (0..session.len())
        .map(|index| PaletteEntry {
            index,
            answered: session.is_answered(index),
            marked: session.is_marked(index),
            current: index == session.current_index(),
        })
        .collect()
}

//
// ─── RESULTS SCREEN ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultOptionView {
    pub label: String,
    pub mark: OptionMark,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItemView {
    /// Position of the question within the session.
    pub index: usize,
    pub text: String,
    pub is_multi_choice: bool,
    pub verdict: Verdict,
    pub options: Vec<ResultOptionView>,
}

impl ResultItemView {
    fn from_item(index: usize, item: &SessionQuestion, verdict: Verdict) -> Self {
        Self {
            index,
            text: item.question().text().to_owned(),
            is_multi_choice: item.question().is_multi_choice(),
            verdict,
            options: item
                .question()
                .answer_options()
                .iter()
                .map(|label| ResultOptionView {
                    label: label.clone(),
                    mark: OptionMark::for_option(item, label),
                })
                .collect(),
        }
    }
}

/// Scored session, filtered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub taker_name: Option<String>,
    pub correct: usize,
    pub total: usize,
    pub percent: u32,
    pub elapsed_secs: u64,
    pub filter: ResultFilter,
    pub items: Vec<ResultItemView>,
}

impl ResultsView {
    #[must_use]
    pub fn build(
        session: &QuizSession,
        report: &ScoreReport,
        taker_name: Option<&TakerName>,
        elapsed_secs: u64,
        filter: ResultFilter,
    ) -> Self {
        let items = session
            .questions()
            .iter()
            .zip(&report.verdicts)
            .enumerate()
            .filter(|(_, (_, verdict))| filter.admits(**verdict))
            .map(|(index, (item, verdict))| ResultItemView::from_item(index, item, *verdict))
            .collect();

        Self {
            taker_name: taker_name.map(|name| name.as_str().to_owned()),
            correct: report.correct_count,
            total: report.total_count,
            percent: report.percent(),
            elapsed_secs,
            filter,
            items,
        }
    }

    /// "Alice scored 7 / 10 (70%)", or without a name when none was given.
    #[must_use]
    pub fn headline(&self) -> String {
        let score = format!("{} / {} ({}%)", self.correct, self.total, self.percent);
        match &self.taker_name {
            Some(name) => format!("{name} scored {score}"),
            None => format!("You scored {score}"),
        }
    }
}
