use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::session::{QuizSession, SessionQuestion};

/// Outcome for one question after submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    /// Exact set match between key and selection. No partial credit, and an
    /// empty key never scores.
    #[must_use]
    pub fn judge(key: &BTreeSet<String>, selected: &BTreeSet<String>) -> Self {
        if !key.is_empty() && key == selected {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        }
    }

    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

/// Aggregate result of a submitted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    pub verdicts: Vec<Verdict>,
    pub correct_count: usize,
    pub total_count: usize,
}

impl ScoreReport {
    #[must_use]
    pub fn wrong_count(&self) -> usize {
        self.total_count - self.correct_count
    }

    /// Whole-number percentage, rounded half up.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total_count == 0 {
            return 0;
        }
        let scaled = (self.correct_count * 200 + self.total_count) / (self.total_count * 2);
        u32::try_from(scaled).unwrap_or(100)
    }
}

/// Score every question and lock the session.
///
/// Verdicts are written once; scoring an already scored session reports the
/// recorded verdicts unchanged.
pub fn score(session: &mut QuizSession) -> ScoreReport {
    let verdicts: Vec<Verdict> = session
        .questions_mut()
        .iter_mut()
        .map(|item| {
            let verdict = Verdict::judge(item.question().correct_answers(), item.selected());
            item.record_verdict(verdict)
        })
        .collect();
    session.lock();

    let correct_count = verdicts.iter().filter(|v| v.is_correct()).count();
    ScoreReport {
        total_count: verdicts.len(),
        correct_count,
        verdicts,
    }
}

//
// ─── RESULTS FILTERING ─────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultFilter {
    #[default]
    All,
    Correct,
    Wrong,
}

impl ResultFilter {
    pub const ALL: [ResultFilter; 3] = [ResultFilter::All, ResultFilter::Correct, ResultFilter::Wrong];

    #[must_use]
    pub fn admits(self, verdict: Verdict) -> bool {
        match self {
            ResultFilter::All => true,
            ResultFilter::Correct => verdict.is_correct(),
            ResultFilter::Wrong => !verdict.is_correct(),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ResultFilter::All => "All",
            ResultFilter::Correct => "Correct",
            ResultFilter::Wrong => "Wrong",
        }
    }
}

/// Decoration of a single option on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptionMark {
    pub correct: bool,
    pub chosen: bool,
    pub incorrectly_chosen: bool,
}

impl OptionMark {
    #[must_use]
    pub fn for_option(item: &SessionQuestion, option: &str) -> Self {
        let correct = item.question().is_correct_option(option);
        let chosen = item.is_selected(option);
        Self {
            correct,
            chosen,
            incorrectly_chosen: chosen && !correct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::session::tests::{question, session_of};

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn verdict_ignores_selection_order() {
        let mut session = session_of(vec![question(1, true, &["A", "C"])]);
        session.select_answer(0, "C").unwrap();
        session.select_answer(0, "A").unwrap();

        let report = score(&mut session);
        assert_eq!(report.verdicts, vec![Verdict::Correct]);
        assert_eq!(report.correct_count, 1);
    }

    #[test]
    fn judge_is_permutation_invariant() {
        let orders = [["A", "B", "C"], ["C", "B", "A"], ["B", "A", "C"]];
        for key_order in orders {
            for pick_order in orders {
                assert_eq!(Verdict::judge(&set(&key_order), &set(&pick_order)), Verdict::Correct);
            }
        }
    }

    #[test]
    fn partial_multi_choice_answer_is_wrong() {
        assert_eq!(Verdict::judge(&set(&["A", "C"]), &set(&["A"])), Verdict::Incorrect);
        assert_eq!(
            Verdict::judge(&set(&["A", "C"]), &set(&["A", "B", "C"])),
            Verdict::Incorrect
        );
    }

    #[test]
    fn empty_key_never_scores() {
        assert_eq!(Verdict::judge(&set(&[]), &set(&[])), Verdict::Incorrect);
    }

    #[test]
    fn unanswered_question_is_scored_against_its_key() {
        let mut session = session_of(vec![question(1, false, &["A"]), question(2, false, &["B"])]);
        session.select_answer(1, "B").unwrap();
        let report = score(&mut session);
        assert_eq!(report.verdicts, vec![Verdict::Incorrect, Verdict::Correct]);
        assert_eq!(report.wrong_count(), 1);
        assert_eq!(report.percent(), 50);
    }

    #[test]
    fn scoring_locks_and_freezes_verdicts() {
        let mut session = session_of(vec![question(1, false, &["A"])]);
        session.select_answer(0, "A").unwrap();
        let first = score(&mut session);
        assert!(session.is_locked());
        assert!(session.select_answer(0, "B").is_err());

        let second = score(&mut session);
        assert_eq!(first, second);
        assert_eq!(session.current().verdict(), Some(Verdict::Correct));
    }

    #[test]
    fn option_marks_flag_wrong_choices() {
        let mut session = session_of(vec![question(1, true, &["A", "C"])]);
        session.select_answer(0, "A").unwrap();
        session.select_answer(0, "B").unwrap();
        let item = session.current();

        assert_eq!(
            OptionMark::for_option(item, "A"),
            OptionMark { correct: true, chosen: true, incorrectly_chosen: false }
        );
        assert_eq!(
            OptionMark::for_option(item, "B"),
            OptionMark { correct: false, chosen: true, incorrectly_chosen: true }
        );
        assert_eq!(
            OptionMark::for_option(item, "C"),
            OptionMark { correct: true, chosen: false, incorrectly_chosen: false }
        );
    }

    #[test]
    fn result_filter_splits_verdicts() {
        assert!(ResultFilter::All.admits(Verdict::Incorrect));
        assert!(ResultFilter::Correct.admits(Verdict::Correct));
        assert!(!ResultFilter::Correct.admits(Verdict::Incorrect));
        assert!(ResultFilter::Wrong.admits(Verdict::Incorrect));
    }

    #[test]
    fn percent_rounds_half_up() {
        let report = ScoreReport {
            verdicts: Vec::new(),
            correct_count: 1,
            total_count: 8,
        };
        // 12.5 -> 13
        assert_eq!(report.percent(), 13);
    }
}
