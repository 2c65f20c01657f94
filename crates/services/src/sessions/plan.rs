use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Question, QuizConfig, SessionQuestion, TypeFilter};

use crate::bank::QuestionBank;

/// Selection result for a session build.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub questions: Vec<SessionQuestion>,
    pub requested: usize,
    pub multi_selected: usize,
    pub single_selected: usize,
}

impl SessionPlan {
    /// Number of questions actually selected; may be below `requested`.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn is_short(&self) -> bool {
        self.total() < self.requested
    }
}

/// Multi/single targets for a mixed session of `requested` questions.
///
/// A quarter (rounded down) is multi-choice. When one side cannot supply its
/// share the other side makes up the difference as far as it can.
#[must_use]
pub fn mixed_targets(requested: usize, multi_available: usize, single_available: usize) -> (usize, usize) {
    // floor(requested * 0.25)
    let mut multi = requested / 4;
    let mut single = requested - multi;

    if multi > multi_available {
        multi = multi_available;
        single = (requested - multi).min(single_available);
    } else if single > single_available {
        single = single_available;
        multi = (requested - single).min(multi_available);
    }
    (multi, single)
}

/// Picks and orders the questions for one quiz session.
pub struct SessionBuilder {
    requested: usize,
    filter: TypeFilter,
}

impl SessionBuilder {
    #[must_use]
    pub fn new(requested: usize) -> Self {
        Self {
            requested,
            filter: TypeFilter::Mixed,
        }
    }

    #[must_use]
    pub fn from_config(config: &QuizConfig) -> Self {
        let requested = usize::try_from(config.requested_count()).unwrap_or(usize::MAX);
        Self::new(requested).with_filter(config.filter())
    }

    #[must_use]
    pub fn with_filter(mut self, filter: TypeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sample the bank without replacement.
    ///
    /// - `Single`/`Multi` draw up to `requested` questions of that type.
    /// - `Mixed` keeps the multi share from [`mixed_targets`], then shuffles
    ///   the combined selection.
    ///
    /// Every returned question is a fresh copy with no selection; the bank is
    /// not touched. A short bank yields a short plan rather than an error.
    pub fn build<R: Rng + ?Sized>(&self, bank: &QuestionBank, rng: &mut R) -> SessionPlan {
        let (multi_pool, single_pool): (Vec<&Question>, Vec<&Question>) = bank
            .questions()
            .iter()
            .partition(|q| q.is_multi_choice());

        let mut picked = match self.filter {
            TypeFilter::Single => sample(single_pool, self.requested, rng),
            TypeFilter::Multi => sample(multi_pool, self.requested, rng),
            TypeFilter::Mixed => {
                let (multi, single) =
                    mixed_targets(self.requested, multi_pool.len(), single_pool.len());
                let mut combined = sample(multi_pool, multi, rng);
                combined.extend(sample(single_pool, single, rng));
                combined.shuffle(rng);
                combined
            }
        };
        picked.truncate(self.requested);

        let multi_selected = picked.iter().filter(|q| q.is_multi_choice()).count();
        SessionPlan {
            single_selected: picked.len() - multi_selected,
            multi_selected,
            requested: self.requested,
            questions: picked
                .into_iter()
                .map(|q| SessionQuestion::new(q.clone()))
                .collect(),
        }
    }
}

fn sample<'a, R: Rng + ?Sized>(
    mut pool: Vec<&'a Question>,
    count: usize,
    rng: &mut R,
) -> Vec<&'a Question> {
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}
