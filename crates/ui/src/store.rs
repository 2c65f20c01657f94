use dioxus::prelude::*;

use services::QuizRun;

/// The run in progress, shared by the quiz and results routes.
///
/// Starting a quiz replaces the run; going back to setup drops it.
#[derive(Clone, Copy)]
pub struct QuizStore {
    pub run: Signal<Option<QuizRun>>,
}

impl QuizStore {
    /// Must be called inside a component scope.
    #[must_use]
    pub fn with_run(run: Option<QuizRun>) -> Self {
        Self {
            run: Signal::new(run),
        }
    }

    pub fn replace(mut self, run: QuizRun) {
        self.run.set(Some(run));
    }

    pub fn clear(mut self) {
        self.run.set(None);
    }
}

/// Provide a fresh, empty store to the subtree.
pub fn use_quiz_store_provider() -> QuizStore {
    use_context_provider(|| QuizStore::with_run(None))
}
