mod plan;
mod progress;
mod service;
mod view;
mod workflow;

// Public API of the quiz session subsystem.
pub use crate::error::SessionError;
pub use plan::{SessionBuilder, SessionPlan, mixed_targets};
pub use progress::QuizProgress;
pub use service::{QuizResults, QuizRun, SubmitReason, TickOutcome};
pub use view::{
    OptionView, PaletteEntry, QuestionView, ResultItemView, ResultOptionView, ResultsView, palette,
};
pub use workflow::QuizLoopService;
