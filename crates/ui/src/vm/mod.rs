mod quiz_vm;
mod results_vm;
mod setup_vm;
mod time_fmt;

pub use quiz_vm::{
    OptionVm, PaletteCellVm, QuizIntent, QuizOutcome, QuizScreenVm, apply_intent, intent_for_key,
};
pub use results_vm::{ResultItemVm, ResultOptionVm, ResultsVm, map_results};
pub use setup_vm::{DEFAULT_COUNT_INPUT, SetupForm};
pub use time_fmt::{format_datetime, format_elapsed, format_remaining};
