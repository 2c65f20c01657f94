use quiz_core::model::{QuizConfig, TypeFilter};

use crate::views::ViewError;

/// Default value of the question count field.
pub const DEFAULT_COUNT_INPUT: &str = "10";

/// Raw form values from the setup screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetupForm {
    pub count: String,
    pub filter: TypeFilter,
}

impl Default for SetupForm {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT_INPUT.to_string(),
            filter: TypeFilter::Mixed,
        }
    }
}

impl SetupForm {
    /// # Errors
    ///
    /// Returns `ViewError::InvalidCount` when the count is not a number in
    /// the accepted range.
    pub fn to_config(&self) -> Result<QuizConfig, ViewError> {
        let count: u32 = self
            .count
            .trim()
            .parse()
            .map_err(|_| ViewError::InvalidCount)?;
        QuizConfig::new(count, self.filter).map_err(|_| ViewError::InvalidCount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_must_be_a_number_of_at_least_five() {
        let mut form = SetupForm::default();
        assert_eq!(form.to_config().unwrap().requested_count(), 10);

        form.count = "4".into();
        assert_eq!(form.to_config(), Err(ViewError::InvalidCount));

        form.count = "ten".into();
        assert_eq!(form.to_config(), Err(ViewError::InvalidCount));

        form.count = " 5 ".into();
        form.filter = TypeFilter::Multi;
        assert_eq!(form.to_config().unwrap().filter(), TypeFilter::Multi);
    }
}
