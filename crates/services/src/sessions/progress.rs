/// Aggregated view of quiz progress, used by the palette and submit prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
    pub unanswered: usize,
    pub marked: usize,
    pub current: usize,
    pub is_submitted: bool,
}

impl QuizProgress {
    #[must_use]
    pub fn has_unanswered(&self) -> bool {
        self.unanswered > 0
    }
}
