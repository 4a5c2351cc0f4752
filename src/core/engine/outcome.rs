/// Result of an engine mutation.
///
/// A missing activity is an expected outcome rather than an error: the
/// request is dropped and nothing is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    NotFound,
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("activity {activity_id} has reached its capacity of {capacity}")]
    CapacityExceeded { activity_id: i64, capacity: u32 },

    #[error("comment text is empty")]
    EmptyInput,
}

impl Rejection {
    /// Whether the user should be told about this rejection.
    pub fn is_user_visible(&self) -> bool {
        matches!(self, Rejection::CapacityExceeded { .. })
    }
}
