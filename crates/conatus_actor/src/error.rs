use thiserror::Error;

/// Contract violations reported by [`crate::GoalSelector`].
///
/// None of these are retried: the caller handed over malformed data and
/// decides what to do about it. Goal memory is never modified when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GoalError {
    #[error("shape mismatch for {input}: expected {expected}, got {actual}")]
    ShapeMismatch {
        input: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("goal index {index} out of range (size {size})")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("vote policy produced NaN at index {index}")]
    InvalidVote { index: usize },

    #[error("no goal slots to choose from")]
    NoCandidates,
}

pub(crate) fn check_len(input: &'static str, expected: usize, actual: usize) -> Result<(), GoalError> {
    if expected == actual {
        Ok(())
    } else {
        Err(GoalError::ShapeMismatch {
            input,
            expected,
            actual,
        })
    }
}
