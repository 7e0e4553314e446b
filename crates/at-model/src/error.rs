use at_core::{FamilyId, Tick};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("population parse error: {0}")]
    Parse(String),

    #[error("family {0} not found")]
    FamilyNotFound(FamilyId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ModelResult<T> = Result<T, ModelError>;

/// A finished schedule failed its output contract.  Detected by the
/// generator's defensive exit check; always an internal bug.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("schedule has no slots")]
    Empty,

    #[error("slot {index} ends at {end}, before previous end {prev}")]
    Decreasing { index: usize, end: Tick, prev: Tick },

    #[error("final slot ends at {end}, before the end of the week")]
    ShortWeek { end: Tick },
}
