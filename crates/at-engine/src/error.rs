use at_core::{CoreError, PersonId};
use at_model::InvariantViolation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    /// The transport or activity configuration cannot support generation.
    /// Fatal for the affected person; never silently defaulted.
    #[error("configuration error: {0}")]
    Config(String),

    /// A finished schedule failed the output contract even after one
    /// regeneration.  Internal bug, reported with the offending person.
    #[error("schedule for {person} violates the output contract: {violation}")]
    Invariant {
        person: PersonId,
        #[source]
        violation: InvariantViolation,
    },
}

impl From<CoreError> for GenError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Config(msg) => GenError::Config(msg),
        }
    }
}

pub type GenResult<T> = Result<T, GenError>;
