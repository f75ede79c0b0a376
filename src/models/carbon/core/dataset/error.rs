use thiserror::Error;

use crate::models::carbon::core::{EconomyError, EnvironmentError, ValidationReport};

/// Errors raised while building a dataset version.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// The transaction table or gross output is invalid, or the economy is singular.
    #[error("economic model failed")]
    Economy(#[source] EconomyError),

    /// The pressures or indicator groups are invalid.
    #[error("environmental model failed")]
    Environment(#[source] EnvironmentError),

    /// Certification was required and at least one check failed.
    #[error("dataset failed {} consistency check(s)", .0.failures().count())]
    Uncertified(ValidationReport),
}

impl From<EconomyError> for BuildError {
    fn from(error: EconomyError) -> Self {
        Self::Economy(error)
    }
}

/// Economy failures surfaced by the environmental stage are reported as such.
impl From<EnvironmentError> for BuildError {
    fn from(error: EnvironmentError) -> Self {
        match error {
            EnvironmentError::Economy(error) => Self::Economy(error),
            error => Self::Environment(error),
        }
    }
}
