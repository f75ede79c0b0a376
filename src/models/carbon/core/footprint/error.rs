use thiserror::Error;

use crate::{models::carbon::core::EnvironmentError, support::constraint::ConstraintError};

/// Errors raised by malformed footprint queries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// A sector index is outside `0..sectors`.
    #[error("sector index {index} is out of range for {sectors} sectors")]
    IndexOutOfRange { index: usize, sectors: usize },

    /// A product quantity is negative or not finite.
    #[error("quantity {value} is invalid: {reason}")]
    InvalidQuantity {
        value: f64,
        #[source]
        reason: ConstraintError,
    },

    /// A demand vector does not have one entry per sector.
    #[error("demand vector has {actual} entries, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A demand entry is negative or not finite.
    #[error("demand for sector {sector} is {value}: {reason}")]
    InvalidDemand {
        sector: usize,
        value: f64,
        #[source]
        reason: ConstraintError,
    },

    /// The greenhouse-gas selection or its linkage analysis is invalid.
    #[error("environmental model failed")]
    Environment(#[from] EnvironmentError),
}
