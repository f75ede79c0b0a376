use thiserror::Error;

use crate::support::matrix::{InvalidEntry, ShapeMismatch};

/// Which Leontief-type linear system failed to invert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InverseKind {
    /// The demand-driven system `I − A`.
    Leontief,
    /// The supply-driven system `I − B`.
    Ghosh,
}

/// Errors raised while constructing or solving an [`EconomicModel`].
///
/// [`EconomicModel`]: super::EconomicModel
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EconomyError {
    /// `Z` is not square, or `x` does not match its dimension.
    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatch),

    /// The tables describe zero sectors.
    #[error("economy has no sectors")]
    NoSectors,

    /// An intermediate flow is negative or not finite.
    #[error(transparent)]
    InvalidEntry(#[from] InvalidEntry),

    /// A gross-output entry is not strictly positive.
    #[error("gross output of sector {sector} is {value}, must be strictly positive")]
    NonPositiveOutput {
        /// Offending sector index.
        sector: usize,
        /// Supplied gross output.
        value: f64,
    },

    /// A gross-output entry is infinite or `NaN`.
    #[error("gross output of sector {sector} is {value}, must be finite")]
    NonFiniteOutput { sector: usize, value: f64 },

    /// `I − A` or `I − B` is singular: the production structure is not viable.
    #[error("{inverse:?} system is singular: the economy is not productive")]
    SingularEconomy {
        /// The linear system that failed.
        inverse: InverseKind,
    },

    /// A sector index is outside `0..sectors`.
    #[error("sector index {index} is out of range for {sectors} sectors")]
    IndexOutOfRange { index: usize, sectors: usize },
}
