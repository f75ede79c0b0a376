use thiserror::Error;

use crate::{
    models::carbon::core::EconomyError,
    support::matrix::{InvalidEntry, ShapeMismatch},
};

/// Errors raised by the environmental extension of an economy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvironmentError {
    /// `D1` does not have one column per sector.
    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatch),

    /// A raw pressure is negative or not finite.
    #[error(transparent)]
    InvalidEntry(#[from] InvalidEntry),

    /// An indicator group selects no rows.
    #[error("indicator group `{group}` is empty")]
    EmptyGroup { group: String },

    /// An indicator group selects a row that `D1` does not have.
    #[error("indicator group `{group}` selects row {row}, but only {indicators} indicators exist")]
    IndicatorOutOfRange {
        group: String,
        row: usize,
        indicators: usize,
    },

    /// No indicator group with this name was configured.
    #[error("unknown indicator group `{group}`")]
    UnknownGroup { group: String },

    /// The group's backward or forward multiplier total is not positive, so
    /// its linkage indices are undefined. Happens when the group has no
    /// pressure in any sector or the economy is not productive.
    #[error("linkage totals of indicator group `{group}` are not positive")]
    DegenerateGroup { group: String },

    /// The underlying economy could not be solved.
    #[error("economic model failed")]
    Economy(#[from] EconomyError),
}
