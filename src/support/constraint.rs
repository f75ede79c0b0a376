//! Numeric constraints checked before any matrix algebra runs.
//!
//! Input-output tables arrive from loaders as plain numbers. Before any
//! matrix algebra runs, the values that carry a sign or magnitude contract
//! are checked here: gross output must be strictly positive, flows,
//! pressures, quantities and demand entries must be non-negative and finite.
//!
//! # Provided constraints
//!
//! - [`NonNegative`]: Zero or greater
//! - [`StrictlyPositive`]: Greater than zero
//! - [`Finite`]: Neither infinite nor `NaN`
//!
//! Each marker implements [`Constraint<T>`]. Single values are checked with
//! [`Constraint::check`]; whole vectors and matrices are checked with
//! [`find_violation`], which reports the position of the first offending
//! element so errors can name it.
//!
//! # Extending
//!
//! Custom invariants are added by implementing [`Constraint<T>`] for a
//! zero-sized marker type.

mod finite;
mod non_negative;
mod strictly_positive;

use thiserror::Error;

pub use finite::Finite;
pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;

/// A numeric invariant carried by a zero-sized marker type.
///
/// # Example
///
/// ```
/// use io_footprint::support::constraint::{Constraint, ConstraintError, StrictlyPositive};
///
/// assert!(StrictlyPositive::check(&1250.0_f64).is_ok());
/// assert_eq!(StrictlyPositive::check(&0.0_f64), Err(ConstraintError::Zero));
/// ```
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value must be finite")]
    Infinite,
}

/// Returns the position and cause of the first element violating `C`.
///
/// Positions are counted in iteration order, so callers translating the
/// index back into a matrix cell must know the iteration layout
/// (`nalgebra` iterates column-major).
///
/// # Example
///
/// ```
/// use io_footprint::support::constraint::{ConstraintError, NonNegative, find_violation};
///
/// let demand = [3.0, 0.0, -1.5, 2.0];
/// assert_eq!(
///     find_violation::<NonNegative, _>(&demand),
///     Some((2, ConstraintError::Negative)),
/// );
/// ```
pub fn find_violation<'a, C, T>(
    values: impl IntoIterator<Item = &'a T>,
) -> Option<(usize, ConstraintError)>
where
    C: Constraint<T>,
    T: 'a,
{
    values
        .into_iter()
        .enumerate()
        .find_map(|(index, value)| C::check(value).err().map(|err| (index, err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_violation_in_clean_data() {
        let flows = [10.0, 20.0, 0.0];
        assert_eq!(find_violation::<NonNegative, f64>(&flows), None);
        assert_eq!(find_violation::<Finite, f64>(&flows), None);
    }

    #[test]
    fn reports_first_offender() {
        let outputs = [100.0, 0.0, -3.0];
        assert_eq!(
            find_violation::<StrictlyPositive, f64>(&outputs),
            Some((1, ConstraintError::Zero))
        );
    }

    #[test]
    fn empty_input_has_no_violation() {
        let empty: [f64; 0] = [];
        assert_eq!(find_violation::<StrictlyPositive, f64>(&empty), None);
    }
}
