use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constraint, ConstraintError};

/// Marker type enforcing that a value is strictly positive (greater than zero).
///
/// Gross output carries this constraint: every normalization in the model
/// divides by it.
///
/// # Examples
///
/// ```
/// use io_footprint::support::constraint::{Constraint, StrictlyPositive};
///
/// assert!(StrictlyPositive::check(&200.0_f64).is_ok());
/// assert!(StrictlyPositive::check(&0.0_f64).is_err());
/// assert!(StrictlyPositive::check(&-1.0_f64).is_err());
/// assert!(StrictlyPositive::check(&f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outputs() {
        assert!(StrictlyPositive::check(&1e-9_f64).is_ok());
        assert_eq!(
            StrictlyPositive::check(&0.0_f64),
            Err(ConstraintError::Zero)
        );
        assert_eq!(
            StrictlyPositive::check(&-200.0_f64),
            Err(ConstraintError::Negative)
        );
        assert_eq!(
            StrictlyPositive::check(&f64::NAN),
            Err(ConstraintError::NotANumber)
        );
    }

    #[test]
    fn integers() {
        assert!(StrictlyPositive::check(&68_usize).is_ok());
        assert_eq!(
            StrictlyPositive::check(&0_usize),
            Err(ConstraintError::Zero)
        );
    }
}
