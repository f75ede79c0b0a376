use num_traits::Float;

use super::{Constraint, ConstraintError};

/// Marker type enforcing that a floating-point value is finite.
///
/// Loaders that read spreadsheet cells can produce `inf` or `NaN` for
/// malformed cells; neither may enter a coefficient matrix.
///
/// # Examples
///
/// ```
/// use io_footprint::support::constraint::{Constraint, Finite};
///
/// assert!(Finite::check(&-4.0_f64).is_ok());
/// assert!(Finite::check(&f64::INFINITY).is_err());
/// assert!(Finite::check(&f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Finite;

impl<T: Float> Constraint<T> for Finite {
    fn check(value: &T) -> Result<(), ConstraintError> {
        if value.is_nan() {
            Err(ConstraintError::NotANumber)
        } else if value.is_infinite() {
            Err(ConstraintError::Infinite)
        } else {
            Ok(())
        }
    }
}
