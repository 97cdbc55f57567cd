use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Returns `true` if `value` is finite and has no fractional part.
///
/// This is the check behind the `int` declared type: an `int` slot holds a
/// Number for which this function returns `true`.
///
/// # Example
/// ```
/// use tessel::util::num::is_integral;
///
/// assert!(is_integral(3.0));
/// assert!(is_integral(-12.0));
/// assert!(!is_integral(2.5));
/// assert!(!is_integral(f64::NAN));
/// ```
#[must_use]
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// Converts a length or position to the runtime number representation.
///
/// ## Errors
/// Returns `RuntimeError::InternalError` if the value exceeds
/// `MAX_SAFE_INTEGER` and would lose precision.
///
/// ## Example
/// ```
/// use tessel::util::num::usize_to_f64_checked;
///
/// assert_eq!(usize_to_f64_checked(42, 1).unwrap(), 42.0);
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64_checked(value: usize, line: usize) -> EvalResult<f64> {
    if value as u64 > MAX_SAFE_INTEGER {
        return Err(RuntimeError::InternalError { details: format!("length {value} is not representable as a number"),
                                                 line });
    }
    Ok(value as f64)
}

/// Converts a runtime number to a position inside a sequence of length `len`.
///
/// ## Errors
/// - `RuntimeError::TypeMismatch` if `value` is not integral.
/// - `RuntimeError::IndexOutOfBounds` if `value` lies outside `[0, len)`.
///
/// ## Example
/// ```
/// use tessel::{error::RuntimeError, util::num::f64_to_index_checked};
///
/// assert_eq!(f64_to_index_checked(1.0, 3, 1).unwrap(), 1);
///
/// let err = f64_to_index_checked(3.0, 3, 4).unwrap_err();
/// assert!(matches!(err, RuntimeError::IndexOutOfBounds { len: 3, line: 4, .. }));
///
/// let err = f64_to_index_checked(0.5, 3, 4).unwrap_err();
/// assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_sign_loss)]
pub fn f64_to_index_checked(value: f64, len: usize, line: usize) -> EvalResult<usize> {
    if !is_integral(value) {
        return Err(RuntimeError::TypeMismatch { details: format!("index must be an integer, found {value}"),
                                                line });
    }
    if value < 0.0 || value >= len as f64 {
        return Err(RuntimeError::IndexOutOfBounds { index: value,
                                                    len,
                                                    line });
    }
    Ok(value as usize)
}
