use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::f64_to_index_checked,
};

/// Checks if the argument list matches the expected count.
/// Returns an `ArityMismatch` naming the callee if it does not.
///
/// ## Example
/// ```
/// use tessel::{
///     error::RuntimeError,
///     interpreter::{evaluator::utils::check_arity, value::core::Value},
/// };
///
/// let args = vec![Value::Number(2.0), Value::Number(1.0)];
///
/// assert!(check_arity("add", &args, 2, 15).is_ok());
///
/// let err = check_arity("add", &args, 3, 15).unwrap_err();
/// assert!(matches!(err, RuntimeError::ArityMismatch { expected: 3, found: 2, .. }));
/// ```
pub fn check_arity<T>(name: &str, args: &[T], expected: usize, line: usize) -> EvalResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RuntimeError::ArityMismatch { name: name.to_string(),
                                          expected,
                                          found: args.len(),
                                          line })
    }
}

/// Extracts a string key, or fails with a `TypeMismatch` naming `what`.
pub fn expect_key<'a>(value: &'a Value, what: &str, line: usize) -> EvalResult<&'a str> {
    match value {
        Value::String(key) => Ok(key),
        other => Err(RuntimeError::TypeMismatch { details: format!("{what} key must be a string, found {}",
                                                                   other.type_name()),
                                                  line }),
    }
}

/// Converts an index value into a position inside a sequence of length `len`.
///
/// # Errors
/// - `TypeMismatch` if `value` is not a number or not integral.
/// - `IndexOutOfBounds` if it lies outside `[0, len)`.
pub fn expect_index(value: &Value, len: usize, line: usize) -> EvalResult<usize> {
    f64_to_index_checked(value.as_number("index", line)?, len, line)
}
