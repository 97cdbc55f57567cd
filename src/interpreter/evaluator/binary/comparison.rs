use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Maps an equality operator and an equality result to the final boolean.
///
/// # Example
/// ```
/// use tessel::{ast::BinaryOperator, interpreter::evaluator::binary::comparison::equality_op_result};
///
/// assert!(equality_op_result(BinaryOperator::Equal, true));
/// assert!(equality_op_result(BinaryOperator::NotEqual, false));
/// ```
#[must_use]
pub fn equality_op_result(op: BinaryOperator, is_equal: bool) -> bool {
    match op {
        BinaryOperator::NotEqual => !is_equal,
        _ => is_equal,
    }
}

impl Context {
    /// Evaluates `==` or `!=`.
    ///
    /// Both operands must carry the same tag. Numbers, booleans, strings,
    /// arrays and maps compare structurally; objects and functions compare by
    /// identity; `void` equals `void`.
    ///
    /// # Errors
    /// `TypeMismatch` when the operands have different tags.
    ///
    /// # Example
    /// ```
    /// use tessel::{
    ///     ast::BinaryOperator,
    ///     error::RuntimeError,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let a = Value::Array(vec![Value::Number(1.0), Value::from("x")]);
    /// let b = a.clone();
    /// let eq = Context::eval_equality(BinaryOperator::Equal, &a, &b, 1).unwrap();
    /// assert_eq!(eq, Value::Boolean(true));
    ///
    /// let err = Context::eval_equality(BinaryOperator::Equal, &a, &Value::Number(1.0), 1);
    /// assert!(matches!(err, Err(RuntimeError::TypeMismatch { .. })));
    /// ```
    pub fn eval_equality(op: BinaryOperator,
                         left: &Value,
                         right: &Value,
                         line: usize)
                         -> EvalResult<Value> {
        if !left.same_tag(right) {
            return Err(RuntimeError::TypeMismatch { details: format!("cannot compare {} with {}",
                                                                     left.type_name(),
                                                                     right.type_name()),
                                                    line });
        }

        Ok(Value::Boolean(equality_op_result(op, left == right)))
    }
}
