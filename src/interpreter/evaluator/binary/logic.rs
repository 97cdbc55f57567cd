use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Applies `&&` or `||` to two already evaluated operands.
    ///
    /// Both sides are always evaluated, so `false && f()` still calls `f`.
    ///
    /// # Errors
    /// `TypeMismatch` unless both operands are booleans.
    ///
    /// # Example
    /// ```
    /// use tessel::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let a = Value::Boolean(true);
    /// let b = Value::Boolean(false);
    ///
    /// let result = Context::eval_logic(BinaryOperator::Or, &a, &b, 1);
    /// assert_eq!(result.unwrap(), Value::Boolean(true));
    ///
    /// let result = Context::eval_logic(BinaryOperator::And, &Value::Number(1.0), &b, 1);
    /// assert!(result.is_err());
    /// ```
    pub fn eval_logic(op: BinaryOperator,
                      left: &Value,
                      right: &Value,
                      line: usize)
                      -> EvalResult<Value> {
        let (a, b) = (left.as_bool("logical operator", line)?,
                      right.as_bool("logical operator", line)?);
        let result = if op == BinaryOperator::Or { a || b } else { a && b };

        Ok(Value::Boolean(result))
    }
}
