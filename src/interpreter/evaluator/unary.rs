use crate::{
    ast::{IncrementOp, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: numeric negation, numbers only.
    /// - `Not`: boolean negation, booleans only.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `line`: Line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use tessel::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let v = Context::eval_unary(UnaryOperator::Negate, &Value::Number(5.0), 1).unwrap();
    /// assert_eq!(v, Value::Number(-5.0));
    ///
    /// let v = Context::eval_unary(UnaryOperator::Not, &Value::Boolean(false), 1).unwrap();
    /// assert_eq!(v, Value::Boolean(true));
    ///
    /// assert!(Context::eval_unary(UnaryOperator::Not, &Value::Number(0.0), 1).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => Ok(Value::Number(-value.as_number("unary '-'", line)?)),
            UnaryOperator::Not => Ok(Value::Boolean(!value.as_bool("unary '!'", line)?)),
        }
    }

    /// Evaluates `++x`, `x++`, `--x` or `x--`.
    ///
    /// The variable must hold a number. The stepped value is written back
    /// through [`Context::set_variable`], so an `int` slot stays type checked
    /// and a data member of the receiver is updated in place.
    ///
    /// # Returns
    /// The new value for the prefix form, the old value for the postfix form.
    pub fn eval_increment(&mut self,
                          name: &str,
                          op: IncrementOp,
                          prefix: bool,
                          line: usize)
                          -> EvalResult<Value> {
        let old = match self.get_variable(name, line)? {
            Value::Number(n) => n,
            other => {
                return Err(RuntimeError::TypeMismatch { details: format!("cannot step '{name}' of type {}",
                                                                         other.type_name()),
                                                        line });
            },
        };

        let new = match op {
            IncrementOp::Increment => old + 1.0,
            IncrementOp::Decrement => old - 1.0,
        };

        self.set_variable(name, Value::Number(new), line)?;

        Ok(Value::Number(if prefix { new } else { old }))
    }
}
