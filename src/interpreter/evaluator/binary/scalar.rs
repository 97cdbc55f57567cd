use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::core::operator_symbol,
            core::{Context, EvalResult},
        },
        value::core::Value,
    },
};

impl Context {
    /// Evaluates an arithmetic or ordering operator on two numbers.
    ///
    /// # Errors
    /// - `DivisionByZero` when dividing by zero.
    /// - `UnsupportedOperation` for operators that do not apply to numbers.
    ///
    /// # Example
    /// ```
    /// use tessel::{
    ///     ast::BinaryOperator,
    ///     error::RuntimeError,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let q = Context::eval_number_op(BinaryOperator::Div, 7.0, 2.0, 1).unwrap();
    /// assert_eq!(q, Value::Number(3.5));
    ///
    /// let err = Context::eval_number_op(BinaryOperator::Div, 7.0, 0.0, 3).unwrap_err();
    /// assert_eq!(err, RuntimeError::DivisionByZero { line: 3 });
    /// ```
    pub fn eval_number_op(op: BinaryOperator, a: f64, b: f64, line: usize) -> EvalResult<Value> {
        Ok(match op {
               BinaryOperator::Add => Value::Number(a + b),
               BinaryOperator::Sub => Value::Number(a - b),
               BinaryOperator::Mul => Value::Number(a * b),
               BinaryOperator::Div => {
                   if b == 0.0 {
                       return Err(RuntimeError::DivisionByZero { line });
                   }
                   Value::Number(a / b)
               },
               BinaryOperator::Less => Value::Boolean(a < b),
               BinaryOperator::Greater => Value::Boolean(a > b),
               BinaryOperator::LessEqual => Value::Boolean(a <= b),
               BinaryOperator::GreaterEqual => Value::Boolean(a >= b),
               _ => {
                   return Err(RuntimeError::UnsupportedOperation { details: format!("number {} number",
                                                                                    operator_symbol(op)),
                                                                   line });
               },
           })
    }

    /// Evaluates an operator on two strings. Only `+` (concatenation) is
    /// defined here; equality is handled by `eval_equality`.
    ///
    /// # Errors
    /// `UnsupportedOperation` for every other operator.
    pub fn eval_string_op(op: BinaryOperator, a: &str, b: &str, line: usize) -> EvalResult<Value> {
        match op {
            BinaryOperator::Add => Ok(Value::String(format!("{a}{b}"))),
            _ => Err(RuntimeError::UnsupportedOperation { details: format!("string {} string",
                                                                           operator_symbol(op)),
                                                          line }),
        }
    }
}
