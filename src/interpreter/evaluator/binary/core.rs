use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary operation between two already evaluated values.
    ///
    /// Logical operators go to `eval_logic` and equality operators to
    /// `eval_equality`, whatever the operand tags. The remaining operators
    /// are defined for two numbers, and `+` additionally for two strings.
    /// Every other combination is an `UnsupportedOperation`.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use tessel::{
    ///     ast::BinaryOperator,
    ///     error::RuntimeError,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let sum = Context::eval_binary(BinaryOperator::Add, &Value::from("a"), &Value::from("b"), 1);
    /// assert_eq!(sum.unwrap(), Value::from("ab"));
    ///
    /// let err = Context::eval_binary(BinaryOperator::Add, &Value::Number(1.0), &Value::from("b"), 1);
    /// assert!(matches!(err, Err(RuntimeError::UnsupportedOperation { .. })));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{And, Equal, NotEqual, Or};

        match op {
            And | Or => Self::eval_logic(op, left, right, line),
            Equal | NotEqual => Self::eval_equality(op, left, right, line),
            _ => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Self::eval_number_op(op, *a, *b, line),
                (Value::String(a), Value::String(b)) => Self::eval_string_op(op, a, b, line),
                _ => Err(RuntimeError::UnsupportedOperation { details: format!("{} {} {}",
                                                                               left.type_name(),
                                                                               operator_symbol(op),
                                                                               right.type_name()),
                                                              line }),
            },
        }
    }
}

/// Returns the source spelling of an operator for error messages.
#[must_use]
pub const fn operator_symbol(op: BinaryOperator) -> &'static str {
    match op {
        BinaryOperator::Add => "+",
        BinaryOperator::Sub => "-",
        BinaryOperator::Mul => "*",
        BinaryOperator::Div => "/",
        BinaryOperator::Less => "<",
        BinaryOperator::Greater => ">",
        BinaryOperator::LessEqual => "<=",
        BinaryOperator::GreaterEqual => ">=",
        BinaryOperator::Equal => "==",
        BinaryOperator::NotEqual => "!=",
        BinaryOperator::And => "&&",
        BinaryOperator::Or => "||",
    }
}
