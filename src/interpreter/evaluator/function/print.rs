use crate::interpreter::{
    evaluator::core::{Context, EvalResult},
    value::core::Value,
};

/// Prints a value to standard output followed by a newline.
///
/// Accepts zero or one argument; with none, only the newline is written.
/// Strings are printed without quotes.
///
/// # Returns
/// `Value::Void`.
///
/// # Example
/// ```
/// use tessel::interpreter::{
///     evaluator::{core::Context, function::print::print},
///     value::core::Value,
/// };
///
/// let mut context = Context::bare();
/// let result = print(&[Value::Number(42.0)], &[None], &mut context).unwrap();
///
/// assert_eq!(result, Value::Void);
/// ```
pub fn print(args: &[Value], _names: &[Option<String>], _context: &mut Context) -> EvalResult<Value> {
    match args.first() {
        Some(value) => println!("{value}"),
        None => println!(),
    }

    Ok(Value::Void)
}
