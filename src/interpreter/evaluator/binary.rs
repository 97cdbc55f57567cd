/// Operator dispatch.
///
/// Routes a binary operator and its operands to the handler for that operator
/// class.
pub mod core;
/// Numeric and string operators.
///
/// Arithmetic and ordering on numbers, and concatenation on strings.
pub mod scalar;
/// Equality.
///
/// `==` and `!=` across all value tags.
pub mod comparison;
/// Logical operators.
///
/// `&&` and `||` on booleans.
pub mod logic;
