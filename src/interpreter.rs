/// Tree-walking evaluation.
///
/// [`evaluator::core::Context`] owns the scope stack, call frames, the
/// receiver of the running method and the function and class registries.
pub mod evaluator;
/// `#import` resolution.
///
/// Splices the tokens of imported files into the token stream before parsing
/// and rejects files that are included twice.
pub mod import;
/// Source text to `(Token, line)` pairs.
pub mod lexer;
/// Recursive descent from tokens to [`crate::ast::Program`].
///
/// Syntax errors carry the line of the offending token.
pub mod parser;
/// Runtime values, declared types and typed slots, and the heap records
/// backing objects.
pub mod value;
