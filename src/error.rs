use thiserror::Error;

/// Parsing errors.
///
/// Defines all error types that can occur while tokenizing, parsing, or
/// resolving `#import` directives. Parse errors are detected before any
/// statement is evaluated.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: undefined
/// names, type mismatches, arity problems, out of range indexing and the
/// remaining failures of the evaluator and the native prelude.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure produced while running a tessel program.
///
/// Front end failures and evaluation failures both convert into this type, so
/// host code driving a whole script can use `?` on either phase.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Tokenizing, parsing or import resolution failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Returns the source line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Parse(e) => e.line(),
            Self::Runtime(e) => e.line(),
        }
    }
}
