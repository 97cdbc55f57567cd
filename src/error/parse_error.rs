use thiserror::Error;

/// Represents all errors that can occur while lexing and parsing source code.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// Encountered a token that does not fit the grammar at this position.
    #[error("Error on line {line}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// A description of the offending token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The token stream ended while more input was required.
    #[error("Error on line {line}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// The line of the last token seen.
        line: usize,
    },
    /// A literal could not be decoded.
    #[error("Error on line {line}: Invalid literal '{literal}'.")]
    InvalidLiteral {
        /// The literal text as written.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The left side of `=` is not a variable, an indexed variable or a member.
    #[error("Error on line {line}: Invalid assignment target.")]
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A file was included a second time during one compilation.
    #[error("Error on line {line}: Circular import of '{path}'.")]
    CircularImport {
        /// The path as it appeared in the directive.
        path: String,
        /// The line of the `#import` directive.
        line: usize,
    },
    /// An imported file could not be located or read.
    #[error("Error on line {line}: Failed to import '{path}': {details}.")]
    ImportFailed {
        /// The path as it appeared in the directive.
        path:    String,
        /// The underlying I/O failure.
        details: String,
        /// The line of the `#import` directive.
        line:    usize,
    },
}

impl ParseError {
    /// Returns the source line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line }
            | Self::InvalidLiteral { line, .. }
            | Self::InvalidAssignmentTarget { line }
            | Self::CircularImport { line, .. }
            | Self::ImportFailed { line, .. } => *line,
        }
    }
}
