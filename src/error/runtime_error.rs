use thiserror::Error;

/// Represents all errors that can occur during evaluation.
///
/// Every variant carries the source line of the construct that failed. Errors
/// raised by native callbacks, which have no source position of their own, are
/// created with line `0` and attributed to the calling expression through
/// [`RuntimeError::at_line`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    /// Read or wrote a variable that was never declared.
    #[error("Error on line {line}: Undefined variable '{name}'.")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a name that is neither a native nor a user function.
    #[error("Error on line {line}: Undefined function '{name}'.")]
    UndefinedFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Instantiated a class that was never defined.
    #[error("Error on line {line}: Undefined class '{name}'.")]
    UndefinedClass {
        /// The name of the class.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Accessed a member that the object or map does not have.
    #[error("Error on line {line}: Undefined member '{name}'.")]
    UndefinedMember {
        /// The name of the member.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Declared a name twice in the same scope.
    #[error("Error on line {line}: '{name}' is already declared in this scope.")]
    DuplicateDeclaration {
        /// The name of the variable or member.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Registered a function or class name that already exists.
    #[error("Error on line {line}: '{name}' is already defined.")]
    DuplicateDefinition {
        /// The name of the function or class.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value had a type that the operation or slot does not accept.
    #[error("Error on line {line}: Type mismatch: {details}.")]
    TypeMismatch {
        /// Details about the mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A function, method or constructor received the wrong number of
    /// arguments.
    #[error("Error on line {line}: '{name}' expects {expected} argument(s), found {found}.")]
    ArityMismatch {
        /// The name of the callee.
        name:     String,
        /// The number of declared parameters.
        expected: usize,
        /// The number of supplied arguments.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Indexed an array or string outside `[0, len)`.
    #[error("Error on line {line}: Index {index} out of bounds for length {len}.")]
    IndexOutOfBounds {
        /// The requested index.
        index: f64,
        /// The length of the indexed value.
        len:   usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Read a key that a map or object does not contain.
    #[error("Error on line {line}: Key not found: '{key}'.")]
    KeyNotFound {
        /// The missing key.
        key:  String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Divided by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a member that exists but does not hold a function.
    #[error("Error on line {line}: '{name}' is not callable.")]
    NotCallable {
        /// The name of the member.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Applied an operator to operands it is not defined for.
    #[error("Error on line {line}: Unsupported operation: {details}.")]
    UnsupportedOperation {
        /// Details about the operation.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The environment reached an inconsistent state.
    #[error("Error on line {line}: Internal error: {details}.")]
    InternalError {
        /// Details about the failure.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A call to `assert` received `false`.
    #[error("Error on line {line}: Assertion failed.")]
    AssertionFailed {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl RuntimeError {
    /// Returns the source line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UndefinedVariable { line, .. }
            | Self::UndefinedFunction { line, .. }
            | Self::UndefinedClass { line, .. }
            | Self::UndefinedMember { line, .. }
            | Self::DuplicateDeclaration { line, .. }
            | Self::DuplicateDefinition { line, .. }
            | Self::TypeMismatch { line, .. }
            | Self::ArityMismatch { line, .. }
            | Self::IndexOutOfBounds { line, .. }
            | Self::KeyNotFound { line, .. }
            | Self::DivisionByZero { line }
            | Self::NotCallable { line, .. }
            | Self::UnsupportedOperation { line, .. }
            | Self::InternalError { line, .. }
            | Self::AssertionFailed { line } => *line,
        }
    }

    /// Attributes an error without a source position to `line`.
    ///
    /// Errors that already carry a line are returned unchanged.
    ///
    /// # Example
    /// ```
    /// use tessel::error::RuntimeError;
    ///
    /// let err = RuntimeError::AssertionFailed { line: 0 }.at_line(7);
    /// assert_eq!(err.line(), 7);
    ///
    /// let err = RuntimeError::AssertionFailed { line: 3 }.at_line(7);
    /// assert_eq!(err.line(), 3);
    /// ```
    #[must_use]
    pub fn at_line(mut self, new_line: usize) -> Self {
        match &mut self {
            Self::UndefinedVariable { line, .. }
            | Self::UndefinedFunction { line, .. }
            | Self::UndefinedClass { line, .. }
            | Self::UndefinedMember { line, .. }
            | Self::DuplicateDeclaration { line, .. }
            | Self::DuplicateDefinition { line, .. }
            | Self::TypeMismatch { line, .. }
            | Self::ArityMismatch { line, .. }
            | Self::IndexOutOfBounds { line, .. }
            | Self::KeyNotFound { line, .. }
            | Self::DivisionByZero { line }
            | Self::NotCallable { line, .. }
            | Self::UnsupportedOperation { line, .. }
            | Self::InternalError { line, .. }
            | Self::AssertionFailed { line } => {
                if *line == 0 {
                    *line = new_line;
                }
            },
        }
        self
    }
}
