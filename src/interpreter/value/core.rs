use std::{collections::BTreeMap, fmt, rc::Rc};

use crate::{
    ast::{FunctionDef, LiteralValue},
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::object::{ObjectRef, fmt_object},
    },
};

/// Represents a runtime value in the interpreter.
///
/// Exactly one tag is active at a time and no implicit coercion between tags
/// ever happens. Arrays and maps have value semantics: assigning them copies
/// the whole container. Objects and functions are shared handles.
#[derive(Debug, Clone)]
pub enum Value {
    /// A numeric value. There is no integer/float distinction at runtime.
    Number(f64),
    /// A boolean value, produced by comparisons and logical operators and
    /// required by every condition.
    Boolean(bool),
    /// An owned UTF-8 string.
    String(String),
    /// An ordered sequence of values.
    Array(Vec<Self>),
    /// String keyed values.
    Map(BTreeMap<String, Self>),
    /// A shared class instance.
    Object(ObjectRef),
    /// A handle to a user-defined function or method.
    Function(Rc<FunctionDef>),
    /// The empty value of statements and functions that produce nothing.
    Void,
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(v)
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Number(n) => (*n).into(),
            LiteralValue::Bool(b) => (*b).into(),
            LiteralValue::Str(s) => s.as_str().into(),
        }
    }
}

/// Structural equality for scalars and containers, identity for objects and
/// functions.
///
/// This is the equality used by `==`. Values of different tags are never
/// equal; the evaluator rejects such comparisons before calling this.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Void, Self::Void) => true,
            _ => false,
        }
    }
}

impl Value {
    /// Returns the name of the value's tag as used in error messages.
    ///
    /// # Example
    /// ```
    /// use tessel::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(1.0).type_name(), "number");
    /// assert_eq!(Value::Void.type_name(), "void");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Boolean(_) => "bool",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Object(_) => "object",
            Self::Function(_) => "function",
            Self::Void => "void",
        }
    }

    /// Returns `true` if both values carry the same tag.
    #[must_use]
    pub fn same_tag(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Extracts a number, or fails with a `TypeMismatch` naming `context`.
    ///
    /// # Parameters
    /// - `context`: What required the number, for the error message.
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use tessel::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(2.0).as_number("len", 1).unwrap(), 2.0);
    /// assert!(Value::Boolean(true).as_number("len", 1).is_err());
    /// ```
    pub fn as_number(&self, context: &str, line: usize) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            other => Err(RuntimeError::TypeMismatch { details: format!("{context} requires a number, found {}",
                                                                       other.type_name()),
                                                      line }),
        }
    }

    /// Extracts a boolean, or fails with a `TypeMismatch` naming `context`.
    ///
    /// Conditions of `if`, `while`, `do`/`while` and `for` go through this:
    /// numbers are never treated as truth values.
    pub fn as_bool(&self, context: &str, line: usize) -> EvalResult<bool> {
        match self {
            Self::Boolean(b) => Ok(*b),
            other => Err(RuntimeError::TypeMismatch { details: format!("{context} requires a bool, found {}",
                                                                       other.type_name()),
                                                      line }),
        }
    }

    /// Returns `true` for `Value::Void`.
    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }
}

/// Writes a value nested inside a container; strings are quoted there.
fn fmt_nested(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::String(s) => write!(f, "{s:?}"),
        other => write!(f, "{other}"),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Array(a) => {
                write!(f, "[")?;

                for (index, value) in a.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    fmt_nested(value, f)?;
                }

                write!(f, "]")
            },
            Self::Map(m) => {
                write!(f, "{{")?;

                for (index, (key, value)) in m.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{key:?}: ")?;
                    fmt_nested(value, f)?;
                }

                write!(f, "}}")
            },
            Self::Object(o) => fmt_object(o, f),
            Self::Function(def) => write!(f, "<func {}>", def.name),
            Self::Void => write!(f, "void"),
        }
    }
}
