use std::{cell::RefCell, collections::BTreeMap, fmt, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{core::Value, object::Object},
    },
    util::num::is_integral,
};

/// The static type attached to a variable, data member, parameter or return
/// value.
///
/// A declared type is fixed when the slot is created; every later assignment
/// is checked against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    /// `int`: a Number with no fractional part.
    Int,
    /// `float`: any Number.
    Float,
    /// `bool`
    Bool,
    /// `string`
    String,
    /// `array`
    Array,
    /// `map`
    Map,
    /// `void`: holds nothing. Only valid as a return type.
    Void,
    /// An instance of the named class.
    Class(String),
}

impl DeclaredType {
    /// Returns the value a freshly declared slot of this type holds.
    ///
    /// Class typed slots start out as an unconstructed, memberless object of
    /// that class.
    ///
    /// # Example
    /// ```
    /// use tessel::interpreter::value::{core::Value, types::DeclaredType};
    ///
    /// assert_eq!(DeclaredType::Int.zero_value(), Value::Number(0.0));
    /// assert_eq!(DeclaredType::String.zero_value(), Value::String(String::new()));
    /// assert_eq!(DeclaredType::Array.zero_value(), Value::Array(vec![]));
    /// ```
    #[must_use]
    pub fn zero_value(&self) -> Value {
        match self {
            Self::Int | Self::Float => Value::Number(0.0),
            Self::Bool => Value::Boolean(false),
            Self::String => Value::String(String::new()),
            Self::Array => Value::Array(Vec::new()),
            Self::Map => Value::Map(BTreeMap::new()),
            Self::Void => Value::Void,
            Self::Class(name) => Value::Object(Rc::new(RefCell::new(Object::new(name)))),
        }
    }

    /// Returns `true` if `value` may be stored in a slot of this type.
    ///
    /// # Example
    /// ```
    /// use tessel::interpreter::value::{core::Value, types::DeclaredType};
    ///
    /// assert!(DeclaredType::Int.accepts(&Value::Number(4.0)));
    /// assert!(!DeclaredType::Int.accepts(&Value::Number(4.5)));
    /// assert!(DeclaredType::Float.accepts(&Value::Number(4.5)));
    /// assert!(!DeclaredType::Bool.accepts(&Value::Number(1.0)));
    /// ```
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Int, Value::Number(n)) => is_integral(*n),
            (Self::Float, Value::Number(_))
            | (Self::Bool, Value::Boolean(_))
            | (Self::String, Value::String(_))
            | (Self::Array, Value::Array(_))
            | (Self::Map, Value::Map(_)) => true,
            (Self::Class(name), Value::Object(object)) => {
                object.try_borrow().is_ok_and(|object| object.class_name == *name)
            },
            _ => false,
        }
    }

    /// Checks that `value` may be stored under `name`.
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeMismatch` when [`DeclaredType::accepts`]
    /// rejects the value.
    pub fn check(&self, value: &Value, name: &str, line: usize) -> EvalResult<()> {
        if self.accepts(value) {
            return Ok(());
        }

        let found = match value {
            Value::Number(n) if *self == Self::Int => format!("non-integral number {n}"),
            other => other.type_name().to_string(),
        };

        Err(RuntimeError::TypeMismatch { details: format!("cannot store {found} in '{name}' of type {self}"),
                                         line })
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Bool => write!(f, "bool"),
            Self::String => write!(f, "string"),
            Self::Array => write!(f, "array"),
            Self::Map => write!(f, "map"),
            Self::Void => write!(f, "void"),
            Self::Class(name) => write!(f, "{name}"),
        }
    }
}

/// A typed storage cell.
///
/// Slots are created only by declarations (and by object construction for
/// data members) and are owned by exactly one scope or object.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    /// The current value. Always accepted by `ty`.
    pub value: Value,
    /// The type fixed at declaration.
    pub ty:    DeclaredType,
}

impl Slot {
    /// Creates a slot holding the zero value of `ty`.
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeMismatch` for `void`, which cannot hold a
    /// value.
    pub fn new(ty: DeclaredType, name: &str, line: usize) -> EvalResult<Self> {
        if ty == DeclaredType::Void {
            return Err(RuntimeError::TypeMismatch { details: format!("'{name}' cannot be declared void"),
                                                    line });
        }

        Ok(Self { value: ty.zero_value(),
                  ty })
    }

    /// Type checks and stores `value`.
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeMismatch` if the slot's type rejects the
    /// value; the slot is left unchanged.
    pub fn store(&mut self, value: Value, name: &str, line: usize) -> EvalResult<()> {
        self.ty.check(&value, name, line)?;
        self.value = value;
        Ok(())
    }
}
