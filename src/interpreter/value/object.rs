use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    fmt,
    rc::Rc,
};

use crate::{
    ast::FunctionDef,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{core::Value, types::Slot},
    },
};

/// A shared handle to a class instance.
pub type ObjectRef = Rc<RefCell<Object>>;

thread_local! {
    /// Objects whose `Display` is currently running on this thread.
    static FORMATTING: RefCell<HashSet<*const RefCell<Object>>> = RefCell::new(HashSet::new());
}

/// One member of an object.
#[derive(Debug, Clone)]
pub enum Member {
    /// A typed data member.
    Field(Slot),
    /// A method, called with the owning object as receiver.
    Method(Rc<FunctionDef>),
}

/// A class instance: the name of its class and its members.
///
/// Objects are map-shaped. Member access, member calls and string-key index
/// reads resolve against `members` the same way they resolve against the keys
/// of a map.
pub struct Object {
    /// The class this object was instantiated from.
    pub class_name: String,
    /// Data members and methods by name.
    pub members:    HashMap<String, Member>,
}

impl Object {
    /// Creates an object of class `class_name` with no members.
    #[must_use]
    pub fn new(class_name: &str) -> Self {
        Self { class_name: class_name.to_string(),
               members:    HashMap::new(), }
    }

    /// Reads a member as a value. Methods read as `Value::Function`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.members.get(name).map(|member| match member {
                                  Member::Field(slot) => slot.value.clone(),
                                  Member::Method(def) => Value::Function(Rc::clone(def)),
                              })
    }

    /// Returns the names of all data members, sorted.
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.members
                                       .iter()
                                       .filter(|(_, member)| matches!(member, Member::Field(_)))
                                       .map(|(name, _)| name.as_str())
                                       .collect();
        names.sort_unstable();
        names
    }
}

// Members can refer back to the object, so Debug only lists names.
impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.members.keys().collect();
        names.sort_unstable();
        f.debug_struct("Object")
         .field("class_name", &self.class_name)
         .field("members", &names)
         .finish()
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.class_name)?;

        for (index, name) in self.field_names().into_iter().enumerate() {
            if index > 0 {
                write!(f, ",")?;
            }

            if let Some(Member::Field(slot)) = self.members.get(name) {
                match &slot.value {
                    Value::String(s) => write!(f, " {name}: {s:?}")?,
                    other => write!(f, " {name}: {other}")?,
                }
            }
        }

        write!(f, " }}")
    }
}

/// Writes `object` with its data members.
///
/// Objects can reach themselves through fields, arrays and maps. An object
/// that is already being written further up the same value is written as
/// `<ClassName>` instead, so formatting always terminates. An object that is
/// mutably borrowed at the time is written as `<object>`.
pub(crate) fn fmt_object(object: &ObjectRef, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let Ok(inner) = object.try_borrow() else {
        return write!(f, "<object>");
    };

    let key = Rc::as_ptr(object);
    if !FORMATTING.with(|active| active.borrow_mut().insert(key)) {
        return write!(f, "<{}>", inner.class_name);
    }

    let result = write!(f, "{inner}");
    FORMATTING.with(|active| active.borrow_mut().remove(&key));

    result
}

/// Type checks and stores `value` into the data member `name` of `object`.
///
/// # Returns
/// `Ok(None)` once stored, or `Ok(Some(value))` handing the value back when
/// the object has no member of that name.
///
/// # Errors
/// `RuntimeError::TypeMismatch` if the member is a method or its declared type
/// rejects the value.
pub fn store_field(object: &ObjectRef,
                   name: &str,
                   value: Value,
                   line: usize)
                   -> EvalResult<Option<Value>> {
    let ty = match object.borrow().members.get(name) {
        Some(Member::Field(slot)) => slot.ty.clone(),
        Some(Member::Method(_)) => {
            return Err(RuntimeError::TypeMismatch { details: format!("cannot assign to method '{name}'"),
                                                    line });
        },
        None => return Ok(Some(value)),
    };

    ty.check(&value, name, line)?;

    if let Some(Member::Field(slot)) = object.borrow_mut().members.get_mut(name) {
        slot.value = value;
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::value::types::DeclaredType;

    fn object_with_list(class_name: &str) -> ObjectRef {
        let object = Rc::new(RefCell::new(Object::new(class_name)));
        let slot = Slot::new(DeclaredType::Array, "items", 1).unwrap();
        object.borrow_mut().members.insert("items".to_string(), Member::Field(slot));
        object
    }

    #[test]
    fn self_reference_is_written_once() {
        let node = object_with_list("Node");
        let items = Value::Array(vec![Value::Object(Rc::clone(&node)), Value::Number(1.0)]);
        store_field(&node, "items", items, 1).unwrap();

        assert_eq!(Value::Object(node).to_string(), "Node { items: [<Node>, 1] }");
    }

    #[test]
    fn shared_but_acyclic_objects_are_written_in_full() {
        let leaf = object_with_list("Leaf");
        let root = object_with_list("Root");
        let items = Value::Array(vec![Value::Object(Rc::clone(&leaf)), Value::Object(leaf)]);
        store_field(&root, "items", items, 1).unwrap();

        assert_eq!(Value::Object(root).to_string(),
                   "Root { items: [Leaf { items: [] }, Leaf { items: [] }] }");
    }
}
