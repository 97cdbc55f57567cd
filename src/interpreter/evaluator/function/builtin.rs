use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::print,
            utils::check_arity,
        },
        value::core::Value,
    },
    util::num::usize_to_f64_checked,
};

/// Type alias for prelude function handlers.
///
/// A handler receives the evaluated arguments, the names of the arguments
/// written as bare variables, and the context.
type BuiltinFn = fn(&[Value], &[Option<String>], &mut Context) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::OneOf(arr) => arr.contains(&n),
        }
    }

    /// The count reported in an `ArityMismatch`: the largest accepted one.
    fn expected(self) -> usize {
        match self {
            Self::Exact(m) => m,
            Self::OneOf(arr) => arr.iter().copied().max().unwrap_or(0),
        }
    }
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for installation),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of all functions of the native prelude.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "print"     => { arity: Arity::OneOf(&[0, 1]), func: print::print },
    "len"       => { arity: Arity::Exact(1), func: len },
    "push"      => { arity: Arity::Exact(2), func: push },
    "pop"       => { arity: Arity::Exact(1), func: pop },
    "keys"      => { arity: Arity::Exact(1), func: keys },
    "contains"  => { arity: Arity::Exact(2), func: contains },
    "to_string" => { arity: Arity::Exact(1), func: to_string },
    "assert"    => { arity: Arity::Exact(1), func: assert_fn },
}

/// Installs every prelude function into the native registry of `context`.
///
/// Each entry is wrapped in a callback that checks its arity first. Errors
/// are raised at line `0` and attributed to the call site by the dispatcher.
pub(crate) fn install_prelude(context: &mut Context) {
    for def in BUILTIN_TABLE {
        let (name, arity, func) = (def.name, def.arity, def.func);

        context.natives.insert(name.to_string(),
                               Rc::new(move |args: &[Value], names: &[Option<String>], ctx: &mut Context| {
                                   if !arity.check(args.len()) {
                                       return Err(RuntimeError::ArityMismatch { name:     name.to_string(),
                                                                                expected: arity.expected(),
                                                                                found:    args.len(),
                                                                                line:     0, });
                                   }
                                   func(args, names, ctx)
                               }));
    }
}

fn type_error(name: &str, expected: &str, found: &Value) -> RuntimeError {
    RuntimeError::TypeMismatch { details: format!("{name} expects {expected}, found {}",
                                                  found.type_name()),
                                 line:    0, }
}

/// Returns the number of elements of an array or map, or of characters of a
/// string.
///
/// # Example
/// ```
/// use tessel::interpreter::{
///     evaluator::{core::Context, function::builtin::len},
///     value::core::Value,
/// };
///
/// let mut context = Context::bare();
/// let n = len(&[Value::from("héllo")], &[None], &mut context).unwrap();
/// assert_eq!(n, Value::Number(5.0));
/// ```
pub fn len(args: &[Value], _names: &[Option<String>], _context: &mut Context) -> EvalResult<Value> {
    check_arity("len", args, 1, 0)?;
    let n = match &args[0] {
        Value::Array(a) => a.len(),
        Value::Map(m) => m.len(),
        Value::String(s) => s.chars().count(),
        other => return Err(type_error("len", "an array, map or string", other)),
    };

    Ok(Value::Number(usize_to_f64_checked(n, 0)?))
}

/// Appends a value to an array.
///
/// Like every prelude function, it checks its own argument count and fails
/// with `ArityMismatch` when called directly with the wrong number.
///
/// Arrays are values, so when the array argument was written as a bare
/// variable the grown array is stored back into that variable.
///
/// # Returns
/// The grown array.
pub fn push(args: &[Value], names: &[Option<String>], context: &mut Context) -> EvalResult<Value> {
    check_arity("push", args, 2, 0)?;
    let Value::Array(elements) = &args[0] else {
        return Err(type_error("push", "an array", &args[0]));
    };

    let mut elements = elements.clone();
    elements.push(args[1].clone());
    let grown = Value::Array(elements);

    if let Some(Some(name)) = names.first() {
        context.set_variable(name, grown.clone(), 0)?;
    }

    Ok(grown)
}

/// Removes the last element of an array and returns it.
///
/// Like [`push`], writes the shrunk array back to a bare variable argument.
///
/// # Errors
/// `IndexOutOfBounds` if the array is empty.
pub fn pop(args: &[Value], names: &[Option<String>], context: &mut Context) -> EvalResult<Value> {
    check_arity("pop", args, 1, 0)?;
    let Value::Array(elements) = &args[0] else {
        return Err(type_error("pop", "an array", &args[0]));
    };

    let mut elements = elements.clone();
    let Some(last) = elements.pop() else {
        return Err(RuntimeError::IndexOutOfBounds { index: 0.0,
                                                    len:   0,
                                                    line:  0, });
    };

    if let Some(Some(name)) = names.first() {
        context.set_variable(name, Value::Array(elements), 0)?;
    }

    Ok(last)
}

/// Returns the keys of a map, or the data member names of an object, as a
/// sorted array of strings.
pub fn keys(args: &[Value], _names: &[Option<String>], _context: &mut Context) -> EvalResult<Value> {
    check_arity("keys", args, 1, 0)?;
    let keys: Vec<Value> = match &args[0] {
        Value::Map(m) => m.keys().map(|key| Value::from(key.as_str())).collect(),
        Value::Object(o) => o.borrow().field_names().into_iter().map(Value::from).collect(),
        other => return Err(type_error("keys", "a map or object", other)),
    };

    Ok(Value::Array(keys))
}

/// Tests membership.
///
/// - Array: some element equals the item (same tag, `==` semantics).
/// - Map or object: the item is a string key or member name.
/// - String: the item is a substring.
///
/// # Example
/// ```
/// use tessel::interpreter::{
///     evaluator::{core::Context, function::builtin::contains},
///     value::core::Value,
/// };
///
/// let mut context = Context::bare();
/// let array = Value::Array(vec![Value::Number(1.0), Value::from("two")]);
///
/// let found = contains(&[array.clone(), Value::from("two")], &[None, None], &mut context).unwrap();
/// assert_eq!(found, Value::Boolean(true));
///
/// let found = contains(&[array, Value::Number(2.0)], &[None, None], &mut context).unwrap();
/// assert_eq!(found, Value::Boolean(false));
/// ```
pub fn contains(args: &[Value], _names: &[Option<String>], _context: &mut Context) -> EvalResult<Value> {
    check_arity("contains", args, 2, 0)?;
    let item = &args[1];

    let found = match (&args[0], item) {
        (Value::Array(a), _) => a.iter().any(|element| element.same_tag(item) && element == item),
        (Value::Map(m), Value::String(key)) => m.contains_key(key),
        (Value::Object(o), Value::String(key)) => o.borrow().members.contains_key(key),
        (Value::String(s), Value::String(needle)) => s.contains(needle.as_str()),
        (Value::Map(_) | Value::Object(_) | Value::String(_), other) => {
            return Err(type_error("contains", "a string item", other));
        },
        (other, _) => return Err(type_error("contains", "an array, map, object or string", other)),
    };

    Ok(Value::Boolean(found))
}

/// Formats any value the way `print` would.
pub fn to_string(args: &[Value], _names: &[Option<String>], _context: &mut Context) -> EvalResult<Value> {
    check_arity("to_string", args, 1, 0)?;
    Ok(Value::String(args[0].to_string()))
}

/// Fails with `AssertionFailed` unless the argument is `true`.
///
/// # Errors
/// - `AssertionFailed` for `false`.
/// - `TypeMismatch` for anything but a boolean.
pub fn assert_fn(args: &[Value], _names: &[Option<String>], _context: &mut Context) -> EvalResult<Value> {
    check_arity("assert", args, 1, 0)?;
    if !args[0].as_bool("assert", 0)? {
        return Err(RuntimeError::AssertionFailed { line: 0 });
    }

    Ok(Value::Void)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::value::types::DeclaredType;

    #[test]
    fn prelude_names_match_the_table() {
        let context = Context::new();
        for name in BUILTIN_FUNCTIONS {
            assert!(context.natives.contains_key(*name), "{name} missing");
        }
        assert_eq!(context.natives.len(), BUILTIN_FUNCTIONS.len());
    }

    #[test]
    fn push_writes_back_to_the_named_variable() {
        let mut context = Context::bare();
        context.declare_variable("xs", DeclaredType::Array, 1).unwrap();

        let names = [Some("xs".to_string()), None];
        push(&[Value::Array(vec![]), Value::Number(1.0)], &names, &mut context).unwrap();

        assert_eq!(context.get_variable("xs", 1).unwrap(),
                   Value::Array(vec![Value::Number(1.0)]));
    }

    #[test]
    fn pop_on_empty_array_fails() {
        let mut context = Context::bare();
        let err = pop(&[Value::Array(vec![])], &[None], &mut context).unwrap_err();
        assert!(matches!(err, RuntimeError::IndexOutOfBounds { len: 0, .. }));
    }

    #[test]
    fn direct_calls_with_missing_arguments_fail() {
        let mut context = Context::bare();
        let array = Value::Array(vec![]);

        let err = push(&[array], &[None], &mut context).unwrap_err();
        assert!(matches!(err, RuntimeError::ArityMismatch { expected: 2, found: 1, .. }));

        let err = contains(&[], &[], &mut context).unwrap_err();
        assert!(matches!(err, RuntimeError::ArityMismatch { expected: 2, found: 0, .. }));

        for func in [len, pop, keys, to_string, assert_fn] {
            let err = func(&[], &[], &mut context).unwrap_err();
            assert!(matches!(err, RuntimeError::ArityMismatch { expected: 1, found: 0, .. }));
        }
    }

    #[test]
    fn wrapped_natives_check_arity() {
        let mut context = Context::new();
        let native = Rc::clone(&context.natives["len"]);
        let err = native(&[], &[], &mut context).unwrap_err();
        assert!(matches!(err, RuntimeError::ArityMismatch { expected: 1, found: 0, .. }));
    }
}
