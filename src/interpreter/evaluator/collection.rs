use std::collections::BTreeMap;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::{expect_index, expect_key},
        },
        value::core::Value,
    },
};

impl Context {
    /// Evaluates the elements of an array literal in order.
    pub fn eval_array_literal(&mut self, elements: &[Expr]) -> EvalResult<Value> {
        elements.iter()
                .map(|element| self.eval(element))
                .collect::<EvalResult<Vec<_>>>()
                .map(Value::Array)
    }

    /// Evaluates the entries of a map literal in order.
    ///
    /// A key that appears twice keeps the value of its last occurrence.
    pub fn eval_map_literal(&mut self, entries: &[(String, Expr)]) -> EvalResult<Value> {
        let mut map = BTreeMap::new();

        for (key, expr) in entries {
            let value = self.eval(expr)?;
            map.insert(key.clone(), value);
        }

        Ok(Value::Map(map))
    }

    /// Evaluates `target[index]`.
    ///
    /// - Arrays take an integral number in `[0, len)`.
    /// - Maps and objects take a string key.
    /// - Strings take a character position and yield a one character string.
    ///
    /// # Errors
    /// - `IndexOutOfBounds` for a position outside the array or string.
    /// - `KeyNotFound` for a missing map key or object member.
    /// - `TypeMismatch` for any other combination of target and index.
    ///
    /// # Example
    /// ```
    /// use tessel::{error::{Error, RuntimeError}, get_result, interpreter::value::core::Value};
    ///
    /// assert_eq!(get_result("array a = [1, 2, 3]; a[1];", false).unwrap(), Some(Value::Number(2.0)));
    /// assert_eq!(get_result("\"tessel\"[2];", false).unwrap(), Some(Value::from("s")));
    ///
    /// let err = get_result("array a = [1, 2, 3]; a[5];", false).unwrap_err();
    /// assert!(matches!(err, Error::Runtime(RuntimeError::IndexOutOfBounds { .. })));
    /// ```
    pub fn eval_index(&mut self, target: &Expr, index: &Expr, line: usize) -> EvalResult<Value> {
        let target = self.eval(target)?;
        let index = self.eval(index)?;

        match &target {
            Value::Array(elements) => Ok(elements[expect_index(&index, elements.len(), line)?].clone()),
            Value::Map(entries) => {
                let key = expect_key(&index, "map", line)?;
                entries.get(key)
                       .cloned()
                       .ok_or_else(|| RuntimeError::KeyNotFound { key: key.to_string(),
                                                                  line })
            },
            Value::Object(object) => {
                let key = expect_key(&index, "object", line)?;
                object.borrow()
                      .get(key)
                      .ok_or_else(|| RuntimeError::KeyNotFound { key: key.to_string(),
                                                                 line })
            },
            Value::String(s) => {
                let len = s.chars().count();
                let position = expect_index(&index, len, line)?;
                Ok(s.chars()
                    .nth(position)
                    .map_or_else(|| Value::String(String::new()), |c| Value::String(c.to_string())))
            },
            other => Err(RuntimeError::TypeMismatch { details: format!("cannot index into {}",
                                                                       other.type_name()),
                                                      line }),
        }
    }

    /// Evaluates `object.member` on an object or a map.
    ///
    /// # Errors
    /// - `UndefinedMember` if there is no such member or key.
    /// - `TypeMismatch` if the value is neither an object nor a map.
    pub fn eval_member_access(&mut self, object: &Expr, member: &str, line: usize) -> EvalResult<Value> {
        let value = self.eval(object)?;

        let found = match &value {
            Value::Object(object) => object.borrow().get(member),
            Value::Map(entries) => entries.get(member).cloned(),
            other => {
                return Err(RuntimeError::TypeMismatch { details: format!("cannot read member '{member}' of {}",
                                                                         other.type_name()),
                                                        line });
            },
        };

        found.ok_or_else(|| RuntimeError::UndefinedMember { name: member.to_string(),
                                                            line })
    }

    /// Evaluates `object.method(args)`.
    ///
    /// The receiver is evaluated and the method located before any argument
    /// is evaluated.
    pub fn eval_member_call(&mut self,
                            object: &Expr,
                            method: &str,
                            arguments: &[Expr],
                            line: usize)
                            -> EvalResult<Value> {
        let receiver = self.eval(object)?;
        let (def, receiver) = Self::resolve_method(&receiver, method, line)?;

        let args = arguments.iter()
                            .map(|argument| self.eval(argument))
                            .collect::<EvalResult<Vec<_>>>()?;

        self.call_user_function(&def, args, receiver, line)
    }
}
