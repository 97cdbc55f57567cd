use std::collections::HashMap;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{
            core::Value,
            object::{ObjectRef, store_field},
            types::{DeclaredType, Slot},
        },
    },
};

impl Context {
    /// Pushes an empty scope onto the scope stack.
    pub fn push_scope(&mut self) {
        self.scope_stack.push(HashMap::new());
    }

    /// Pops the innermost scope, destroying its slots.
    ///
    /// # Errors
    /// Returns `RuntimeError::InternalError` when only the global table is
    /// left.
    pub fn pop_scope(&mut self) -> EvalResult<()> {
        if self.scope_stack.len() <= 1 {
            return Err(RuntimeError::InternalError { details: "cannot pop the global scope".to_string(),
                                                     line:    0, });
        }

        self.scope_stack.pop();
        Ok(())
    }

    /// Returns the number of scopes on the stack, the global table included.
    #[must_use]
    pub fn scope_depth(&self) -> usize {
        self.scope_stack.len()
    }

    /// Returns the object whose method or constructor is running, if any.
    #[must_use]
    pub const fn receiver(&self) -> Option<&ObjectRef> {
        self.receiver.as_ref()
    }

    /// Declares `name` in the innermost scope with the zero value of `ty`.
    ///
    /// Shadowing a variable of an outer scope is allowed.
    ///
    /// # Errors
    /// - `DuplicateDeclaration` if the innermost scope already has `name`.
    /// - `TypeMismatch` if `ty` is `void`.
    ///
    /// # Example
    /// ```
    /// use tessel::{
    ///     error::RuntimeError,
    ///     interpreter::{evaluator::core::Context, value::{core::Value, types::DeclaredType}},
    /// };
    ///
    /// let mut context = Context::bare();
    /// context.declare_variable("n", DeclaredType::Int, 1).unwrap();
    /// assert_eq!(context.get_variable("n", 1).unwrap(), Value::Number(0.0));
    ///
    /// let err = context.declare_variable("n", DeclaredType::Float, 2).unwrap_err();
    /// assert!(matches!(err, RuntimeError::DuplicateDeclaration { line: 2, .. }));
    /// ```
    pub fn declare_variable(&mut self, name: &str, ty: DeclaredType, line: usize) -> EvalResult<()> {
        let slot = Slot::new(ty, name, line)?;
        let scope = self.innermost_scope(line)?;

        if scope.contains_key(name) {
            return Err(RuntimeError::DuplicateDeclaration { name: name.to_string(),
                                                            line });
        }

        scope.insert(name.to_string(), slot);
        Ok(())
    }

    /// Stores `value` into a slot of the innermost scope, bypassing the
    /// receiver overlay.
    ///
    /// Used to bind parameters and declaration initializers to the slot that
    /// was just declared.
    pub(crate) fn initialize_local(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        match self.innermost_scope(line)?.get_mut(name) {
            Some(slot) => slot.store(value, name, line),
            None => Err(RuntimeError::UndefinedVariable { name: name.to_string(),
                                                          line }),
        }
    }

    /// Reads a slot of the innermost scope, bypassing the receiver overlay.
    pub(crate) fn local_value(&mut self, name: &str, line: usize) -> EvalResult<Value> {
        self.innermost_scope(line)?
            .get(name)
            .map(|slot| slot.value.clone())
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                             line })
    }

    /// Reads a variable.
    ///
    /// Lookup order: members of the current receiver, then the scopes of the
    /// current frame from the innermost outwards, then the global table.
    ///
    /// # Errors
    /// Returns `RuntimeError::UndefinedVariable` if no slot has that name.
    pub fn get_variable(&self, name: &str, line: usize) -> EvalResult<Value> {
        if let Some(receiver) = &self.receiver
           && let Some(value) = receiver.borrow().get(name)
        {
            return Ok(value);
        }

        self.resolve_scope(name)
            .and_then(|index| self.scope_stack[index].get(name))
            .map(|slot| slot.value.clone())
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                             line })
    }

    /// Writes an existing variable, type checked against its declared type.
    ///
    /// Uses the same lookup order as [`Context::get_variable`] and never
    /// declares a variable implicitly.
    ///
    /// # Errors
    /// - `UndefinedVariable` if no slot has that name.
    /// - `TypeMismatch` if the slot's declared type rejects the value.
    ///
    /// # Example
    /// ```
    /// use tessel::{
    ///     error::RuntimeError,
    ///     interpreter::{evaluator::core::Context, value::{core::Value, types::DeclaredType}},
    /// };
    ///
    /// let mut context = Context::bare();
    /// context.declare_variable("n", DeclaredType::Int, 1).unwrap();
    ///
    /// context.set_variable("n", Value::Number(3.0), 2).unwrap();
    /// assert_eq!(context.get_variable("n", 3).unwrap(), Value::Number(3.0));
    ///
    /// let err = context.set_variable("n", Value::Number(3.5), 4).unwrap_err();
    /// assert!(matches!(err, RuntimeError::TypeMismatch { line: 4, .. }));
    ///
    /// let err = context.set_variable("m", Value::Number(1.0), 5).unwrap_err();
    /// assert!(matches!(err, RuntimeError::UndefinedVariable { line: 5, .. }));
    /// ```
    pub fn set_variable(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        let value = match self.receiver.clone() {
            Some(receiver) => match store_field(&receiver, name, value, line)? {
                Some(value) => value,
                None => return Ok(()),
            },
            None => value,
        };

        self.set_scoped_variable(name, value, line)
    }

    fn set_scoped_variable(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        let slot = self.resolve_scope(name)
                       .and_then(|index| self.scope_stack[index].get_mut(name));

        match slot {
            Some(slot) => slot.store(value, name, line),
            None => Err(RuntimeError::UndefinedVariable { name: name.to_string(),
                                                          line }),
        }
    }

    /// Finds the index of the scope holding `name`, honoring frame isolation.
    fn resolve_scope(&self, name: &str) -> Option<usize> {
        let base = self.frame_base;

        if let Some(index) = (base..self.scope_stack.len()).rev()
                                                           .find(|&index| {
                                                               self.scope_stack[index].contains_key(name)
                                                           })
        {
            return Some(index);
        }

        (base > 0 && self.scope_stack[0].contains_key(name)).then_some(0)
    }

    fn innermost_scope(&mut self, line: usize) -> EvalResult<&mut HashMap<String, Slot>> {
        self.scope_stack
            .last_mut()
            .ok_or_else(|| RuntimeError::InternalError { details: "scope stack is empty".to_string(),
                                                         line })
    }

    /// Runs `body` inside a fresh block scope.
    ///
    /// The scope is removed on every exit path, including errors.
    pub(crate) fn in_scope<T>(&mut self,
                              body: impl FnOnce(&mut Self) -> EvalResult<T>)
                              -> EvalResult<T> {
        let depth = self.scope_stack.len();
        self.push_scope();

        let result = body(self);

        self.scope_stack.truncate(depth + 1);
        self.pop_scope()?;
        result
    }

    /// Runs `body` inside a new call frame.
    ///
    /// Inside the frame only the frame's own scopes and the global table are
    /// visible, and `receiver` is the current receiver. The previous frame and
    /// receiver are restored on every exit path, including errors.
    pub(crate) fn in_frame<T>(&mut self,
                              receiver: Option<ObjectRef>,
                              body: impl FnOnce(&mut Self) -> EvalResult<T>)
                              -> EvalResult<T> {
        let depth = self.scope_stack.len();
        let saved_base = std::mem::replace(&mut self.frame_base, depth);
        let saved_receiver = std::mem::replace(&mut self.receiver, receiver);
        self.push_scope();

        let result = body(self);

        self.scope_stack.truncate(depth);
        self.frame_base = saved_base;
        self.receiver = saved_receiver;
        result
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn popping_globals_fails() {
        let mut context = Context::bare();
        let err = context.pop_scope().unwrap_err();
        assert!(matches!(err, RuntimeError::InternalError { .. }));
        assert_eq!(context.scope_depth(), 1);
    }

    #[test]
    fn inner_scope_shadows_outer() {
        let mut context = Context::bare();
        context.declare_variable("x", DeclaredType::Int, 1).unwrap();
        context.set_variable("x", Value::Number(1.0), 1).unwrap();

        context.in_scope(|ctx| {
                   ctx.declare_variable("x", DeclaredType::String, 2)?;
                   ctx.set_variable("x", Value::from("inner"), 2)?;
                   assert_eq!(ctx.get_variable("x", 2)?, Value::from("inner"));
                   Ok(())
               })
               .unwrap();

        assert_eq!(context.get_variable("x", 3).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn frames_hide_caller_locals_but_not_globals() {
        let mut context = Context::bare();
        context.declare_variable("global", DeclaredType::Int, 1).unwrap();

        context.in_scope(|ctx| {
                   ctx.declare_variable("local", DeclaredType::Int, 2)?;
                   ctx.in_frame(None, |callee| {
                          assert!(callee.get_variable("global", 3).is_ok());
                          let err = callee.get_variable("local", 3).unwrap_err();
                          assert!(matches!(err, RuntimeError::UndefinedVariable { .. }));
                          Ok(())
                      })
               })
               .unwrap();
    }

    #[test]
    fn scopes_are_dropped_after_errors() {
        let mut context = Context::bare();

        let result: EvalResult<()> = context.in_frame(None, |ctx| {
                                                ctx.push_scope();
                                                ctx.push_scope();
                                                Err(RuntimeError::DivisionByZero { line: 1 })
                                            });

        assert!(result.is_err());
        assert_eq!(context.scope_depth(), 1);
        assert_eq!(context.frame_base, 0);
    }
}
