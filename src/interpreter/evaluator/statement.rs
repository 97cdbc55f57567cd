use crate::{
    ast::{AssignTarget, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::{expect_index, expect_key},
        },
        value::{core::Value, object::store_field, types::DeclaredType},
    },
};

impl Context {
    /// Executes a typed declaration.
    ///
    /// The slot is declared first, so the initializer cannot see an outer
    /// variable of the same name through it. The initializer is then evaluated
    /// and stored into the new slot.
    ///
    /// # Returns
    /// The variable's value after initialization.
    pub fn exec_declaration(&mut self,
                            name: &str,
                            ty: &DeclaredType,
                            initializer: Option<&Expr>,
                            line: usize)
                            -> EvalResult<Value> {
        self.declare_variable(name, ty.clone(), line)?;

        match initializer {
            Some(initializer) => {
                let value = self.eval(initializer)?;
                self.initialize_local(name, value.clone(), line)?;
                Ok(value)
            },
            None => self.local_value(name, line),
        }
    }

    /// Executes an assignment and returns the assigned value.
    ///
    /// - `x = v` writes through [`Context::set_variable`].
    /// - `x[i] = v` reads the container held by `x`, evaluates the index and
    ///   then the value, updates a copy and writes the whole container back.
    /// - `o.f = v` stores into a data member of an object, or into a key of
    ///   the map held by the variable `o`.
    pub fn exec_assignment(&mut self,
                           target: &AssignTarget,
                           value: &Expr,
                           line: usize)
                           -> EvalResult<Value> {
        match target {
            AssignTarget::Variable(name) => {
                let value = self.eval(value)?;
                self.set_variable(name, value.clone(), line)?;
                Ok(value)
            },
            AssignTarget::Index { name, index } => self.assign_index(name, index, value, line),
            AssignTarget::Member { object, member } => {
                self.assign_member(object, member, value, line)
            },
        }
    }

    fn assign_index(&mut self,
                    name: &str,
                    index: &Expr,
                    value: &Expr,
                    line: usize)
                    -> EvalResult<Value> {
        let mut container = self.get_variable(name, line)?;
        let index = self.eval(index)?;
        let value = self.eval(value)?;

        match &mut container {
            Value::Array(elements) => {
                let position = expect_index(&index, elements.len(), line)?;
                elements[position] = value.clone();
            },
            Value::Map(entries) => {
                let key = expect_key(&index, "map", line)?;
                entries.insert(key.to_string(), value.clone());
            },
            // Objects are shared, so there is nothing to write back.
            Value::Object(object) => {
                let key = expect_key(&index, "object", line)?;
                if store_field(object, key, value.clone(), line)?.is_some() {
                    return Err(RuntimeError::UndefinedMember { name: key.to_string(),
                                                               line });
                }
                return Ok(value);
            },
            other => {
                return Err(RuntimeError::TypeMismatch { details: format!("cannot index into {}",
                                                                         other.type_name()),
                                                        line });
            },
        }

        self.set_variable(name, container, line)?;
        Ok(value)
    }

    fn assign_member(&mut self,
                     object: &Expr,
                     member: &str,
                     value: &Expr,
                     line: usize)
                     -> EvalResult<Value> {
        match self.eval(object)? {
            Value::Object(target) => {
                let value = self.eval(value)?;
                if store_field(&target, member, value.clone(), line)?.is_some() {
                    return Err(RuntimeError::UndefinedMember { name: member.to_string(),
                                                               line });
                }
                Ok(value)
            },
            Value::Map(mut entries) => {
                let Expr::Variable { name, .. } = object else {
                    return Err(RuntimeError::TypeMismatch { details: "only a map held by a variable can be assigned to"
                                                                          .to_string(),
                                                            line });
                };

                let value = self.eval(value)?;
                entries.insert(member.to_string(), value.clone());
                self.set_variable(name, Value::Map(entries), line)?;
                Ok(value)
            },
            other => Err(RuntimeError::TypeMismatch { details: format!("cannot assign member '{member}' of {}",
                                                                       other.type_name()),
                                                      line }),
        }
    }
}
