use std::{cell::RefCell, rc::Rc};

use tracing::debug;

use crate::{
    ast::{ClassDef, ClassMember, Expr, FunctionDef},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::check_arity,
        },
        value::{
            core::Value,
            object::{Member, Object, ObjectRef, store_field},
            types::Slot,
        },
    },
};

impl Context {
    /// Registers a class definition under its name.
    ///
    /// # Errors
    /// Returns `RuntimeError::DuplicateDefinition` if a class of that name
    /// already exists.
    pub fn register_class(&mut self, def: Rc<ClassDef>) -> EvalResult<()> {
        if self.classes.contains_key(&def.name) {
            return Err(RuntimeError::DuplicateDefinition { name: def.name.clone(),
                                                           line: def.line, });
        }

        debug!(class = %def.name, "registering class");
        self.classes.insert(def.name.clone(), def);
        Ok(())
    }

    /// Creates an instance of a registered class.
    ///
    /// Methods are attached first, then data members are created in
    /// declaration order; their initializers run in a frame whose receiver is
    /// the new object, so they may read members declared before them. If the
    /// class has a constructor, its arguments are evaluated in the caller's
    /// environment and it runs with the new object as receiver.
    ///
    /// # Errors
    /// - `UndefinedClass` if no class of that name is registered.
    /// - `DuplicateDeclaration` if the class declares a member name twice.
    /// - `ArityMismatch` if the arguments do not match the constructor, or
    ///   arguments are given to a class without one.
    ///
    /// # Example
    /// ```
    /// use tessel::{get_result, interpreter::value::core::Value};
    ///
    /// let source = "class Point {
    ///                   int x = 1;
    ///                   int y;
    ///                   Point(int y0) { y = y0; }
    ///               }
    ///               Point p = new Point(5);
    ///               p.x + p.y;";
    ///
    /// assert_eq!(get_result(source, false).unwrap(), Some(Value::Number(6.0)));
    /// ```
    pub fn instantiate_object(&mut self,
                              class: &str,
                              arguments: &[Expr],
                              line: usize)
                              -> EvalResult<Value> {
        let def = self.classes
                      .get(class)
                      .cloned()
                      .ok_or_else(|| RuntimeError::UndefinedClass { name: class.to_string(),
                                                                    line })?;

        debug!(class, line, "instantiating object");

        let object: ObjectRef = Rc::new(RefCell::new(Object::new(&def.name)));
        self.in_frame(Some(Rc::clone(&object)), |ctx| ctx.build_members(&def, &object))?;

        match &def.constructor {
            Some(constructor) => {
                let args = arguments.iter()
                                    .map(|argument| self.eval(argument))
                                    .collect::<EvalResult<Vec<_>>>()?;
                self.call_user_function(constructor, args, Some(Rc::clone(&object)), line)?;
            },
            None => check_arity(class, arguments, 0, line)?,
        }

        Ok(Value::Object(object))
    }

    fn build_members(&mut self, def: &ClassDef, object: &ObjectRef) -> EvalResult<()> {
        for member in &def.members {
            if let ClassMember::Method(method) = member {
                attach(object, &method.name, Member::Method(Rc::clone(method)), method.line)?;
            }
        }

        for member in &def.members {
            let ClassMember::Field(field) = member else {
                continue;
            };

            let slot = Slot::new(field.ty.clone(), &field.name, field.line)?;
            attach(object, &field.name, Member::Field(slot), field.line)?;

            if let Some(initializer) = &field.initializer {
                let value = self.eval(initializer)?;
                store_field(object, &field.name, value, field.line)?;
            }
        }

        Ok(())
    }

    /// Locates `method` on `receiver`.
    ///
    /// Methods of an object are returned together with the object, which
    /// becomes the receiver of the call. A function stored in a map is
    /// returned without a receiver.
    ///
    /// # Errors
    /// - `UndefinedMember` if there is no such member.
    /// - `NotCallable` if the member is not a function.
    /// - `TypeMismatch` if `receiver` is neither an object nor a map.
    pub(crate) fn resolve_method(receiver: &Value,
                                 method: &str,
                                 line: usize)
                                 -> EvalResult<(Rc<FunctionDef>, Option<ObjectRef>)> {
        let undefined = || RuntimeError::UndefinedMember { name: method.to_string(),
                                                           line };
        let not_callable = || RuntimeError::NotCallable { name: method.to_string(),
                                                          line };

        match receiver {
            Value::Object(object) => match object.borrow().members.get(method) {
                Some(Member::Method(def)) => Ok((Rc::clone(def), Some(Rc::clone(object)))),
                Some(Member::Field(slot)) => match &slot.value {
                    Value::Function(def) => Ok((Rc::clone(def), None)),
                    _ => Err(not_callable()),
                },
                None => Err(undefined()),
            },
            Value::Map(entries) => match entries.get(method) {
                Some(Value::Function(def)) => Ok((Rc::clone(def), None)),
                Some(_) => Err(not_callable()),
                None => Err(undefined()),
            },
            other => Err(RuntimeError::TypeMismatch { details: format!("cannot call method '{method}' on {}",
                                                                       other.type_name()),
                                                      line }),
        }
    }

    /// Calls `method` on an already evaluated receiver.
    ///
    /// The method runs in a new frame with the object as receiver: bare names
    /// in its body resolve to the object's members first, and writes to them
    /// persist on the object after the call.
    ///
    /// # Errors
    /// Everything [`Context::resolve_method`] reports, `ArityMismatch`, and
    /// any error raised by the method body.
    pub fn call_member_function(&mut self,
                                receiver: &Value,
                                method: &str,
                                args: Vec<Value>,
                                line: usize)
                                -> EvalResult<Value> {
        let (def, receiver) = Self::resolve_method(receiver, method, line)?;
        self.call_user_function(&def, args, receiver, line)
    }
}

fn attach(object: &ObjectRef, name: &str, member: Member, line: usize) -> EvalResult<()> {
    let mut object = object.borrow_mut();

    if object.members.contains_key(name) {
        return Err(RuntimeError::DuplicateDeclaration { name: name.to_string(),
                                                        line });
    }

    object.members.insert(name.to_string(), member);
    Ok(())
}
