use std::rc::Rc;

use tracing::{debug, trace};

use crate::{
    ast::{CallArgument, FunctionDef},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Flow},
            utils::check_arity,
        },
        value::{
            core::Value,
            object::{Member, ObjectRef},
            types::DeclaredType,
        },
    },
};

impl Context {
    /// Registers a host callback under `name`.
    ///
    /// The callback receives the evaluated arguments, the variable name of
    /// every argument written as a bare variable, and the context. It is
    /// responsible for its own arity checks.
    ///
    /// # Errors
    /// Returns `RuntimeError::DuplicateDefinition` if a native or user
    /// function of that name already exists.
    ///
    /// # Example
    /// ```
    /// use tessel::{
    ///     error::RuntimeError,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let mut context = Context::bare();
    /// context.register_function("answer", |_, _, _| Ok(Value::Number(42.0))).unwrap();
    ///
    /// assert_eq!(context.evaluate_function("answer", vec![]).unwrap(), Value::Number(42.0));
    ///
    /// let err = context.register_function("answer", |_, _, _| Ok(Value::Void)).unwrap_err();
    /// assert!(matches!(err, RuntimeError::DuplicateDefinition { .. }));
    /// ```
    pub fn register_function<F>(&mut self, name: &str, callback: F) -> EvalResult<()>
        where F: Fn(&[Value], &[Option<String>], &mut Self) -> EvalResult<Value> + 'static
    {
        self.ensure_function_name_free(name, 0)?;
        self.natives.insert(name.to_string(), Rc::new(callback));
        Ok(())
    }

    /// Registers a user-defined function under its own name.
    ///
    /// # Errors
    /// Returns `RuntimeError::DuplicateDefinition` if a native or user
    /// function of that name already exists.
    pub fn register_user_function(&mut self, def: Rc<FunctionDef>) -> EvalResult<()> {
        self.ensure_function_name_free(&def.name, def.line)?;

        debug!(function = %def.name, params = def.params.len(), "registering function");
        self.functions.insert(def.name.clone(), def);
        Ok(())
    }

    fn ensure_function_name_free(&self, name: &str, line: usize) -> EvalResult<()> {
        if self.natives.contains_key(name) || self.functions.contains_key(name) {
            return Err(RuntimeError::DuplicateDefinition { name: name.to_string(),
                                                           line });
        }
        Ok(())
    }

    /// Calls a native or user function from the host.
    ///
    /// No argument is treated as a bare variable, so natives like `push` do
    /// not write anything back.
    pub fn evaluate_function(&mut self, name: &str, args: Vec<Value>) -> EvalResult<Value> {
        let names = vec![None; args.len()];
        self.dispatch_function(name, args, &names, 0)
    }

    /// Resolves `name` and calls it.
    ///
    /// Natives are looked up first, then user functions. Errors raised by a
    /// native are attributed to `line`.
    ///
    /// # Errors
    /// `UndefinedFunction` if neither registry has `name`.
    pub(crate) fn dispatch_function(&mut self,
                                    name: &str,
                                    args: Vec<Value>,
                                    arg_names: &[Option<String>],
                                    line: usize)
                                    -> EvalResult<Value> {
        if let Some(native) = self.natives.get(name).cloned() {
            trace!(function = name, line, "calling native");
            return native(&args, arg_names, self).map_err(|e| e.at_line(line));
        }

        let def = self.functions
                      .get(name)
                      .cloned()
                      .ok_or_else(|| RuntimeError::UndefinedFunction { name: name.to_string(),
                                                                       line })?;

        self.call_user_function(&def, args, None, line)
    }

    /// Evaluates a call written as `name(args)`.
    ///
    /// Arguments are evaluated left to right in the caller's environment.
    /// Inside a method or constructor, a method of the receiver with that
    /// name takes precedence and is called on the same receiver.
    pub fn eval_function_call(&mut self,
                              name: &str,
                              arguments: &[CallArgument],
                              line: usize)
                              -> EvalResult<Value> {
        let mut args = Vec::with_capacity(arguments.len());
        let mut names = Vec::with_capacity(arguments.len());

        for argument in arguments {
            args.push(self.eval(&argument.expr)?);
            names.push(argument.source_name.clone());
        }

        if let Some((def, receiver)) = self.receiver_method(name) {
            return self.call_user_function(&def, args, Some(receiver), line);
        }

        self.dispatch_function(name, args, &names, line)
    }

    fn receiver_method(&self, name: &str) -> Option<(Rc<FunctionDef>, ObjectRef)> {
        let receiver = self.receiver.as_ref()?;
        let def = match receiver.borrow().members.get(name)? {
            Member::Method(def) => Rc::clone(def),
            Member::Field(_) => return None,
        };

        Some((def, Rc::clone(receiver)))
    }

    /// Runs a user function, method or constructor.
    ///
    /// The call gets its own frame: parameters are declared there and bound
    /// in order, type checked against their declared types, and the body runs
    /// with `receiver` as the current receiver. The frame is dropped and the
    /// caller's receiver restored on every exit path.
    ///
    /// # Returns
    /// The value of an explicit `return`, or else the value of the body's
    /// last statement. Functions declared `void` always yield `Void`; any
    /// other result is checked against the declared return type.
    ///
    /// # Errors
    /// - `ArityMismatch` if the argument count differs from the parameters.
    /// - `TypeMismatch` if an argument or the result has the wrong type, or a
    ///   `void` function returns a value.
    pub(crate) fn call_user_function(&mut self,
                                     def: &Rc<FunctionDef>,
                                     args: Vec<Value>,
                                     receiver: Option<ObjectRef>,
                                     line: usize)
                                     -> EvalResult<Value> {
        check_arity(&def.name, &args, def.params.len(), line)?;

        debug!(function = %def.name, line, method = receiver.is_some(), "calling");

        let flow = self.in_frame(receiver, |ctx| {
                           for (param, arg) in def.params.iter().zip(args) {
                               ctx.declare_variable(&param.name, param.ty.clone(), line)?;
                               ctx.initialize_local(&param.name, arg, line)?;
                           }

                           ctx.exec_sequence(&def.body)
                       })?;

        match (&def.return_type, flow) {
            (DeclaredType::Void, Flow::Return(value)) if !value.is_void() => {
                Err(RuntimeError::TypeMismatch { details: format!("void function '{}' cannot return a value",
                                                                  def.name),
                                                 line })
            },
            (DeclaredType::Void, _) => Ok(Value::Void),
            (ty, flow) => {
                let value = flow.into_value();
                if ty.accepts(&value) {
                    Ok(value)
                } else {
                    Err(RuntimeError::TypeMismatch { details: format!("'{}' must return {ty}, found {}",
                                                                      def.name,
                                                                      value.type_name()),
                                                     line })
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ast::Parameter, parse_source};

    fn run(context: &mut Context, source: &str) -> EvalResult<Option<Value>> {
        let program = parse_source(source).expect("source should parse");
        context.eval_program(&program)
    }

    #[test]
    fn host_registered_user_function_is_callable() {
        let mut context = Context::bare();
        let def = FunctionDef { name:        "id".to_string(),
                                return_type: DeclaredType::Float,
                                params:      vec![Parameter { name: "x".to_string(),
                                                              ty:   DeclaredType::Float, }],
                                body:        parse_source("x;").unwrap().statements,
                                line:        1, };

        context.register_user_function(Rc::new(def)).unwrap();
        assert_eq!(context.evaluate_function("id", vec![Value::Number(2.5)]).unwrap(),
                   Value::Number(2.5));
    }

    #[test]
    fn user_function_cannot_shadow_native() {
        let mut context = Context::new();
        let err = run(&mut context, "func void print(int x) { }").unwrap_err();
        assert!(matches!(err, RuntimeError::DuplicateDefinition { .. }));
    }

    #[test]
    fn parameter_types_are_checked() {
        let mut context = Context::bare();
        run(&mut context, "func int half(int x) { return x / 2; }").unwrap();

        let err = context.evaluate_function("half", vec![Value::Number(1.5)]).unwrap_err();
        assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
        assert_eq!(context.scope_depth(), 1);
    }

    #[test]
    fn return_type_is_checked() {
        let mut context = Context::bare();
        run(&mut context, "func int half(int x) { return x / 2; }").unwrap();

        assert_eq!(context.evaluate_function("half", vec![Value::Number(4.0)]).unwrap(),
                   Value::Number(2.0));

        let err = context.evaluate_function("half", vec![Value::Number(3.0)]).unwrap_err();
        assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
    }

    #[test]
    fn void_function_cannot_return_a_value() {
        let mut context = Context::bare();
        let err = run(&mut context, "func void f() { return 1; } f();").unwrap_err();
        assert!(matches!(err, RuntimeError::TypeMismatch { line: 1, .. }));
    }

    #[test]
    fn native_errors_carry_the_call_line() {
        let mut context = Context::new();
        let err = run(&mut context, "int x = 1;\n\nassert(x == 2);").unwrap_err();
        assert_eq!(err, RuntimeError::AssertionFailed { line: 3 });
    }
}
