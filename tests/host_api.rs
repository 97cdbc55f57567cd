use std::{cell::RefCell, rc::Rc};

use pretty_assertions::assert_eq;
use tessel::{
    error::RuntimeError,
    interpreter::{evaluator::core::Context, value::core::Value},
    parse_source,
};

fn run(context: &mut Context, source: &str) -> Result<Option<Value>, RuntimeError> {
    let program = parse_source(source).expect("source parses");
    context.eval_program(&program)
}

#[test]
fn native_callbacks_are_callable_from_scripts() {
    let mut context = Context::new();
    context.register_function("square", |args, _, _| {
               let n = args[0].as_number("square", 0)?;
               Ok(Value::Number(n * n))
           })
           .unwrap();

    assert_eq!(run(&mut context, "square(3) + 1;").unwrap(), Some(Value::Number(10.0)));
}

#[test]
fn native_callbacks_can_write_back_bare_variables() {
    let mut context = Context::new();
    context.register_function("reset", |_, names, ctx| {
               if let Some(Some(name)) = names.first() {
                   ctx.set_variable(name, Value::Number(0.0), 0)?;
               }
               Ok(Value::Void)
           })
           .unwrap();

    let result = run(&mut context, "int n = 5; reset(n); reset(n + 1); n;").unwrap();
    assert_eq!(result, Some(Value::Number(0.0)));
}

#[test]
fn native_callbacks_capture_host_state() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut context = Context::bare();
    context.register_function("emit", move |args, _, _| {
               sink.borrow_mut().extend(args.iter().cloned());
               Ok(Value::Void)
           })
           .unwrap();

    run(&mut context, "emit(1, \"two\"); emit(true);").unwrap();
    assert_eq!(*seen.borrow(),
               vec![Value::Number(1.0), Value::from("two"), Value::Boolean(true)]);
}

#[test]
fn duplicate_registration_fails() {
    let mut context = Context::new();
    let err = context.register_function("print", |_, _, _| Ok(Value::Void))
                     .unwrap_err();
    assert!(matches!(err, RuntimeError::DuplicateDefinition { .. }));

    run(&mut context, "func int f() { return 1; }").unwrap();
    let err = context.register_function("f", |_, _, _| Ok(Value::Void))
                     .unwrap_err();
    assert!(matches!(err, RuntimeError::DuplicateDefinition { .. }));
}

#[test]
fn host_can_call_script_functions() {
    let mut context = Context::new();
    run(&mut context, "func string greet(string who) { return \"hi \" + who; }").unwrap();

    let greeting = context.evaluate_function("greet", vec![Value::from("ada")]).unwrap();
    assert_eq!(greeting, Value::from("hi ada"));

    let err = context.evaluate_function("greet", vec![]).unwrap_err();
    assert!(matches!(err, RuntimeError::ArityMismatch { expected: 1, found: 0, .. }));

    let err = context.evaluate_function("missing", vec![]).unwrap_err();
    assert!(matches!(err, RuntimeError::UndefinedFunction { .. }));
}

#[test]
fn bare_context_has_no_prelude() {
    let mut context = Context::bare();
    let err = run(&mut context, "print(1);").unwrap_err();
    assert!(matches!(err, RuntimeError::UndefinedFunction { .. }));
}

#[test]
fn definitions_and_globals_persist_between_programs() {
    let mut context = Context::new();
    run(&mut context, "int total = 1; func void add(int n) { total = total + n; }").unwrap();
    run(&mut context, "add(4);").unwrap();

    assert_eq!(context.get_variable("total", 0).unwrap(), Value::Number(5.0));
    assert_eq!(context.scope_depth(), 1);
}

#[test]
fn environment_is_restored_after_errors() {
    let mut context = Context::new();
    run(&mut context, "func int boom(int n) { { int local = n; return local / 0; } }").unwrap();

    let err = run(&mut context, "boom(1);").unwrap_err();
    assert_eq!(err, RuntimeError::DivisionByZero { line: 1 });
    assert_eq!(context.scope_depth(), 1);
    assert!(context.receiver().is_none());
}
