use std::path::Path;

use pretty_assertions::assert_eq;
use tessel::{
    Error,
    error::{ParseError, RuntimeError},
    get_result,
    interpreter::value::core::Value,
    run_file,
};
use walkdir::WalkDir;

#[test]
fn script_examples_work() {
    let mut count = 0;

    for entry in WalkDir::new("scripts").into_iter()
                                        .filter_map(Result::ok)
                                        .filter(|e| e.path().extension().is_some_and(|ext| ext == "tsl"))
    {
        count += 1;
        let path = entry.path();
        if let Err(e) = run_file(path, false) {
            panic!("Script {} failed:\n{e}", path.display());
        }
    }

    assert!(count > 0, "No scripts found in scripts/");
}

fn assert_success(src: &str) {
    if let Err(e) = get_result(src, false) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if get_result(src, false).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

fn runtime_error(src: &str) -> RuntimeError {
    match get_result(src, false) {
        Err(Error::Runtime(e)) => e,
        Err(Error::Parse(e)) => panic!("Script failed to parse: {e}"),
        Ok(_) => panic!("Script succeeded but was expected to fail"),
    }
}

fn parse_error(src: &str) -> ParseError {
    match get_result(src, false) {
        Err(Error::Parse(e)) => e,
        Err(Error::Runtime(e)) => panic!("Script failed at runtime: {e}"),
        Ok(_) => panic!("Script succeeded but was expected to fail"),
    }
}

fn value_of(src: &str) -> Value {
    get_result(src, false).unwrap_or_else(|e| panic!("Script failed: {e}"))
                          .unwrap_or_else(|| panic!("Script produced no value"))
}

#[test]
fn declaration_and_basic_arithmetic() {
    assert_success("int x = 1 + 2; assert(x == 3);");
    assert_success("int x = 7 * 9; assert(x == 63);");
    assert_success("int x = 8 - 5; assert(x == 3);");
    assert_success("float x = 7 / 2; assert(x == 3.5);");
    assert_success("int x = 2 + 3 * 4; assert(x == 14);");
    assert_success("int x = (2 + 3) * 4; assert(x == 20);");
    assert_success("float x = -2.5; assert(-x == 2.5);");
}

#[test]
fn division_by_zero_reports_its_line() {
    let err = runtime_error("int x = 1;\nfloat y = x / 0;");
    assert_eq!(err, RuntimeError::DivisionByZero { line: 2 });
}

#[test]
fn declared_types_are_enforced() {
    assert_success("int x = 6 / 2; assert(x == 3);");
    assert_success("float f = 1; f = 1.5; assert(f == 1.5);");

    assert!(matches!(runtime_error("int x = 1.5;"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_error("int x = 4; x = 4.5;"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_error("string s = 1;"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_error("bool b = 0;"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_error("void v;"), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn zero_values() {
    assert_success("int i; float f; bool b; string s; array a; map m;
                    assert(i == 0);
                    assert(f == 0);
                    assert(b == false);
                    assert(s == \"\");
                    assert(len(a) == 0);
                    assert(len(m) == 0);");
}

#[test]
fn scoping_and_shadowing() {
    assert_success(r#"
        int x = 1;
        {
            string x = "inner";
            x = "changed";
            assert(x == "changed");
        }
        assert(x == 1);
    "#);
    assert_success("int x = 1; if (true) { int x = 2; } assert(x == 1);");
    assert_success("int x = 1; { x = 5; } assert(x == 5);");

    let err = runtime_error("int x = 1; int x = 2;");
    assert!(matches!(err, RuntimeError::DuplicateDeclaration { .. }));

    let err = runtime_error("{ int y = 1; } y = 2;");
    assert!(matches!(err, RuntimeError::UndefinedVariable { .. }));
}

#[test]
fn assignment_never_declares() {
    let err = runtime_error("y = 1;");
    assert_eq!(err,
               RuntimeError::UndefinedVariable { name: "y".to_string(),
                                                 line: 1, });
}

#[test]
fn array_indexing() {
    assert_success("array a = [1, 2, 3]; assert(a[1] == 2);");
    assert_success("array a = [1, 2, 3]; a[0] = 10; assert(a == [10, 2, 3]);");
    assert_success("array a = [[1, 2], [3]]; assert(a[0][1] == 2);");

    let err = runtime_error("array a = [1, 2, 3]; a[5];");
    assert!(matches!(err, RuntimeError::IndexOutOfBounds { len: 3, .. }));
    let err = runtime_error("array a = [1, 2, 3]; a[3] = 1;");
    assert!(matches!(err, RuntimeError::IndexOutOfBounds { .. }));
    let err = runtime_error("array a = [1, 2, 3]; a[-1];");
    assert!(matches!(err, RuntimeError::IndexOutOfBounds { .. }));
    let err = runtime_error("array a = [1, 2, 3]; a[0.5];");
    assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
    let err = runtime_error("array a = [1]; a[\"0\"];");
    assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
}

#[test]
fn arrays_are_values() {
    assert_success("array a = [1]; array b = a; b[0] = 2; assert(a[0] == 1);");
}

#[test]
fn maps() {
    assert_success(r#"map m = {}; m["k"] = 1; assert(m["k"] == 1);"#);
    assert_success(r#"map m = {a: 1, "b c": 2}; assert(m.a == 1); assert(m["b c"] == 2);"#);
    assert_success("map m = {a: 1}; m.b = 2; assert(m.b == 2); assert(len(m) == 2);");
    assert_success("map m = {a: 1}; m.a = 3; assert(m == {a: 3});");

    let err = runtime_error(r#"map m = {}; m["x"];"#);
    assert!(matches!(err, RuntimeError::KeyNotFound { .. }));
    let err = runtime_error("map m = {}; m.x;");
    assert!(matches!(err, RuntimeError::UndefinedMember { .. }));
    let err = runtime_error("map m = {}; m[1] = 2;");
    assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
}

#[test]
fn strings() {
    assert_success(r#"assert("a" + "b" == "ab");"#);
    assert_success(r#"string s = "tessel"; assert(s[0] == "t");"#);
    assert_success(r#"assert(len("héllo") == 5);"#);
    assert_success(r#"assert("a" != "b");"#);

    let err = runtime_error(r#"1 + "b";"#);
    assert!(matches!(err, RuntimeError::UnsupportedOperation { .. }));
    let err = runtime_error(r#""ab" - "b";"#);
    assert!(matches!(err, RuntimeError::UnsupportedOperation { .. }));
    let err = runtime_error(r#""a" < "b";"#);
    assert!(matches!(err, RuntimeError::UnsupportedOperation { .. }));
}

#[test]
fn logic_and_comparisons() {
    assert_success("assert(2 < 3);");
    assert_success("assert(3 > 2);");
    assert_success("assert(2 <= 2);");
    assert_success("assert(3 >= 3);");
    assert_success("assert(2 != 3);");
    assert_success("assert(!false);");
    assert_success("assert((true && false) == false);");
    assert_success("assert(true || false);");
    assert_success("assert(1 < 2 && 2 < 3);");

    let err = runtime_error("1 && 0;");
    assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
    let err = runtime_error("!1;");
    assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
    let err = runtime_error("-true;");
    assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
}

#[test]
fn logical_operators_evaluate_both_sides() {
    assert_success("int calls = 0;
                    func bool touch() { calls = calls + 1; return true; }
                    bool r = false && touch();
                    assert(calls == 1);");
}

#[test]
fn equality_rules() {
    assert_success("assert([1, [2]] == [1, [2]]);");
    assert_success("assert({a: 1} != {a: 2});");
    assert_success("class P { int x; }
                    P a = new P();
                    P b = new P();
                    P c = a;
                    assert(a != b);
                    assert(a == c);
                    c.x = 3;
                    assert(a.x == 3);");

    let err = runtime_error(r#"1 == "1";"#);
    assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
}

#[test]
fn conditions_must_be_boolean() {
    assert!(matches!(runtime_error("if (1) { }"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_error("while (0) { }"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_error("for (;\"x\";) { }"), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn if_else_chains() {
    assert_success("int x = 5; string size;
                    if (x < 3) { size = \"small\"; }
                    else if (x < 10) { size = \"medium\"; }
                    else { size = \"large\"; }
                    assert(size == \"medium\");");
}

#[test]
fn loops() {
    assert_success("int x = 0; while (x < 3) { x = x + 1; } assert(x == 3);");
    assert_success("int n = 0; do { n++; } while (n < 5); assert(n == 5);");
    assert_success("int n = 10; do { n++; } while (false); assert(n == 11);");
    assert_success("int total = 0;
                    for (int i = 0; i < 5; i++) { total = total + i; }
                    assert(total == 10);");
    assert_success("int i = 0; for (; i < 3;) { i++; } assert(i == 3);");
    assert_success("int hits = 0;
                    for (int i = 0; i < 3; i++) { int square = i * i; hits = hits + square; }
                    assert(hits == 5);");

    let err = runtime_error("for (int i = 0; i < 2; i++) { } i;");
    assert!(matches!(err, RuntimeError::UndefinedVariable { .. }));
}

#[test]
fn increments() {
    assert_success("int i = 0; int j = i++; assert(j == 0); assert(i == 1);");
    assert_success("int i = 0; assert(++i == 1); assert(--i == 0); assert(i-- == 0); assert(i == -1);");

    let err = runtime_error(r#"string s = "a"; s++;"#);
    assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
}

#[test]
fn functions() {
    assert_success("func int add(int a, int b) { return a + b; } assert(add(2, 3) == 5);");
    assert_success("func int fib(int n) {
                        if (n < 2) { return n; }
                        return fib(n - 1) + fib(n - 2);
                    }
                    assert(fib(10) == 55);");
    assert_success("func int last() { 41 + 1; } assert(last() == 42);");
    assert_success("int counter = 0;
                    func void bump() { counter = counter + 1; }
                    bump(); bump();
                    assert(counter == 2);");

    let err = runtime_error("func int add(int a, int b) { return a + b; } add(1);");
    assert!(matches!(err, RuntimeError::ArityMismatch { expected: 2, found: 1, .. }));
    let err = runtime_error("func int add(int a, int b) { return a + b; } add(1, 2, 3);");
    assert!(matches!(err, RuntimeError::ArityMismatch { expected: 2, found: 3, .. }));
    let err = runtime_error("foo();");
    assert!(matches!(err, RuntimeError::UndefinedFunction { .. }));
    let err = runtime_error("func void f() { } func void f() { }");
    assert!(matches!(err, RuntimeError::DuplicateDefinition { .. }));
}

#[test]
fn functions_register_when_executed() {
    let err = runtime_error("later(); func void later() { }");
    assert!(matches!(err, RuntimeError::UndefinedFunction { .. }));
}

#[test]
fn function_bodies_cannot_see_caller_locals() {
    let err = runtime_error("func int peek() { return secret; }
                             { int secret = 1; peek(); }");
    assert!(matches!(err, RuntimeError::UndefinedVariable { .. }));

    assert_success("int global = 4; func int peek() { return global; } assert(peek() == 4);");
}

#[test]
fn return_stops_enclosing_loops() {
    assert_success("func int first_over(array xs, int limit) {
                        for (int i = 0; i < len(xs); i++) {
                            if (xs[i] > limit) { return xs[i]; }
                        }
                        return -1;
                    }
                    assert(first_over([1, 5, 9], 4) == 5);
                    assert(first_over([1, 2], 4) == -1);");
    assert_success("func int spin() { while (true) { return 3; } }
                    assert(spin() == 3);");
}

#[test]
fn top_level_return_stops_the_program() {
    assert_eq!(value_of("1; return 7; 8;"), Value::Number(7.0));
    assert_success("return; assert(false);");
}

#[test]
fn classes_and_constructors() {
    assert_success("class Box { int v; Box(int start) { v = start; } }
                    Box b = new Box(7);
                    assert(b.v == 7);");
    assert_success("class F { int a = 2; int b = a * 3; }
                    F f = new F();
                    assert(f.b == 6);");

    let err = runtime_error("new Nope();");
    assert!(matches!(err, RuntimeError::UndefinedClass { .. }));
    let err = runtime_error("class Box { int v; Box(int start) { v = start; } } new Box();");
    assert!(matches!(err, RuntimeError::ArityMismatch { .. }));
    let err = runtime_error("class A { } class A { }");
    assert!(matches!(err, RuntimeError::DuplicateDefinition { .. }));
    let err = runtime_error("class A { int x; } class B { } A a = new B();");
    assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
    let err = runtime_error("class A { int x; } A a = new A(); a.x = \"no\";");
    assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
    let err = runtime_error("class A { int x; } A a = new A(); a.y = 1;");
    assert!(matches!(err, RuntimeError::UndefinedMember { .. }));
}

#[test]
fn method_mutations_persist() {
    assert_success("class Counter {
                        int count = 0;
                        func void bump() { count = count + 1; }
                        func int get() { return count; }
                    }
                    Counter c = new Counter();
                    c.bump();
                    c.bump();
                    assert(c.get() == 2);
                    assert(c.count == 2);");
}

#[test]
fn methods_call_sibling_methods() {
    assert_success("class Acc {
                        int total = 0;
                        func void add(int n) { total = total + n; }
                        func void add_twice(int n) { add(n); add(n); }
                    }
                    Acc a = new Acc();
                    a.add_twice(3);
                    assert(a.total == 6);");
}

#[test]
fn member_calls_on_non_functions() {
    let err = runtime_error("class A { int v; } A a = new A(); a.v();");
    assert!(matches!(err, RuntimeError::NotCallable { .. }));
    let err = runtime_error("class A { int v; } A a = new A(); a.w();");
    assert!(matches!(err, RuntimeError::UndefinedMember { .. }));
    let err = runtime_error("int n = 1; n.f();");
    assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
}

#[test]
fn prelude_functions() {
    assert_success(r#"
        array xs = [];
        push(xs, 1);
        push(xs, "two");
        assert(len(xs) == 2);
        assert(pop(xs) == "two");
        assert(len(xs) == 1);
        assert(contains(xs, 1));
        assert(!contains(xs, "1"));
        assert(keys({b: 1, a: 2}) == ["a", "b"]);
        assert(contains({k: 1}, "k"));
        assert(contains("tessel", "ess"));
        assert(to_string([1, "x"]) == "[1, \"x\"]");
        assert(to_string(2.5) == "2.5");
    "#);

    assert!(matches!(runtime_error("assert(false);"), RuntimeError::AssertionFailed { line: 1 }));
    assert!(matches!(runtime_error("array xs = []; pop(xs);"),
                     RuntimeError::IndexOutOfBounds { .. }));
    assert!(matches!(runtime_error("len(1);"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_error("len();"), RuntimeError::ArityMismatch { .. }));
}

#[test]
fn pure_expressions_are_deterministic() {
    let src = "array a = [1, 2]; map m = {k: a}; to_string(m) + to_string(3 * 4 - 1);";
    assert_eq!(value_of(src), value_of(src));
    assert_eq!(value_of(src), Value::from("{\"k\": [1, 2]}11"));
}

#[test]
fn objects_reaching_themselves_print() {
    let src = "class N { array a; } N n = new N(); n.a = [n]; to_string(n);";
    assert_eq!(value_of(src), Value::from("N { a: [<N>] }"));

    let src = r#"
        class Graph { map edges; }
        Graph g = new Graph();
        g.edges = {loop: g};
        print(g);
        to_string(g);
    "#;
    assert_eq!(value_of(src), Value::from("Graph { edges: {\"loop\": <Graph>} }"));

    let src = r#"
        class Leaf { int v; }
        class Pair { array items; }
        Leaf l = new Leaf();
        Pair p = new Pair();
        p.items = [l, l];
        to_string(p);
    "#;
    assert_eq!(value_of(src), Value::from("Pair { items: [Leaf { v: 0 }, Leaf { v: 0 }] }"));
}

#[test]
fn syntax_errors() {
    assert!(matches!(parse_error("int x = ;"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_error("1 = 2;"), ParseError::InvalidAssignmentTarget { .. }));
    assert!(matches!(parse_error("func int f( { }"), ParseError::UnexpectedToken { .. }));
    assert!(matches!(parse_error("while (true) {"), ParseError::UnexpectedEndOfInput { .. }));
    assert_failure("\"unterminated");
    assert_failure("int x = 1 @ 2;");
}

#[test]
fn missing_script_file_fails() {
    let err = run_file(Path::new("scripts/does-not-exist.tsl"), false).unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::ImportFailed { .. })));
}
