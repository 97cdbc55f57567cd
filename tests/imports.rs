use std::{fs, path::Path};

use tempfile::tempdir;
use tessel::{
    Error,
    error::{ParseError, RuntimeError},
    interpreter::{evaluator::core::Context, value::core::Value},
    parse_file, run_file,
};

fn write(dir: &Path, name: &str, source: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, source).expect("write script");
}

fn parse_failure(path: &Path) -> ParseError {
    match run_file(path, false) {
        Err(Error::Parse(e)) => e,
        Err(Error::Runtime(e)) => panic!("expected a parse error, found {e}"),
        Ok(_) => panic!("script succeeded but was expected to fail"),
    }
}

#[test]
fn imported_definitions_are_visible() {
    let dir = tempdir().expect("create temp dir");
    write(dir.path(), "lib.tsl", "func int double(int x) { return 2 * x; }\n");
    write(dir.path(),
          "main.tsl",
          "#import \"lib.tsl\"\nint four = double(2);\nassert(four == 4);\nfour;\n");

    let result = run_file(&dir.path().join("main.tsl"), false).expect("script runs");
    assert_eq!(result, Some(Value::Number(4.0)));
}

#[test]
fn imports_resolve_relative_to_the_importing_file() {
    let dir = tempdir().expect("create temp dir");
    write(dir.path(), "sub/util.tsl", "#import \"consts.tsl\"\nfunc int scaled(int x) { return x * FACTOR; }\n");
    write(dir.path(), "sub/consts.tsl", "int FACTOR = 3;\n");
    write(dir.path(), "main.tsl", "#import \"sub/util.tsl\"\nassert(scaled(2) == 6);\n");

    run_file(&dir.path().join("main.tsl"), false).expect("script runs");
}

#[test]
fn imported_statements_are_spliced_in_place() {
    let dir = tempdir().expect("create temp dir");
    write(dir.path(), "step.tsl", "log = log + \"b\";\n");
    write(dir.path(), "main.tsl", "string log = \"a\";\n#import \"step.tsl\"\nlog = log + \"c\";\nlog;\n");

    let program = parse_file(&dir.path().join("main.tsl")).expect("parses");
    assert_eq!(program.statements.len(), 4);

    let mut context = Context::new();
    assert_eq!(context.eval_program(&program).expect("runs"), Some(Value::from("abc")));
}

#[test]
fn self_import_is_circular() {
    let dir = tempdir().expect("create temp dir");
    write(dir.path(), "a.tsl", "#import \"a.tsl\"\n");

    let err = parse_failure(&dir.path().join("a.tsl"));
    assert!(matches!(err, ParseError::CircularImport { line: 1, .. }));
}

#[test]
fn import_cycle_is_circular() {
    let dir = tempdir().expect("create temp dir");
    write(dir.path(), "a.tsl", "#import \"b.tsl\"\n");
    write(dir.path(), "b.tsl", "int x = 1;\n#import \"a.tsl\"\n");

    let err = parse_failure(&dir.path().join("a.tsl"));
    assert_eq!(err,
               ParseError::CircularImport { path: "a.tsl".to_string(),
                                            line: 2, });
}

#[test]
fn importing_a_file_twice_is_circular() {
    let dir = tempdir().expect("create temp dir");
    write(dir.path(), "shared.tsl", "int shared = 1;\n");
    write(dir.path(), "left.tsl", "#import \"shared.tsl\"\n");
    write(dir.path(), "right.tsl", "#import \"./shared.tsl\"\n");
    write(dir.path(), "main.tsl", "#import \"left.tsl\"\n#import \"right.tsl\"\n");

    let err = parse_failure(&dir.path().join("main.tsl"));
    assert!(matches!(err, ParseError::CircularImport { .. }));
}

#[test]
fn missing_import_fails() {
    let dir = tempdir().expect("create temp dir");
    write(dir.path(), "main.tsl", "int x = 1;\n\n#import \"nowhere.tsl\"\n");

    let err = parse_failure(&dir.path().join("main.tsl"));
    assert!(matches!(err, ParseError::ImportFailed { line: 3, .. }));
}

#[test]
fn syntax_errors_in_imports_are_reported() {
    let dir = tempdir().expect("create temp dir");
    write(dir.path(), "broken.tsl", "int = 1;\n");
    write(dir.path(), "main.tsl", "#import \"broken.tsl\"\n");

    let err = parse_failure(&dir.path().join("main.tsl"));
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
}

#[test]
fn errors_in_imported_code_report_lines_of_that_file() {
    let dir = tempdir().expect("create temp dir");
    write(dir.path(), "broken.tsl", "int x = 1;\n\nint = 1;\n");
    write(dir.path(), "main.tsl", "int a = 0;\n#import \"broken.tsl\"\n");

    let err = parse_failure(&dir.path().join("main.tsl"));
    assert!(matches!(err, ParseError::UnexpectedToken { line: 3, .. }));

    write(dir.path(), "lib.tsl", "\nfunc int bad() { return 1 / 0; }\n");
    write(dir.path(), "run.tsl", "#import \"lib.tsl\"\n\n\nint x = bad();\n");

    match run_file(&dir.path().join("run.tsl"), false) {
        Err(Error::Runtime(e)) => assert!(matches!(e, RuntimeError::DivisionByZero { line: 2 })),
        other => panic!("expected division by zero, found {other:?}"),
    }
}
