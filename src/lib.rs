//! # tessel
//!
//! tessel is a small, dynamically typed scripting language with a
//! tree-walking interpreter written in Rust. Scripts declare typed variables,
//! functions and classes, manipulate arrays and maps, and call into host
//! callbacks registered by the embedding program.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::path::Path;

use tracing::debug;

use crate::{
    ast::Program,
    error::ParseError,
    interpreter::{
        evaluator::core::Context, import::ImportResolver, lexer::tokenize,
        parser::core::parse_program, value::core::Value,
    },
};
pub use crate::error::Error;

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and the definitions
/// of functions and classes that represent the syntactic structure of a
/// program as a tree. The AST is built by the parser and traversed by the
/// evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// import resolution or evaluation. Every error carries the line it refers to
/// and a readable message.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (front end, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Wraps both phases in the crate-level `Error`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, import resolution, parsing, evaluation
/// and value representations to provide a complete runtime for tessel
/// programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between `usize` positions and `f64` numbers without
///   silent data loss.
pub mod util;

/// Parses source text into a program.
///
/// `#import` paths are resolved relative to the current working directory.
///
/// # Errors
/// Any lexing, import or syntax error.
///
/// # Example
/// ```
/// use tessel::parse_source;
///
/// let program = parse_source("int x = 1; x = x + 1;").unwrap();
/// assert_eq!(program.statements.len(), 2);
///
/// assert!(parse_source("int = 3;").is_err());
/// ```
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    let tokens = tokenize(source)?;
    let tokens = ImportResolver::new().expand(tokens, Path::new("."))?;
    parse_program(&tokens)
}

/// Reads and parses a script file.
///
/// `#import` paths are resolved relative to the directory of the file that
/// contains them.
///
/// # Errors
/// `ImportFailed` if the file cannot be read, or any lexing, import or syntax
/// error.
pub fn parse_file(path: &Path) -> Result<Program, ParseError> {
    let tokens = ImportResolver::new().load_file(path)?;
    parse_program(&tokens)
}

/// Runs a parsed program in `context`.
///
/// # Returns
/// The last value a top-level statement produced, if any. With `auto_print`
/// it is also printed to standard output.
///
/// # Errors
/// The first runtime error; execution stops there.
pub fn execute(context: &mut Context, program: &Program, auto_print: bool) -> Result<Option<Value>, Error> {
    debug!(statements = program.statements.len(), "executing program");

    let result = context.eval_program(program)?;

    if auto_print && let Some(value) = &result {
        println!("{value}");
    }

    Ok(result)
}

/// Parses and runs `source` in a fresh context with the native prelude.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use tessel::{get_result, interpreter::value::core::Value};
///
/// let result = get_result("float half = 7 / 2; half;", false).unwrap();
/// assert_eq!(result, Some(Value::Number(3.5)));
///
/// // 'x' is not defined
/// assert!(get_result("int y = x + 1;", false).is_err());
/// ```
pub fn get_result(source: &str, auto_print: bool) -> Result<Option<Value>, Error> {
    let program = parse_source(source)?;
    execute(&mut Context::new(), &program, auto_print)
}

/// Parses and runs a script file in a fresh context with the native prelude.
///
/// # Errors
/// Returns an error if reading, parsing or evaluation fails.
pub fn run_file(path: &Path, auto_print: bool) -> Result<Option<Value>, Error> {
    let program = parse_file(path)?;
    execute(&mut Context::new(), &program, auto_print)
}
