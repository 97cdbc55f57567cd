/// Entry points of the parser.
///
/// Contains the program and expression entry points and the `ParseResult`
/// alias shared by every parsing function.
pub mod core;

/// Unary, postfix and primary expressions.
///
/// Handles prefix operators, increments, indexing, member access and calls,
/// literals, and `new` expressions.
pub mod unary;

/// Binary operator parsing.
///
/// Precedence climbing over the infix operators, `||` loosest and `*`/`/`
/// tightest.
pub mod binary;

/// Block parsing.
///
/// Parses brace delimited statement sequences for blocks and function bodies.
pub mod block;

/// Statement parsing.
///
/// Dispatches on the leading token of a statement and parses declarations,
/// assignments, returns and function definitions.
pub mod statement;

/// Control flow statements.
///
/// Parses `if`, `while`, `do`/`while` and `for`.
pub mod control;

/// Class definitions.
///
/// Parses class bodies: data members, methods and the constructor.
pub mod class;

/// Utility functions for the parser.
///
/// Provides token expectations, identifier and type parsing, and comma
/// separated list handling.
pub mod utils;
