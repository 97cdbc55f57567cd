/// Core evaluation logic.
///
/// Defines the `Context` holding all interpreter state, the `Flow` signal
/// produced by statements, and the expression and statement dispatchers.
pub mod core;

/// Variable storage.
///
/// Implements the scope stack, call frames, the receiver overlay and the
/// declare, read and write operations on variables.
pub mod environment;

/// Unary operator evaluation.
///
/// Handles negation, logical not, and the increment and decrement operators.
pub mod unary;

/// Binary operator evaluation.
///
/// Implements evaluation for all binary operations, including arithmetic,
/// string concatenation, comparisons, equality and logical operators.
pub mod binary;

/// Declarations and assignments.
///
/// Implements typed declarations and plain, indexed and member assignment.
pub mod statement;

/// Control flow evaluation.
///
/// Evaluates blocks, conditionals and loops, propagating `return` signals.
pub mod control;

/// Arrays, maps and member access.
///
/// Evaluates collection literals, index reads, and member reads and calls on
/// objects and maps.
pub mod collection;

/// Classes and objects.
///
/// Implements the class registry, object instantiation and method dispatch.
pub mod class;

/// Functions.
///
/// Implements the function registries, call dispatch and the native prelude.
pub mod function;

/// Utility functions for the evaluator.
///
/// Provides helpers and common checks used across evaluation.
pub mod utils;
