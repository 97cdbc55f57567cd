/// The native prelude.
///
/// Declares the table of host callbacks every `Context::new()` starts with
/// and installs them into the native registry.
pub mod builtin;
/// Function registries and call dispatch.
///
/// Registers native and user functions, resolves calls by name, and runs user
/// functions, methods and constructors in their own frames.
pub mod core;
/// The `print` function implementation.
///
/// Writes a value to standard output.
pub mod print;
