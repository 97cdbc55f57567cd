/// The runtime value type.
///
/// Defines the `Value` tagged union that every expression evaluates to, along
/// with conversions, accessors and formatting.
pub mod core;
/// Heap allocated class instances.
///
/// Defines the `Object` record shared through `Rc<RefCell<_>>` by every value
/// that refers to the same instance, and its data and method members.
pub mod object;
/// Declared types and typed storage slots.
///
/// Defines `DeclaredType`, the static type attached to every variable and data
/// member, its zero values and assignment checks, and `Slot`, the typed cell
/// owned by a scope or an object.
pub mod types;
