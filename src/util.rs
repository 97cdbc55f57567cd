/// Numeric conversion helpers.
///
/// tessel stores every number as an `f64`. This module holds the checked
/// conversions between that representation and the `usize` positions and
/// lengths used by arrays and strings, so that no conversion silently
/// truncates a fractional or out of range value.
pub mod num;
