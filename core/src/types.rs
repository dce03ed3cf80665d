//! Shared primitive types used across the wheel.

/// A wheel option. Display string, unique within an `ItemList`.
pub type Item = String;

/// Angles are always in degrees.
pub type Degrees = f64;

/// Durations inside the reveal sequence, in milliseconds.
pub type Millis = u64;
