//! Math utilities & types.

#![no_std]

mod range;

use num_traits::Float;

pub use range::{InputRange, RangeError};

/// Smallest error magnitude treated as meaningful by default.
///
/// Controllers that expose a dead-band fall back to this value when no
/// threshold is configured, so that floating-point noise around a perfectly
/// settled measurement does not produce corrective output.
pub const EPSILON: f64 = 0.000_01;

/// Returns [`EPSILON`] converted to the scalar type `T`.
///
/// # Examples
///
/// ```
/// use motive_math::epsilon;
///
/// assert_eq!(epsilon::<f64>(), 0.000_01);
/// assert!(epsilon::<f32>() > 0.0);
/// ```
pub fn epsilon<T: Float>() -> T {
    num_traits::cast(EPSILON).unwrap_or_else(T::epsilon)
}
