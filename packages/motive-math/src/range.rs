use num_traits::Float;

/// Error returned when constructing an invalid [`InputRange`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RangeError {
    /// One of the bounds is NaN or infinite.
    #[error("input range bounds must be finite")]
    NonFinite,

    /// The minimum is not strictly below the maximum.
    #[error("input range minimum {min} must be below maximum {max}")]
    Empty {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
}

/// Bounds of a measurement domain that wraps around at its edges.
///
/// Absolute angle sensors are the usual example: a reading of `359°` sits
/// right next to `0°`. Errors computed inside such a domain should take the
/// shorter way around the boundary, which is what [`InputRange::wrap_error`]
/// does.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputRange<T> {
    min: T,
    max: T,
}

impl<T: Float> InputRange<T> {
    /// Creates a new range from `min` to `max`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::NonFinite`] if either bound is NaN or infinite and
    /// [`RangeError::Empty`] if `min >= max`.
    pub fn new(min: T, max: T) -> Result<Self, RangeError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(RangeError::NonFinite);
        }

        if min >= max {
            return Err(RangeError::Empty {
                min: min.to_f64().unwrap_or(f64::NAN),
                max: max.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self { min, max })
    }

    /// Lower bound of the range.
    pub fn min(&self) -> T {
        self.min
    }

    /// Upper bound of the range.
    pub fn max(&self) -> T {
        self.max
    }

    /// Width of the range (`max - min`).
    pub fn span(&self) -> T {
        self.max - self.min
    }

    /// Converts a raw `setpoint - measurement` error into the shortest signed
    /// distance around the wrap boundary.
    ///
    /// Errors larger than half the span are moved by one full span towards
    /// zero. The correction is applied at most once.
    ///
    /// # Examples
    ///
    /// ```
    /// use motive_math::InputRange;
    ///
    /// let degrees = InputRange::new(0.0, 360.0).unwrap();
    ///
    /// // Setpoint 350°, measurement 10°: ten degrees past, not 340 behind.
    /// assert_eq!(degrees.wrap_error(340.0), -20.0);
    /// assert_eq!(degrees.wrap_error(-340.0), 20.0);
    /// assert_eq!(degrees.wrap_error(90.0), 90.0);
    /// ```
    pub fn wrap_error(&self, error: T) -> T {
        let span = self.span();

        if error.abs() > span / (T::one() + T::one()) {
            if error > T::zero() {
                error - span
            } else {
                error + span
            }
        } else {
            error
        }
    }
}
