use motive_math::RangeError;

/// Error returned when a controller is constructed with invalid configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A gain or term was NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The dead-band threshold was below zero.
    #[error("dead-band threshold must be non-negative, got {0}")]
    NegativeThreshold(f64),

    /// The continuous input range was invalid.
    #[error(transparent)]
    Range(#[from] RangeError),
}

impl ConfigError {
    pub(crate) fn check_finite<T: num_traits::Float>(
        name: &'static str,
        value: T,
    ) -> Result<(), Self> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::NonFinite {
                name,
                value: value.to_f64().unwrap_or(f64::NAN),
            })
        }
    }
}
