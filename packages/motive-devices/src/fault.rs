/// Error returned by a fallible sensor read when the underlying measurement is invalid.
///
/// Controllers propagate this from their checked operations (such as
/// [`MotionController::get_safely`]) so callers can tell a faulted sensor apart from a
/// legitimately quiet output.
///
/// [`MotionController::get_safely`]: https://docs.rs/motive-control/latest/motive_control/trait.MotionController.html#tymethod.get_safely
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum SensorFault {
    /// The device did not respond or is not plugged in.
    #[error("sensor is disconnected")]
    Disconnected,

    /// The device returned NaN or an infinite value.
    #[error("sensor produced a non-finite measurement")]
    NonFinite,

    /// The device returned a value it should never be able to produce.
    #[error("sensor reading {value} is outside of its valid range")]
    OutOfRange {
        /// The offending reading.
        value: f64,
    },

    /// Any other driver-reported invalid state.
    #[error("invalid sensor state: {0}")]
    Invalid(String),
}
