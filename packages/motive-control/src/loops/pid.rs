use core::fmt::{Debug, Display};

use num_traits::Float;

use crate::ConfigError;

/// Proportional, integral and derivative gains for a [`PidEngine`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PidGains<T> {
    /// Proportional gain.
    pub kp: T,
    /// Integral gain.
    pub ki: T,
    /// Derivative gain.
    pub kd: T,
}

impl<T: Float> PidGains<T> {
    /// Creates a new set of gains.
    pub const fn new(kp: T, ki: T, kd: T) -> Self {
        Self { kp, ki, kd }
    }

    /// Checks that every gain is finite.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonFinite`] naming the first offending gain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_finite("kp", self.kp)?;
        ConfigError::check_finite("ki", self.ki)?;
        ConfigError::check_finite("kd", self.kd)
    }
}

/// A PID loop implementation supplied from outside this crate.
///
/// motive does not implement PID math itself. Anything that can be configured with gains, an
/// output range and a continuity flag, and that can run one step from a measurement source into
/// an output sink, can back a [`PidDrivenActuator`](crate::PidDrivenActuator).
pub trait PidEngine {
    /// Scalar type of setpoints, measurements and outputs.
    type Scalar: Float + Debug + Display;

    /// Replaces the loop's gains.
    fn set_gains(&mut self, gains: PidGains<Self::Scalar>);

    /// Limits every output the loop produces to `min..=max`.
    fn set_output_range(&mut self, min: Self::Scalar, max: Self::Scalar);

    /// Controls whether the measurement domain wraps around.
    fn set_continuous(&mut self, continuous: bool);

    /// Changes the loop's target.
    fn set_setpoint(&mut self, setpoint: Self::Scalar);

    /// Returns the loop's target.
    fn setpoint(&self) -> Self::Scalar;

    /// Runs one iteration: reads `measurement` and hands the computed correction to `output`.
    fn step<M, O>(&mut self, measurement: M, output: O)
    where
        M: FnOnce() -> Self::Scalar,
        O: FnOnce(Self::Scalar);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gains_must_be_finite() {
        assert_eq!(PidGains::new(1.0, 0.0, 0.1).validate(), Ok(()));
        assert!(matches!(
            PidGains::new(1.0, f64::NAN, 0.1).validate(),
            Err(ConfigError::NonFinite { name: "ki", .. })
        ));
        assert!(matches!(
            PidGains::new(1.0_f32, 0.0, f32::NEG_INFINITY).validate(),
            Err(ConfigError::NonFinite { name: "kd", .. })
        ));
    }
}
