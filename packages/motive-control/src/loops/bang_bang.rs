use log::trace;
use motive_devices::{FeedbackSensor, SensorFault};
use motive_math::{InputRange, epsilon};
use num_traits::{Float, Zero};

use crate::{ConfigError, ControllerState, MotionController};

/// Tuning for a [`BangBang`] controller.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BangBangConfig<T> {
    /// Magnitude of the corrective push applied outside the dead-band.
    pub amplitude: T,

    /// Gain applied to the setpoint and added to every output.
    pub feedforward: T,

    /// Half-width of the dead-band around zero error. Must be non-negative.
    pub threshold: T,

    /// Wraparound range for continuous inputs, or `None` for a linear input.
    pub input_range: Option<InputRange<T>>,
}

impl<T: Float> BangBangConfig<T> {
    /// Creates a config with the default [`EPSILON`](motive_math::EPSILON) dead-band on a
    /// linear input.
    pub fn new(amplitude: T, feedforward: T) -> Self {
        Self {
            amplitude,
            feedforward,
            threshold: epsilon(),
            input_range: None,
        }
    }

    /// Modifies the dead-band threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: T) -> Self {
        self.threshold = threshold;
        self
    }

    /// Treats the input as continuous, wrapping around `range`.
    #[must_use]
    pub fn with_continuous(mut self, range: InputRange<T>) -> Self {
        self.input_range = Some(range);
        self
    }

    /// Checks that every term is finite, the threshold is non-negative and the input range (if
    /// any) is well formed.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_finite("amplitude", self.amplitude)?;
        ConfigError::check_finite("feedforward", self.feedforward)?;
        ConfigError::check_finite("threshold", self.threshold)?;

        if self.threshold < T::zero() {
            return Err(ConfigError::NegativeThreshold(
                self.threshold.to_f64().unwrap_or(f64::NAN),
            ));
        }

        // Ranges can arrive through deserialization without passing through `InputRange::new`.
        if let Some(range) = self.input_range {
            InputRange::new(range.min(), range.max())?;
        }

        Ok(())
    }
}

/// Bang-bang controller with feedforward.
///
/// Outside a dead-band of `threshold` around zero error, the controller pushes the output up or
/// down by a fixed `amplitude`. The feedforward term (`feedforward * setpoint`) is always added,
/// so every output is exactly one of:
///
/// | Error                                    | Output                               |
/// | ---------------------------------------- | ------------------------------------ |
/// | `error < 0` and `abs(error) > threshold` | `feedforward * setpoint + amplitude` |
/// | `error > 0` and `abs(error) > threshold` | `feedforward * setpoint - amplitude` |
/// | otherwise                                | `feedforward * setpoint`             |
///
/// The dead-band boundary is inclusive: an error of exactly `threshold` gets no push.
///
/// While disabled, the controller returns the feedforward term alone without reading the sensor,
/// and [`error`](MotionController::error) keeps the last value computed while enabled.
///
/// # Examples
///
/// ```
/// use motive_control::{
///     MotionController,
///     loops::{BangBang, BangBangConfig},
/// };
/// use motive_devices::sim::SimSensor;
///
/// let sensor = SimSensor::new(90.0_f64);
/// let mut controller = BangBang::new(
///     &sensor,
///     BangBangConfig::new(0.3, 0.1).with_threshold(0.05),
/// )?;
///
/// controller.set_setpoint(100.0);
/// approx::assert_relative_eq!(controller.get_safely()?, 9.7, epsilon = 1e-9);
///
/// sensor.set(100.02);
/// assert_eq!(controller.get_safely()?, 10.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct BangBang<S: FeedbackSensor> {
    state: ControllerState<S>,
    amplitude: S::Scalar,
    feedforward: S::Scalar,
    threshold: S::Scalar,
}

impl<S: FeedbackSensor> BangBang<S> {
    /// Creates a new controller, anchoring the setpoint at the sensor's current reading.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails [`BangBangConfig::validate`].
    pub fn new(sensor: S, config: BangBangConfig<S::Scalar>) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            state: ControllerState::new(sensor).with_input_range(config.input_range),
            amplitude: config.amplitude,
            feedforward: config.feedforward,
            threshold: config.threshold,
        })
    }

    /// Returns the configuration this controller was built with.
    pub fn config(&self) -> BangBangConfig<S::Scalar> {
        BangBangConfig {
            amplitude: self.amplitude,
            feedforward: self.feedforward,
            threshold: self.threshold,
            input_range: self.state.input_range(),
        }
    }

    /// Returns the shared controller state.
    pub const fn state(&self) -> &ControllerState<S> {
        &self.state
    }

    /// Returns the sensor handle.
    pub const fn sensor(&self) -> &S {
        self.state.sensor()
    }
}

impl<S: FeedbackSensor> MotionController for BangBang<S> {
    type Scalar = S::Scalar;

    fn get_safely(&mut self) -> Result<Self::Scalar, SensorFault> {
        let feedforward = self.feedforward * self.state.setpoint();

        if !self.state.is_enabled() {
            trace!(
                "Bang-bang disabled: setpoint {}, feedforward only ({feedforward})",
                self.state.setpoint()
            );
            return Ok(feedforward);
        }

        let sample = self.state.sample()?;
        let outside_deadband = sample.error.abs() > self.threshold;

        if outside_deadband && sample.error < Self::Scalar::zero() {
            trace!(
                "Bang-bang +A: measurement {}, setpoint {}, error {}",
                sample.measurement, sample.setpoint, sample.error
            );
            Ok(self.amplitude + feedforward)
        } else if outside_deadband && sample.error > Self::Scalar::zero() {
            trace!(
                "Bang-bang -A: measurement {}, setpoint {}, error {}",
                sample.measurement, sample.setpoint, sample.error
            );
            Ok(-self.amplitude + feedforward)
        } else {
            trace!(
                "Bang-bang dead-band: measurement {}, setpoint {}, error {}",
                sample.measurement, sample.setpoint, sample.error
            );
            Ok(feedforward)
        }
    }

    fn reset(&mut self) {
        self.state.reset();
    }

    fn reset_safely(&mut self) -> Result<(), SensorFault> {
        self.state.reset_safely()
    }

    fn error(&self) -> Self::Scalar {
        self.state.error()
    }

    fn setpoint(&self) -> Self::Scalar {
        self.state.setpoint()
    }

    fn set_setpoint(&mut self, setpoint: Self::Scalar) {
        self.state.set_setpoint(setpoint);
    }

    fn enable(&mut self) {
        self.state.enable();
    }

    fn disable(&mut self) {
        self.state.disable();
    }

    fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }
}
