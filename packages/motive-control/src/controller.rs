use core::fmt::{Debug, Display};

use log::{error, warn};
use motive_devices::{FeedbackSensor, SensorFault};
use motive_math::InputRange;
use num_traits::{Float, Zero};

/// A closed-loop controller that turns sensor feedback into an actuator output.
///
/// Implementors provide the checked computation ([`get_safely`](Self::get_safely)) and the
/// reset logic. The infallible [`get`](Self::get) is derived from `get_safely` and should not be
/// overridden: it is the single place where faults are collapsed into a zero output.
///
/// The setpoint and enable flag are meant to be written by whatever schedules the controller,
/// between ticks. Everything else is fixed at construction.
pub trait MotionController {
    /// Scalar type of setpoints, errors and outputs.
    type Scalar: Float + Debug + Display;

    /// Computes the controller's output, reading the sensor through its checked path.
    ///
    /// # Errors
    ///
    /// Returns the [`SensorFault`] raised by the sensor. The computation is aborted and the
    /// stored error is left untouched.
    fn get_safely(&mut self) -> Result<Self::Scalar, SensorFault>;

    /// Computes the controller's output, substituting zero if the sensor faults.
    ///
    /// A fault is logged at error level. Callers must treat the zero as "no correction this
    /// tick" rather than a computed output; use [`get_safely`](Self::get_safely) when the
    /// distinction matters.
    fn get(&mut self) -> Self::Scalar {
        self.get_safely().unwrap_or_else(|fault| {
            error!("Controller output unavailable, coasting at zero correction: {fault}");
            Self::Scalar::zero()
        })
    }

    /// Re-anchors the setpoint to the current measurement and zeroes the error.
    ///
    /// Uses the sensor's infallible read, so a faulted sensor silently yields its fallback
    /// value. Prefer [`reset_safely`](Self::reset_safely) when that matters.
    fn reset(&mut self);

    /// Re-anchors the setpoint to the current measurement and zeroes the error.
    ///
    /// # Errors
    ///
    /// Returns the [`SensorFault`] raised by the sensor, in which case nothing is changed.
    fn reset_safely(&mut self) -> Result<(), SensorFault>;

    /// Returns the most recently computed error without computing anything.
    fn error(&self) -> Self::Scalar;

    /// Returns the current setpoint.
    fn setpoint(&self) -> Self::Scalar;

    /// Changes the setpoint.
    fn set_setpoint(&mut self, setpoint: Self::Scalar);

    /// Allows the controller to apply corrective output.
    ///
    /// This does not re-anchor the setpoint. Call [`reset`](Self::reset) (or
    /// [`reset_safely`](Self::reset_safely)) alongside it to avoid an output spike.
    fn enable(&mut self);

    /// Stops the controller from applying corrective output.
    fn disable(&mut self);

    /// Returns `true` if the controller is allowed to apply corrective output.
    fn is_enabled(&self) -> bool;
}

/// A checked reading and the error computed from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<T> {
    /// The sensor reading.
    pub measurement: T,
    /// The setpoint at the time of the reading.
    pub setpoint: T,
    /// `setpoint - measurement`, corrected for wraparound on continuous inputs.
    pub error: T,
}

/// Bookkeeping shared by every [`MotionController`] strategy.
///
/// Holds the sensor handle, setpoint, enable flag, optional continuous input range and the last
/// computed error. Strategies embed one of these and delegate the common parts of the
/// [`MotionController`] contract to it.
#[derive(Debug)]
pub struct ControllerState<S: FeedbackSensor> {
    sensor: S,
    setpoint: S::Scalar,
    enabled: bool,
    input_range: Option<InputRange<S::Scalar>>,
    error: S::Scalar,
}

impl<S: FeedbackSensor> ControllerState<S> {
    /// Creates enabled, non-continuous state anchored at the sensor's current reading.
    ///
    /// A non-finite reading is not used as an anchor; the setpoint starts at zero instead.
    pub fn new(sensor: S) -> Self {
        let setpoint = anchor(&sensor, S::Scalar::zero());

        Self {
            sensor,
            setpoint,
            enabled: true,
            input_range: None,
            error: S::Scalar::zero(),
        }
    }

    /// Treats the input as continuous over `range` (or not at all, for `None`).
    #[must_use]
    pub fn with_input_range(mut self, range: Option<InputRange<S::Scalar>>) -> Self {
        self.input_range = range;
        self
    }

    /// Returns the sensor handle.
    pub const fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Returns the current setpoint.
    pub fn setpoint(&self) -> S::Scalar {
        self.setpoint
    }

    /// Changes the setpoint.
    pub fn set_setpoint(&mut self, setpoint: S::Scalar) {
        self.setpoint = setpoint;
    }

    /// Returns the most recently computed error.
    pub fn error(&self) -> S::Scalar {
        self.error
    }

    /// Returns `true` if corrective output is allowed.
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Allows corrective output.
    pub const fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stops corrective output.
    pub const fn disable(&mut self) {
        self.enabled = false;
    }

    /// Returns the wraparound range, if the input is continuous.
    pub fn input_range(&self) -> Option<InputRange<S::Scalar>> {
        self.input_range
    }

    /// Returns `true` if the input wraps around.
    pub const fn is_continuous(&self) -> bool {
        self.input_range.is_some()
    }

    /// Re-anchors the setpoint to the sensor's infallible reading and zeroes the error.
    ///
    /// If that reading is NaN or infinite, the previous setpoint is kept and a warning is logged.
    pub fn reset(&mut self) {
        self.setpoint = anchor(&self.sensor, self.setpoint);
        self.error = S::Scalar::zero();
    }

    /// Re-anchors the setpoint to the sensor's checked reading and zeroes the error.
    ///
    /// # Errors
    ///
    /// Returns the sensor's [`SensorFault`], or [`SensorFault::NonFinite`] for a NaN or
    /// infinite reading. State is left unchanged on error.
    pub fn reset_safely(&mut self) -> Result<(), SensorFault> {
        self.setpoint = self.read_checked()?;
        self.error = S::Scalar::zero();
        Ok(())
    }

    /// Applies the shortest-path wraparound correction to a raw error.
    ///
    /// Non-continuous inputs return `error` unchanged.
    pub fn continuous_error(&self, error: S::Scalar) -> S::Scalar {
        match self.input_range {
            Some(range) => range.wrap_error(error),
            None => error,
        }
    }

    /// Reads the sensor through its checked path and stores the resulting error.
    ///
    /// # Errors
    ///
    /// Returns the sensor's [`SensorFault`], or [`SensorFault::NonFinite`] for a NaN or
    /// infinite reading. The stored error is left unchanged on error.
    pub fn sample(&mut self) -> Result<Sample<S::Scalar>, SensorFault> {
        let measurement = self.read_checked()?;
        let error = self.continuous_error(self.setpoint - measurement);
        self.error = error;

        Ok(Sample {
            measurement,
            setpoint: self.setpoint,
            error,
        })
    }

    fn read_checked(&self) -> Result<S::Scalar, SensorFault> {
        let measurement = self.sensor.measure_checked()?;

        if measurement.is_finite() {
            Ok(measurement)
        } else {
            Err(SensorFault::NonFinite)
        }
    }
}

/// Reads the sensor's infallible path, keeping `fallback` if the reading is not finite.
fn anchor<S: FeedbackSensor>(sensor: &S, fallback: S::Scalar) -> S::Scalar {
    let measurement = sensor.measure();

    if measurement.is_finite() {
        measurement
    } else {
        warn!("Ignoring non-finite reading {measurement} as setpoint anchor, keeping {fallback}");
        fallback
    }
}

#[cfg(test)]
mod tests {
    use log::Level;
    use motive_devices::{from_fn, sim::SimSensor};

    use super::*;
    use crate::test_log;

    #[test]
    fn new_state_is_anchored_and_enabled() {
        let sensor = SimSensor::new(42.0_f64);
        let state = ControllerState::new(&sensor);

        assert_eq!(state.setpoint(), 42.0);
        assert_eq!(state.error(), 0.0);
        assert!(state.is_enabled());
        assert!(!state.is_continuous());
    }

    #[test]
    fn sample_wraps_on_continuous_inputs() {
        let sensor = SimSensor::new(10.0_f64);
        let mut state = ControllerState::new(&sensor)
            .with_input_range(Some(InputRange::new(0.0, 360.0).unwrap()));
        state.set_setpoint(350.0);

        let sample = state.sample().unwrap();
        assert_eq!(
            sample,
            Sample {
                measurement: 10.0,
                setpoint: 350.0,
                error: -20.0,
            }
        );
        assert_eq!(state.error(), -20.0);
    }

    #[test]
    fn sample_without_range_keeps_raw_error() {
        let sensor = SimSensor::new(10.0_f64);
        let mut state = ControllerState::new(&sensor);
        state.set_setpoint(350.0);

        assert_eq!(state.sample().unwrap().error, 340.0);
    }

    #[test]
    fn faults_leave_state_untouched() {
        let sensor = SimSensor::new(5.0_f64);
        let mut state = ControllerState::new(&sensor);
        state.set_setpoint(8.0);
        state.sample().unwrap();

        sensor.set(1.0);
        sensor.fail(SensorFault::Disconnected);

        assert_eq!(state.sample(), Err(SensorFault::Disconnected));
        assert_eq!(state.reset_safely(), Err(SensorFault::Disconnected));
        assert_eq!(state.error(), 3.0);
        assert_eq!(state.setpoint(), 8.0);
    }

    #[test]
    fn non_finite_readings_are_faults() {
        let sensor = SimSensor::new(f64::INFINITY);
        let mut state = ControllerState::new(&sensor);
        state.set_setpoint(1.0);

        assert_eq!(state.sample(), Err(SensorFault::NonFinite));
        assert_eq!(state.reset_safely(), Err(SensorFault::NonFinite));
        assert_eq!(state.setpoint(), 1.0);
    }

    #[test]
    fn reset_masks_faults_with_the_fallback_reading() {
        let sensor = SimSensor::new(7.0_f64);
        let mut state = ControllerState::new(&sensor);
        state.set_setpoint(3.0);

        sensor.fail(SensorFault::Disconnected);
        state.reset();

        assert_eq!(state.setpoint(), 0.0);
        assert_eq!(state.error(), 0.0);
    }

    #[test]
    fn reset_keeps_the_setpoint_on_non_finite_readings() {
        test_log::capture();

        let sensor = SimSensor::new(5.0_f64);
        let mut state = ControllerState::new(&sensor);
        state.set_setpoint(8.0);
        state.sample().unwrap();

        sensor.set(f64::NAN);
        state.reset();

        assert_eq!(state.setpoint(), 8.0);
        assert_eq!(state.error(), 0.0);
        assert_eq!(test_log::records_at(Level::Warn).len(), 1);

        sensor.set(5.0);
        assert_eq!(state.sample().unwrap().error, 3.0);
    }

    #[test]
    fn construction_never_anchors_on_infinity() {
        let sensor = SimSensor::new(f64::INFINITY);
        let mut state = ControllerState::new(&sensor);
        assert_eq!(state.setpoint(), 0.0);

        sensor.set(1.0);
        assert_eq!(state.sample().unwrap().error, -1.0);
    }

    #[test]
    fn infallible_source_producing_nan_is_still_caught() {
        let reading = core::cell::Cell::new(f64::NAN);
        let source = from_fn(|| reading.get());
        let mut state = ControllerState::new(&source);

        assert_eq!(state.setpoint(), 0.0);
        assert_eq!(state.sample(), Err(SensorFault::NonFinite));

        state.reset();
        assert_eq!(state.setpoint(), 0.0);

        reading.set(2.5);
        state.reset();
        assert_eq!(state.setpoint(), 2.5);
        assert_eq!(state.sample().unwrap().error, 0.0);
    }
}
