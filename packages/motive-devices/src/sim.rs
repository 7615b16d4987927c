//! Simulated devices.
//!
//! These stand in for real hardware in tests and demos: a [`SimSensor`] whose reading and fault
//! state are scripted by the caller, and a [`SimMotor`] that records every command it receives.

use core::{
    cell::{Cell, RefCell},
    fmt::{self, Debug, Display},
};

use num_traits::Float;

use crate::{Actuator, FeedbackSensor, SensorFault};

/// Feedback sensor with a scripted reading and optional injected fault.
///
/// All setters take `&self`, so a test can keep adjusting the sensor while a controller holds a
/// shared reference to it.
pub struct SimSensor<T> {
    value: Cell<T>,
    fault: RefCell<Option<SensorFault>>,
}

impl<T: Float> SimSensor<T> {
    /// Creates a healthy sensor reading `value`.
    pub const fn new(value: T) -> Self {
        Self {
            value: Cell::new(value),
            fault: RefCell::new(None),
        }
    }

    /// Changes the reading.
    pub fn set(&self, value: T) {
        self.value.set(value);
    }

    /// Returns the scripted reading, ignoring any fault.
    pub fn value(&self) -> T {
        self.value.get()
    }

    /// Makes every checked read fail with `fault` until [`recover`](Self::recover) is called.
    pub fn fail(&self, fault: SensorFault) {
        *self.fault.borrow_mut() = Some(fault);
    }

    /// Clears an injected fault.
    pub fn recover(&self) {
        *self.fault.borrow_mut() = None;
    }

    /// Returns `true` if a fault is currently injected.
    pub fn is_faulted(&self) -> bool {
        self.fault.borrow().is_some()
    }
}

impl<T: Float + Debug> Debug for SimSensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimSensor")
            .field("value", &self.value.get())
            .field("fault", &self.fault.borrow())
            .finish()
    }
}

impl<T> FeedbackSensor for SimSensor<T>
where
    T: Float + Debug + Display,
{
    type Scalar = T;

    fn measure_checked(&self) -> Result<T, SensorFault> {
        match self.fault.borrow().as_ref() {
            Some(fault) => Err(fault.clone()),
            None => Ok(self.value.get()),
        }
    }
}

/// Actuator that records the commands it receives.
#[derive(Debug, Clone, Default)]
pub struct SimMotor<T> {
    commands: Vec<T>,
}

impl<T: Float> SimMotor<T> {
    /// Creates a motor that has never been commanded.
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Every command received so far, oldest first.
    pub fn commands(&self) -> &[T] {
        &self.commands
    }

    /// Forgets all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl<T> Actuator for SimMotor<T>
where
    T: Float + Debug + Display,
{
    type Scalar = T;

    fn drive(&mut self, output: T) {
        self.commands.push(output);
    }

    fn output(&self) -> T {
        self.commands.last().copied().unwrap_or_else(T::zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injected_faults_only_affect_checked_reads() {
        let sensor = SimSensor::new(5.0_f64);
        assert_eq!(sensor.measure_checked(), Ok(5.0));

        sensor.fail(SensorFault::Invalid("encoder count overflow".into()));
        assert!(sensor.is_faulted());
        assert_eq!(
            sensor.measure_checked(),
            Err(SensorFault::Invalid("encoder count overflow".into()))
        );
        assert_eq!(sensor.measure(), 0.0);
        assert_eq!(sensor.value(), 5.0);

        sensor.recover();
        assert_eq!(sensor.measure(), 5.0);
        assert_eq!(
            format!("{sensor:?}"),
            "SimSensor { value: 5.0, fault: None }"
        );
    }

    #[test]
    fn unused_motor_reports_zero() {
        let mut motor = SimMotor::<f64>::new();
        assert_eq!(motor.output(), 0.0);

        motor.drive(1.0);
        motor.drive(-1.0);
        assert_eq!(motor.output(), -1.0);
        assert_eq!(motor.commands(), &[1.0, -1.0]);

        motor.clear();
        assert_eq!(motor.output(), 0.0);
    }
}
