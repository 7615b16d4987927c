//! Velocity-controlled actuator built from a PID loop, a rate sensor and a raw actuator.

use log::{error, trace};
use motive_devices::{Actuator, FeedbackSensor, SensorFault};
use num_traits::{Float, One, Zero};

use crate::{
    ConfigError,
    loops::{PidEngine, PidGains},
};

/// An actuator whose command is a velocity, tracked by a PID loop around a raw actuator.
///
/// The wrapped [`PidEngine`] is configured once, at construction, with an output range of
/// `[-1, 1]` and continuity disabled (rate feedback never wraps). Neither can be changed
/// afterwards. Each [`tick`](Self::tick) reads the rate sensor, runs one engine step and sends
/// the engine's correction straight to the raw actuator.
///
/// `PidDrivenActuator` is itself an [`Actuator`]: [`drive`](Actuator::drive) sets the velocity
/// setpoint, and [`output`](Actuator::output) reports what the raw actuator was last told. This
/// lets a closed-loop subsystem stand in anywhere a raw actuator is expected.
///
/// Like a PID subsystem, the composite starts disabled. Ticks do nothing until
/// [`enable`](Self::enable) is called, and [`disable`](Self::disable) commands zero output.
#[derive(Debug)]
pub struct PidDrivenActuator<E, S, A> {
    engine: E,
    sensor: S,
    motor: A,
    enabled: bool,
}

impl<E, S, A> PidDrivenActuator<E, S, A>
where
    E: PidEngine,
    S: FeedbackSensor<Scalar = E::Scalar>,
    A: Actuator<Scalar = E::Scalar>,
{
    /// Wraps `engine` around `motor`, using `sensor` as rate feedback.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonFinite`] if any gain is NaN or infinite.
    pub fn new(
        mut engine: E,
        gains: PidGains<E::Scalar>,
        sensor: S,
        motor: A,
    ) -> Result<Self, ConfigError> {
        gains.validate()?;

        engine.set_gains(gains);
        engine.set_output_range(-E::Scalar::one(), E::Scalar::one());
        engine.set_continuous(false);

        Ok(Self {
            engine,
            sensor,
            motor,
            enabled: false,
        })
    }

    /// Sets the velocity the loop should track.
    pub fn set_velocity(&mut self, velocity: E::Scalar) {
        trace!("PID-driven actuator velocity setpoint: {velocity}");
        self.engine.set_setpoint(velocity);
    }

    /// Returns the velocity the loop is tracking.
    pub fn velocity_setpoint(&self) -> E::Scalar {
        self.engine.setpoint()
    }

    /// Sends `output` directly to the raw actuator, bypassing the loop.
    ///
    /// This is the sink the engine's corrections flow into during a tick. No clamping is applied
    /// beyond the engine's own output range.
    pub fn drive_output(&mut self, output: E::Scalar) {
        self.motor.drive(output);
    }

    /// Returns the raw actuator's last command (not the velocity setpoint).
    pub fn get(&self) -> E::Scalar {
        self.motor.output()
    }

    /// Runs one loop iteration, reading the rate sensor through its checked path.
    ///
    /// Does nothing while disabled.
    ///
    /// # Errors
    ///
    /// Returns the sensor's [`SensorFault`], or [`SensorFault::NonFinite`] for a NaN or infinite
    /// rate. The engine is not stepped and the raw actuator is not commanded.
    pub fn tick_safely(&mut self) -> Result<(), SensorFault> {
        if !self.enabled {
            return Ok(());
        }

        let rate = self.sensor.measure_checked()?;
        if !Float::is_finite(rate) {
            return Err(SensorFault::NonFinite);
        }

        let motor = &mut self.motor;
        self.engine.step(
            || rate,
            |output| {
                trace!("PID-driven actuator: rate {rate}, output {output}");
                motor.drive(output);
            },
        );

        Ok(())
    }

    /// Runs one loop iteration, coasting at zero output if the rate sensor faults.
    ///
    /// A fault is logged at error level and the raw actuator is commanded to zero.
    pub fn tick(&mut self) {
        if let Err(fault) = self.tick_safely() {
            error!("PID-driven actuator tick failed, commanding zero output: {fault}");
            self.motor.drive(E::Scalar::zero());
        }
    }

    /// Lets ticks drive the raw actuator.
    pub const fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stops ticking and commands zero output.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.motor.drive(E::Scalar::zero());
    }

    /// Returns `true` if ticks drive the raw actuator.
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the wrapped engine.
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Returns the rate sensor handle.
    pub const fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Returns the raw actuator handle.
    pub const fn motor(&self) -> &A {
        &self.motor
    }
}

impl<E, S, A> Actuator for PidDrivenActuator<E, S, A>
where
    E: PidEngine,
    S: FeedbackSensor<Scalar = E::Scalar>,
    A: Actuator<Scalar = E::Scalar>,
{
    type Scalar = E::Scalar;

    fn drive(&mut self, output: Self::Scalar) {
        self.set_velocity(output);
    }

    fn output(&self) -> Self::Scalar {
        self.get()
    }
}
