//! Closed-loop motion control for sensor-driven actuators.
//!
//! motive provides a common shape for "a controller reads a sensor, computes an output and
//! drives an actuator", a bang-bang strategy with feedforward built on it, and a composite that
//! wraps an external PID loop around a raw actuator to produce a velocity-controlled one.
//!
//! | Module | Purpose |
//! | ------ | ------- |
//! | [`control`] | The [`MotionController`](control::MotionController) contract and strategies |
//! | [`devices`] | Sensor and actuator capabilities, plus simulated devices |
//! | [`math`] | Wraparound input ranges and numeric defaults |
//! | [`logger`] | Console logger for the `log` facade (`logger` feature) |
//!
//! # Examples
//!
//! ```
//! use motive::prelude::*;
//! use motive::devices::sim::{SimMotor, SimSensor};
//!
//! let encoder = SimSensor::new(0.0_f64);
//! let mut motor = SimMotor::new();
//! let mut controller = BangBang::new(&encoder, BangBangConfig::new(0.5, 0.0))?;
//!
//! controller.set_setpoint(10.0);
//! motor.drive(controller.get());
//! assert_eq!(motor.output(), -0.5);
//! # Ok::<(), motive::control::ConfigError>(())
//! ```

#[cfg(feature = "logger")]
pub mod logger;

pub use motive_control as control;
pub use motive_devices as devices;
pub use motive_math as math;

/// Commonly used traits and types.
pub mod prelude {
    pub use motive_control::{
        ConfigError, ControllerState, MotionController, PidDrivenActuator,
        loops::{BangBang, BangBangConfig, PidEngine, PidGains},
    };
    pub use motive_devices::{Actuator, FeedbackSensor, SensorFault};
    pub use motive_math::InputRange;
}
