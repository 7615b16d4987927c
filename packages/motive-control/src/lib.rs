//! Closed-loop motion controllers.
//!
//! A motion controller reads a [`FeedbackSensor`](motive_devices::FeedbackSensor), compares the
//! measurement against a setpoint and produces an output for an actuator. This crate defines the
//! shared [`MotionController`] contract, the concrete strategies in [`loops`], and
//! [`PidDrivenActuator`], which wraps a PID loop around a raw actuator so the pair can be used as
//! a velocity-controlled actuator.
//!
//! Every output-producing operation comes in two flavors: a checked one (`get_safely`,
//! `tick_safely`) that surfaces a [`SensorFault`](motive_devices::SensorFault), and an infallible
//! one (`get`, `tick`) that logs the fault and falls back to zero.

mod controller;
mod error;
mod pid_driven;

pub mod loops;

#[cfg(test)]
mod test_log;

pub use controller::{ControllerState, MotionController, Sample};
pub use error::ConfigError;
pub use pid_driven::PidDrivenActuator;
