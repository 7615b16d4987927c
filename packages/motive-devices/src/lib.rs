//! Sensor and actuator capabilities.
//!
//! Controllers in motive never talk to hardware directly. They read feedback through a
//! [`FeedbackSensor`] and command devices through an [`Actuator`]. Both are narrow traits that
//! device drivers (or simulations) implement, and both are implemented for shared handles so a
//! controller can borrow a device without owning it.

mod actuator;
mod fault;
mod sensor;

pub mod sim;

pub use actuator::Actuator;
pub use fault::SensorFault;
pub use sensor::{FeedbackSensor, FromFn, LastGood, from_fn};
