use core::{
    cell::RefCell,
    fmt::{Debug, Display},
};
use std::rc::Rc;

use num_traits::Float;

/// A device that accepts a single scalar command (motor power, voltage, duty cycle...).
///
/// This is deliberately the narrowest possible interface so that closed-loop subsystems can
/// implement it too and be nested anywhere a raw actuator is expected.
pub trait Actuator {
    /// Scalar type of the command.
    type Scalar: Float + Debug + Display;

    /// Commands the device.
    fn drive(&mut self, output: Self::Scalar);

    /// Returns the most recent command this device received.
    fn output(&self) -> Self::Scalar;
}

impl<A: Actuator + ?Sized> Actuator for &mut A {
    type Scalar = A::Scalar;

    fn drive(&mut self, output: Self::Scalar) {
        (**self).drive(output);
    }

    fn output(&self) -> Self::Scalar {
        (**self).output()
    }
}

impl<A: Actuator + ?Sized> Actuator for Rc<RefCell<A>> {
    type Scalar = A::Scalar;

    fn drive(&mut self, output: Self::Scalar) {
        self.borrow_mut().drive(output);
    }

    fn output(&self) -> Self::Scalar {
        self.borrow().output()
    }
}
