use core::{
    cell::Cell,
    fmt::{self, Debug, Display},
};
use std::{rc::Rc, sync::Arc};

use log::warn;
use num_traits::{Float, Zero};

use crate::SensorFault;

/// A device exposing a single scalar measurement (position, rate, angle...).
///
/// Two reads are offered:
///
/// - [`measure_checked`](Self::measure_checked) is the authoritative read and reports invalid
///   hardware state as a [`SensorFault`].
/// - [`measure`](Self::measure) never fails. When the device is faulted it returns a fallback
///   value instead, which makes it suitable for "best effort" paths.
///
/// Both reads sample the same quantity, and `measure` is never stricter than `measure_checked`.
pub trait FeedbackSensor {
    /// Scalar type of the measurement.
    type Scalar: Float + Debug + Display;

    /// Reads the sensor, failing if the measurement is invalid.
    ///
    /// # Errors
    ///
    /// Returns a [`SensorFault`] describing why the reading could not be trusted.
    fn measure_checked(&self) -> Result<Self::Scalar, SensorFault>;

    /// Reads the sensor, substituting a fallback value if the measurement is invalid.
    ///
    /// The default fallback is zero. Implementors with better knowledge (a cached reading, for
    /// example) should override this.
    fn measure(&self) -> Self::Scalar {
        self.measure_checked().unwrap_or_else(|_| Self::Scalar::zero())
    }
}

// MARK: Shared Handles

impl<S: FeedbackSensor + ?Sized> FeedbackSensor for &S {
    type Scalar = S::Scalar;

    fn measure_checked(&self) -> Result<Self::Scalar, SensorFault> {
        (**self).measure_checked()
    }

    fn measure(&self) -> Self::Scalar {
        (**self).measure()
    }
}

impl<S: FeedbackSensor + ?Sized> FeedbackSensor for Rc<S> {
    type Scalar = S::Scalar;

    fn measure_checked(&self) -> Result<Self::Scalar, SensorFault> {
        (**self).measure_checked()
    }

    fn measure(&self) -> Self::Scalar {
        (**self).measure()
    }
}

impl<S: FeedbackSensor + ?Sized> FeedbackSensor for Arc<S> {
    type Scalar = S::Scalar;

    fn measure_checked(&self) -> Result<Self::Scalar, SensorFault> {
        (**self).measure_checked()
    }

    fn measure(&self) -> Self::Scalar {
        (**self).measure()
    }
}

// MARK: Closure Sources

/// Sensor backed by an infallible measurement closure.
///
/// Created with [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F>(F);

/// Adapts a plain measurement closure into a [`FeedbackSensor`].
///
/// Useful for feeding a controller from a derived quantity (a filtered estimate, the output of
/// another subsystem) that has no notion of a hardware fault. The checked read never fails.
///
/// # Examples
///
/// ```
/// use motive_devices::{FeedbackSensor, from_fn};
///
/// let sensor = from_fn(|| 42.0);
/// assert_eq!(sensor.measure_checked(), Ok(42.0));
/// ```
pub fn from_fn<T, F>(f: F) -> FromFn<F>
where
    F: Fn() -> T,
{
    FromFn(f)
}

impl<T, F> FeedbackSensor for FromFn<F>
where
    F: Fn() -> T,
    T: Float + Debug + Display,
{
    type Scalar = T;

    fn measure_checked(&self) -> Result<T, SensorFault> {
        Ok((self.0)())
    }

    fn measure(&self) -> T {
        (self.0)()
    }
}

impl<F> Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

// MARK: Last Good Reading

/// Wrapper that remembers the most recent valid reading of a sensor.
///
/// [`measure`](FeedbackSensor::measure) on a `LastGood` falls back to that reading (rather than
/// zero) when the wrapped sensor faults, and logs a warning. Non-finite readings are rejected
/// with [`SensorFault::NonFinite`] and never cached.
#[derive(Debug)]
pub struct LastGood<S: FeedbackSensor> {
    sensor: S,
    last: Cell<S::Scalar>,
}

impl<S: FeedbackSensor> LastGood<S> {
    /// Wraps `sensor`, using zero until the first valid reading arrives.
    pub fn new(sensor: S) -> Self {
        Self::with_initial(sensor, S::Scalar::zero())
    }

    /// Wraps `sensor`, using `initial` until the first valid reading arrives.
    pub const fn with_initial(sensor: S, initial: S::Scalar) -> Self {
        Self {
            sensor,
            last: Cell::new(initial),
        }
    }

    /// Returns the most recent valid reading without touching the sensor.
    pub fn last(&self) -> S::Scalar {
        self.last.get()
    }

    /// Returns a reference to the wrapped sensor.
    pub const fn inner(&self) -> &S {
        &self.sensor
    }
}

impl<S: FeedbackSensor> FeedbackSensor for LastGood<S> {
    type Scalar = S::Scalar;

    fn measure_checked(&self) -> Result<Self::Scalar, SensorFault> {
        let value = self.sensor.measure_checked()?;

        if !value.is_finite() {
            return Err(SensorFault::NonFinite);
        }

        self.last.set(value);
        Ok(value)
    }

    fn measure(&self) -> Self::Scalar {
        self.measure_checked().unwrap_or_else(|fault| {
            let last = self.last.get();
            warn!("Sensor read failed ({fault}), falling back to last good reading {last}");
            last
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimSensor;

    #[test]
    fn default_fallback_is_zero() {
        let sensor = SimSensor::new(12.5_f64);
        sensor.fail(SensorFault::Disconnected);

        let borrowed: &SimSensor<f64> = &sensor;
        assert_eq!(borrowed.measure_checked(), Err(SensorFault::Disconnected));
        assert_eq!(borrowed.measure(), 0.0);
        assert_eq!(from_fn(|| f64::NAN).measure_checked().map(f64::is_nan), Ok(true));
    }

    #[test]
    fn shared_handles_read_the_same_device() {
        let sensor = Rc::new(SimSensor::new(3.0_f64));
        let handle = Rc::clone(&sensor);

        sensor.set(4.0);
        assert_eq!(handle.measure(), 4.0);
        assert_eq!(handle.measure_checked(), Ok(4.0));

        let shared = Arc::new(from_fn(|| -1.5_f32));
        assert_eq!(shared.measure(), -1.5);
    }

    #[test]
    fn last_good_reading_survives_faults() {
        let sensor = SimSensor::new(10.0_f64);
        let cached = LastGood::new(&sensor);

        assert_eq!(cached.measure(), 10.0);

        sensor.set(11.0);
        sensor.fail(SensorFault::OutOfRange { value: 9000.0 });
        assert!(cached.inner().is_faulted());
        assert_eq!(
            cached.measure_checked(),
            Err(SensorFault::OutOfRange { value: 9000.0 })
        );
        assert_eq!(cached.measure(), 10.0);

        sensor.recover();
        assert_eq!(cached.measure(), 11.0);
        assert_eq!(cached.last(), 11.0);
    }

    #[test]
    fn last_good_rejects_non_finite_readings() {
        let sensor = SimSensor::new(2.0_f64);
        let cached = LastGood::with_initial(&sensor, 1.0);

        sensor.set(f64::NAN);
        assert_eq!(cached.measure_checked(), Err(SensorFault::NonFinite));
        assert_eq!(cached.measure(), 1.0);
    }
}
