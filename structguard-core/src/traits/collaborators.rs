//! Sensor and Actuator Collaborators
//!
//! Acquisition (ultrasonic echo timing, ADC reads, crack pin, DHT) and
//! actuation (LEDs, buzzer) live outside the core. The monitor talks to them
//! only through these two traits.

use crate::events::{AlertTransition, EngineOutput, FeatureSample};

/// Producer of one [`FeatureSample`] per tick
///
/// ## Implementation Notes
///
/// - Return `Err(nb::Error::WouldBlock)` when a conversion is still in flight;
///   the tick is deferred to the next poll
/// - Report a per-feature timeout as [`Reading::Missing`](crate::events::Reading::Missing)
///   inside the sample rather than as an error
/// - `nb::Error::Other` is for whole-device failures (bus fault). The engine
///   logs it and runs the tick with every feature missing
/// - Never block for longer than one echo timeout
pub trait SensorSource {
    /// Device-level failure type
    type Error: core::fmt::Debug;

    /// Poll the sensors for the current tick
    fn poll_sample(&mut self) -> nb::Result<FeatureSample, Self::Error>;
}

/// Consumer of engine output: reporting and actuation
///
/// Mapping [`AlertLevel`](crate::alert::AlertLevel) to LED pins and buzzer
/// tones is entirely the sink's business.
pub trait AlertSink {
    /// Called once per completed tick
    fn publish(&mut self, output: &EngineOutput);

    /// Called when the visible alert level changes, before `publish`
    fn on_transition(&mut self, _transition: &AlertTransition) {}
}

impl<S: SensorSource + ?Sized> SensorSource for &mut S {
    type Error = S::Error;

    fn poll_sample(&mut self) -> nb::Result<FeatureSample, Self::Error> {
        (**self).poll_sample()
    }
}

impl<K: AlertSink + ?Sized> AlertSink for &mut K {
    fn publish(&mut self, output: &EngineOutput) {
        (**self).publish(output)
    }

    fn on_transition(&mut self, transition: &AlertTransition) {
        (**self).on_transition(transition)
    }
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AlertSink for NullSink {
    fn publish(&mut self, _output: &EngineOutput) {}
}
