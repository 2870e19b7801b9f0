//! Monitor: Engine Plus Collaborators
//!
//! Bundles an [`Engine`] with its sensor source, alert sink and clock so the
//! main loop is a single non-blocking call:
//!
//! ```rust
//! use structguard_core::time::MockTimeSource;
//! use structguard_core::traits::collaborators::NullSink;
//! use structguard_core::traits::SensorSource;
//! use structguard_core::{Engine, EngineConfig, FeatureSample, Monitor};
//!
//! struct Fixed;
//!
//! impl SensorSource for Fixed {
//!     type Error = ();
//!
//!     fn poll_sample(&mut self) -> nb::Result<FeatureSample, ()> {
//!         Ok(FeatureSample::new()
//!             .with("vibration", 80.0)
//!             .with("load", 120.0)
//!             .with("distance", 18.0))
//!     }
//! }
//!
//! let clock = MockTimeSource::new(0);
//! let engine = Engine::new(EngineConfig::dwell_qualified())?;
//! let mut monitor = Monitor::new(engine, Fixed, NullSink, &clock);
//!
//! assert!(monitor.poll().is_ok());
//! assert!(monitor.poll().is_err()); // same instant, not due
//!
//! clock.advance(1000);
//! assert!(monitor.poll().is_ok());
//! # Ok::<(), structguard_core::ConfigError>(())
//! ```

use core::convert::Infallible;

use crate::engine::Engine;
use crate::events::EngineOutput;
use crate::traits::{AlertSink, SensorSource, TimeSource};

/// Engine wired to its sensors, actuators and clock
pub struct Monitor<S, K, T> {
    engine: Engine,
    source: S,
    sink: K,
    clock: T,
}

impl<S, K, T> Monitor<S, K, T>
where
    S: SensorSource,
    K: AlertSink,
    T: TimeSource,
{
    /// Wire up a monitor
    pub fn new(engine: Engine, source: S, sink: K, clock: T) -> Self {
        Self {
            engine,
            source,
            sink,
            clock,
        }
    }

    /// Run a tick if one is due and hand the output to the sink
    ///
    /// The sink sees `on_transition` first (when the level changed), then
    /// `publish`.
    pub fn poll(&mut self) -> nb::Result<EngineOutput, Infallible> {
        let now = self.clock.now();
        let output = self.engine.poll(&mut self.source, now)?;

        if let Some(transition) = output.transition.as_ref() {
            self.sink.on_transition(transition);
        }
        self.sink.publish(&output);

        Ok(output)
    }

    /// Engine state, for diagnostics
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Mutable engine access, e.g. for [`Engine::set_baseline`] or [`Engine::reset`]
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Sink, e.g. to inspect a recorder in tests
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Take the collaborators back
    pub fn release(self) -> (Engine, S, K, T) {
        (self.engine, self.source, self.sink, self.clock)
    }
}
