//! Collaborator Traits
//!
//! The engine is pure computation. Everything that touches hardware sits
//! behind one of these traits:
//!
//! - [`time`] - monotonic clock
//! - [`collaborators`] - sensor acquisition and alert actuation
//!
//! ## Design Philosophy
//!
//! - **Pull-based sensing**: the orchestrator asks for a sample when a tick is
//!   due; sensors never push
//! - **Non-blocking**: `nb::Result` signals "not ready" without a runtime
//! - **Static dispatch**: the monitor is generic over its collaborators
//!
//! ## Usage Example
//!
//! ```rust
//! use structguard_core::traits::{AlertSink, SensorSource};
//! use structguard_core::{EngineOutput, FeatureSample};
//!
//! struct Pot(f32);
//!
//! impl SensorSource for Pot {
//!     type Error = ();
//!
//!     fn poll_sample(&mut self) -> nb::Result<FeatureSample, ()> {
//!         Ok(FeatureSample::new().with("load", self.0))
//!     }
//! }
//!
//! struct Leds;
//!
//! impl AlertSink for Leds {
//!     fn publish(&mut self, output: &EngineOutput) {
//!         // drive green/yellow/red from output.alert
//!         let _ = output.alert;
//!     }
//! }
//! ```

pub mod collaborators;
pub mod time;

pub use collaborators::{AlertSink, SensorSource};
pub use time::TimeSource;
