//! Structural risk assessment engine for StructGuard
//!
//! Turns noisy low-rate sensor readings from a monitored structure (bridge,
//! beam) into a bounded fatigue index, a logistic collapse-risk score and a
//! debounced SAFE / WARNING / DANGER alert level.
//!
//! Key constraints:
//! - Runs on microcontrollers (no heap on the tick path)
//! - Single-threaded, non-blocking tick cadence
//! - No NaN/Inf ever reaches the alert output
//!
//! ```no_run
//! use structguard_core::{Engine, EngineConfig, FeatureSample};
//!
//! let mut engine = Engine::new(EngineConfig::deflection_fusion())?;
//!
//! let sample = FeatureSample::new()
//!     .with("vibration", 512.0) // raw ADC counts
//!     .with("load", 480.0)
//!     .with("distance", 18.2)
//!     .with_crack(false);
//!
//! let output = engine.process(&sample, 1_000);
//! println!("risk {:.1}% -> {}", output.risk_percent, output.alert);
//! # Ok::<(), structguard_core::ConfigError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod alert;
pub mod buffer;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod events;
pub mod fatigue;
pub mod filter;
pub mod monitor;
pub mod scoring;
pub mod time;
pub mod traits;
pub mod validation;

// Public API
pub use alert::{AlertLevel, AlertStateMachine, AlertThresholds};
pub use config::{EngineConfig, FeatureConfig, FeatureRole, FilterConfig};
pub use engine::Engine;
pub use errors::{ConfigError, ConfigResult, SampleError, SensorError};
pub use events::{AlertTransition, EngineOutput, FeatureName, FeatureSample, Reading};
pub use fatigue::{FatigueAccumulator, FatigueCurve, FatiguePolicy};
pub use filter::{FeatureFilter, FilterMode};
pub use monitor::Monitor;
pub use scoring::{RiskModel, RiskScore, RiskScorer};
pub use traits::{AlertSink, SensorSource, TimeSource};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
