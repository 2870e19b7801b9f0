//! Error Types for Configuration and Sensor Failures
//!
//! ## Design Philosophy
//!
//! StructGuard's errors follow the same embedded-first rules as the rest of the
//! crate:
//!
//! 1. **No Heap Allocation**: variants carry inline data only (`f32`, `usize`,
//!    `&'static str`, [`FeatureName`]).
//! 2. **Copy Semantics**: errors are cheap to return from the tick path and to
//!    stash in diagnostics.
//! 3. **Fatal vs Recoverable**: the two severities never share a type.
//!
//! ## Error Categories
//!
//! ### Fatal (construction time)
//! - [`ConfigError`]: the engine refuses to exist with a misordered threshold,
//!   an empty window, an α outside (0, 1], a weight without a feature...
//!
//! ### Recoverable (per tick)
//! - [`SensorError`]: a reading outside its plausible range, a NaN from a
//!   failed temperature read, or an echo timeout. The reading is dropped from
//!   the filter and the tick carries on.
//! - [`SampleError`]: the sensor collaborator tried to put something into a
//!   [`FeatureSample`](crate::events::FeatureSample) that does not fit.
//!
//! Numeric overflow in the logistic scorer is guarded internally and never
//! surfaces as an error.
//!
//! ## Handling Strategy
//!
//! ```rust
//! use structguard_core::{ConfigError, Engine, EngineConfig};
//!
//! let mut config = EngineConfig::smoothed_hysteresis();
//! config.alert.safe_exit = 45.0; // above high_enter = 40
//!
//! match Engine::new(config) {
//!     Ok(_) => unreachable!(),
//!     Err(ConfigError::ThresholdOrder { transition, .. }) => {
//!         assert_eq!(transition, "warning/safe");
//!     }
//!     Err(other) => panic!("unexpected: {other}"),
//! }
//! ```

use thiserror_no_std::Error;

use crate::events::FeatureName;

/// Result type for construction-time operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Invalid engine configuration. Always fatal: the engine is not built.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Exit threshold is not strictly below the enter threshold of the same transition
    #[error("Threshold order violated for {transition}: exit {exit} must be below enter {enter}")]
    ThresholdOrder {
        /// Transition pair being checked, e.g. "warning/safe"
        transition: &'static str,
        /// Enter threshold (risk %)
        enter: f32,
        /// Exit threshold (risk %)
        exit: f32,
    },

    /// Threshold outside the risk-percent scale or not a number
    #[error("Threshold {value} outside [0, 100]")]
    ThresholdOutOfRange {
        /// Offending threshold
        value: f32,
    },

    /// Moving-average window outside `1..=max`
    #[error("Filter window {window} outside [1, {max}]")]
    InvalidWindow {
        /// Requested window length
        window: usize,
        /// Compile-time buffer capacity
        max: usize,
    },

    /// Exponential smoothing coefficient outside (0, 1]
    #[error("Smoothing alpha {alpha} outside (0, 1]")]
    InvalidAlpha {
        /// Requested coefficient
        alpha: f32,
    },

    /// Plausible-range bounds are inverted or not finite
    #[error("Valid range [{min}, {max}] is empty or not finite")]
    InvalidRange {
        /// Lower bound
        min: f32,
        /// Upper bound
        max: f32,
    },

    /// Fatigue policy parameter is inconsistent
    #[error("Fatigue policy invalid: {reason}")]
    InvalidFatiguePolicy {
        /// What is wrong with it
        reason: &'static str,
    },

    /// Engine-level scalar (design years, tick interval, scale, weight) is invalid
    #[error("Invalid parameter: {reason}")]
    InvalidParameter {
        /// Which parameter
        reason: &'static str,
    },

    /// No features configured
    #[error("No features configured")]
    NoFeatures,

    /// More features than the fixed-capacity tables can hold
    #[error("Too many features: {count} > {max}")]
    TooManyFeatures {
        /// Requested feature count
        count: usize,
        /// Capacity
        max: usize,
    },

    /// Feature name configured twice
    #[error("Duplicate feature '{feature}'")]
    DuplicateFeature {
        /// Repeated name
        feature: FeatureName,
    },

    /// Risk model weights a feature that is not configured
    #[error("Weight given for unknown feature '{feature}'")]
    UnknownFeature {
        /// Name found in the model but not in the feature list
        feature: FeatureName,
    },

    /// Configured feature has no weight in the risk model
    #[error("Feature '{feature}' has no model weight")]
    MissingWeight {
        /// Unweighted feature
        feature: FeatureName,
    },

    /// Fatigue source names a feature that is not configured
    #[error("Fatigue source '{feature}' is not a configured feature")]
    UnknownFatigueSource {
        /// Name given as fatigue source
        feature: FeatureName,
    },

    /// Configuration text could not be parsed
    #[error("Configuration parse failed")]
    Parse,
}

/// A single raw reading that cannot be used this tick. Recoverable.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SensorError {
    /// Reading outside the configured plausible range
    #[error("Reading {value} outside plausible range [{min}, {max}]")]
    OutOfRange {
        /// Raw (scaled) value
        value: f32,
        /// Lower plausible bound
        min: f32,
        /// Upper plausible bound
        max: f32,
    },

    /// NaN or infinity from the acquisition layer
    #[error("Reading is not a finite number")]
    NotFinite,

    /// The sensor produced nothing this tick (e.g. echo timeout)
    #[error("No reading this tick")]
    Missing,
}

/// Failure while assembling a [`FeatureSample`](crate::events::FeatureSample)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleError {
    /// Name longer than [`MAX_FEATURE_NAME`](crate::events::MAX_FEATURE_NAME) bytes
    #[error("Feature name too long")]
    NameTooLong,

    /// Sample already holds [`MAX_FEATURES`](crate::constants::buffers::MAX_FEATURES) readings
    #[error("Sample is full")]
    Full,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ThresholdOrder { transition, enter, exit } =>
                defmt::write!(fmt, "{}: exit {} !< enter {}", transition, exit, enter),
            Self::ThresholdOutOfRange { value } =>
                defmt::write!(fmt, "Threshold {} outside [0, 100]", value),
            Self::InvalidWindow { window, max } =>
                defmt::write!(fmt, "Window {} outside [1, {}]", window, max),
            Self::InvalidAlpha { alpha } =>
                defmt::write!(fmt, "Alpha {} outside (0, 1]", alpha),
            Self::InvalidRange { min, max } =>
                defmt::write!(fmt, "Range [{}, {}] invalid", min, max),
            Self::InvalidFatiguePolicy { reason } =>
                defmt::write!(fmt, "Fatigue policy: {}", reason),
            Self::InvalidParameter { reason } =>
                defmt::write!(fmt, "Parameter: {}", reason),
            Self::NoFeatures =>
                defmt::write!(fmt, "No features"),
            Self::TooManyFeatures { count, max } =>
                defmt::write!(fmt, "{} features > {}", count, max),
            Self::DuplicateFeature { feature } =>
                defmt::write!(fmt, "Duplicate feature {}", feature.as_str()),
            Self::UnknownFeature { feature } =>
                defmt::write!(fmt, "Unknown feature {}", feature.as_str()),
            Self::MissingWeight { feature } =>
                defmt::write!(fmt, "No weight for {}", feature.as_str()),
            Self::UnknownFatigueSource { feature } =>
                defmt::write!(fmt, "Unknown fatigue source {}", feature.as_str()),
            Self::Parse =>
                defmt::write!(fmt, "Parse failed"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::OutOfRange { value, min, max } =>
                defmt::write!(fmt, "Reading {} outside [{}, {}]", value, min, max),
            Self::NotFinite =>
                defmt::write!(fmt, "Reading not finite"),
            Self::Missing =>
                defmt::write!(fmt, "No reading"),
        }
    }
}
