//! Constants for StructGuard Core
//!
//! Centralized defaults for every tunable in the engine. Presets and
//! `Default` impls read from here so a value is only ever written down once.
//!
//! ## Organization
//!
//! - **Alert**: hysteresis thresholds and dwell time
//! - **Fatigue**: accrual/recovery policy defaults
//! - **Model**: logistic-regression coefficients and numeric guards
//! - **Sensors**: plausible ranges and raw-to-feature scaling
//! - **Time**: tick cadence and unit conversions
//! - **Buffers**: fixed capacities for no-heap operation
//!
//! ## Usage Guidelines
//!
//! 1. Use these constants instead of magic numbers
//! 2. Include units in the name (`_MS`, `_CM`, `_PCT`)
//! 3. Keep risk thresholds on the 0-100 percent scale

/// Alert state machine thresholds and dwell qualification.
pub mod alert;

/// Fixed capacities for bounded collections.
pub mod buffers;

/// Fatigue accumulator policy defaults.
pub mod fatigue;

/// Risk model coefficients and numeric guards.
pub mod model;

/// Sensor plausibility ranges and scaling.
pub mod sensors;

/// Tick cadence and time conversions.
pub mod time;

pub use alert::{
    DANGER_ENTER_PCT, DANGER_EXIT_PCT, HIGH_ENTER_PCT, SAFE_EXIT_PCT,
    DEFAULT_DANGER_DWELL_MS,
};

pub use buffers::{MAX_FEATURES, MAX_FILTER_WINDOW};

pub use model::{LOGIT_CLAMP, MAX_PROBABILITY, MIN_PROBABILITY};

pub use time::{DEFAULT_TICK_INTERVAL_MS, MS_PER_SECOND};
