//! Fatigue Accumulator Defaults
//!
//! Fatigue is a 0-100 index of cumulative structural wear. These values are
//! tuned for deflection measured in centimetres at 1 Hz.

/// Lower bound of the fatigue index.
pub const FATIGUE_MIN: f32 = 0.0;

/// Upper bound of the fatigue index (fully consumed service life).
pub const FATIGUE_MAX: f32 = 100.0;

/// Signal magnitude above which wear accrues (cm).
pub const DEFAULT_ACCRUAL_THRESHOLD: f32 = 2.0;

/// Signal magnitude below which the index recovers (cm).
///
/// The band between this and [`DEFAULT_ACCRUAL_THRESHOLD`] is inert.
pub const DEFAULT_RECOVERY_THRESHOLD: f32 = 1.0;

/// Index points added per unit of signal per tick (linear curve).
pub const DEFAULT_ACCRUAL_GAIN: f32 = 0.05;

/// Index points added per unit of squared signal per tick (squared curve).
///
/// Squared accrual penalizes large deflections superlinearly, the "fast
/// degradation" behaviour.
pub const DEFAULT_SQUARED_ACCRUAL_GAIN: f32 = 0.02;

/// Index points removed per quiet tick.
pub const DEFAULT_RECOVERY_RATE: f32 = 0.01;

/// Default service life of the monitored structure (years).
pub const DEFAULT_DESIGN_YEARS: f32 = 50.0;
