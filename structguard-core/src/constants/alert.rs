//! Alert Thresholds
//!
//! All thresholds are collapse-risk percentages (0-100). Each transition has
//! an enter and an exit threshold; the gap between them is the dead band that
//! keeps the alert output from flapping when risk hovers at a boundary.

/// Risk above which SAFE escalates to WARNING (%).
pub const HIGH_ENTER_PCT: f32 = 40.0;

/// Risk above which WARNING escalates to DANGER (%).
pub const DANGER_ENTER_PCT: f32 = 70.0;

/// Risk below which WARNING relaxes to SAFE (%).
///
/// Must stay strictly below [`HIGH_ENTER_PCT`].
pub const SAFE_EXIT_PCT: f32 = 35.0;

/// Risk below which DANGER relaxes to WARNING (%).
///
/// Must stay strictly below [`DANGER_ENTER_PCT`].
pub const DANGER_EXIT_PCT: f32 = 65.0;

/// Sustained high risk required before DANGER becomes visible (ms).
///
/// A single noisy spike at 1 Hz sampling cannot hold the enter condition for
/// five consecutive ticks.
pub const DEFAULT_DANGER_DWELL_MS: u64 = 5000;

/// Dead band used by the presets that had no hysteresis at all (%).
///
/// Exit thresholds must sit strictly below enter thresholds, so the
/// threshold-only presets are modelled with a band this narrow.
pub const MINIMAL_DEAD_BAND_PCT: f32 = 0.1;
