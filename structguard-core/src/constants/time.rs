//! Time-Related Constants

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Default tick interval (milliseconds).
///
/// Most presets sample at 1 Hz.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Fast tick interval used by the smoothing preset (milliseconds).
pub const FAST_TICK_INTERVAL_MS: u64 = 500;
