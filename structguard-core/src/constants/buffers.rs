//! Buffer Sizes and Memory Constraints
//!
//! Every collection on the tick path has a compile-time capacity so the engine
//! never allocates after construction.

/// Maximum number of tracked features per engine.
///
/// The presets use at most four (vibration, load, temperature,
/// deflection) plus the synthetic duration input.
///
/// Memory: one filter (~140 bytes) and one weight entry per slot.
pub const MAX_FEATURES: usize = 8;

/// Maximum moving-average window length.
///
/// Typical windows are 5-10 samples; 32 leaves headroom for slow structures
/// sampled faster than 1 Hz.
///
/// Memory: 32 × `Option<f32>` = 256 bytes per moving-average filter.
pub const MAX_FILTER_WINDOW: usize = 32;
