//! Risk Model Coefficients and Numeric Guards
//!
//! Coefficients are pre-trained offline; the engine never updates them.

/// Logit clamp applied before exponentiation.
///
/// `e^60` is about 1.1e26, comfortably inside f32 range, and the sigmoid is
/// already saturated far below that.
pub const LOGIT_CLAMP: f32 = 60.0;

/// Smallest probability the scorer reports.
///
/// Keeps the output strictly inside (0, 1) after f32 rounding.
pub const MIN_PROBABILITY: f32 = f32::EPSILON;

/// Largest probability the scorer reports.
pub const MAX_PROBABILITY: f32 = 1.0 - f32::EPSILON;

// ===== WEIGHTED-SUM PRESET COEFFICIENTS =====
//
// Trained on vibration (ADC/100), temperature (°C), load (ADC/150) and
// elapsed duration (s).

/// Weight of scaled vibration amplitude.
pub const W_VIBRATION: f32 = 0.7;

/// Weight of ambient temperature (°C).
pub const W_TEMPERATURE: f32 = 0.03;

/// Weight of scaled load.
pub const W_LOAD: f32 = 0.5;

/// Weight of elapsed vibration duration (s).
pub const W_DURATION: f32 = 0.02;

/// Intercept of the weighted-sum model.
pub const BIAS: f32 = -8.0;

// ===== FUSION PRESET COEFFICIENTS =====
//
// Vibration and load normalized to 0-1, deflection in cm, crack as 0/1.

/// Weight of normalized vibration.
pub const FUSION_W_VIBRATION: f32 = 5.4;

/// Weight of normalized load.
pub const FUSION_W_LOAD: f32 = 4.8;

/// Weight of deflection magnitude (cm).
pub const FUSION_W_DEFLECTION: f32 = 0.6;

/// Weight of a closed crack circuit.
pub const FUSION_W_CRACK: f32 = 3.0;

/// Intercept of the fusion model.
pub const FUSION_BIAS: f32 = -4.2;
