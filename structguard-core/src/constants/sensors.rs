//! Sensor Specifications and Limits
//!
//! Plausible ranges used to reject readings before they reach a filter, and
//! the raw-to-feature scale factors of the acquisition front end.

// ===== ULTRASONIC DISTANCE (deflection) =====

/// Minimum distance an ultrasonic ranger reports reliably (cm).
///
/// Source: HC-SR04 datasheet (2 cm - 400 cm)
pub const ULTRASONIC_MIN_CM: f32 = 2.0;

/// Maximum distance an ultrasonic ranger reports reliably (cm).
///
/// An echo timeout shows up as a reading far beyond this.
///
/// Source: HC-SR04 datasheet
pub const ULTRASONIC_MAX_CM: f32 = 400.0;

// ===== ANALOG FRONT END =====

/// Full-scale value of a 10-bit ADC.
pub const ADC_FULL_SCALE: f32 = 1023.0;

/// Scale from vibration ADC counts to model units.
pub const VIBRATION_ADC_SCALE: f32 = 1.0 / 100.0;

/// Scale from load-cell ADC counts to model units.
pub const LOAD_ADC_SCALE: f32 = 1.0 / 150.0;

/// Scale from ADC counts to a 0-1 normalized feature.
pub const NORMALIZED_ADC_SCALE: f32 = 1.0 / ADC_FULL_SCALE;

// ===== TEMPERATURE =====

/// Lowest temperature a DHT11 reports (°C).
///
/// Source: DHT11 datasheet (0-50 °C)
pub const DHT11_MIN_C: f32 = 0.0;

/// Highest temperature a DHT11 reports (°C).
pub const DHT11_MAX_C: f32 = 50.0;
