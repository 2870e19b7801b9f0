//! Reading Plausibility Checks
//!
//! Shared checks applied to raw readings before they are allowed into a
//! filter. Pure functions, no allocation, safe to call from an interrupt
//! handler.
//!
//! ## Rejection Rules
//!
//! 1. **Not a number**: a failed DHT read returns NaN, a divide-by-zero in the
//!    acquisition layer returns infinity. Both are rejected outright.
//! 2. **Outside plausible range**: an ultrasonic echo timeout typically shows
//!    up as a huge distance. With a range of `[2, 400]` cm, a reading of 1000
//!    is rejected instead of dragging the average.
//!
//! ```rust
//! use structguard_core::validation::check_reading;
//! use structguard_core::SensorError;
//!
//! assert_eq!(check_reading(120.0, Some((2.0, 400.0))), Ok(120.0));
//! assert!(matches!(
//!     check_reading(1000.0, Some((2.0, 400.0))),
//!     Err(SensorError::OutOfRange { .. })
//! ));
//! assert_eq!(check_reading(f32::NAN, None), Err(SensorError::NotFinite));
//! ```

use crate::errors::SensorError;

/// Trait for values that can be checked for numeric sanity
pub trait Validatable {
    /// Check if the value is a usable number (not NaN, not infinite)
    fn is_valid(&self) -> bool;
}

impl Validatable for f32 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

/// Check if a value is within the specified inclusive range
pub fn check_range(value: f32, min: f32, max: f32) -> Result<(), SensorError> {
    if value < min || value > max {
        Err(SensorError::OutOfRange { value, min, max })
    } else {
        Ok(())
    }
}

/// Full plausibility check for one reading
///
/// Returns the reading unchanged when usable.
pub fn check_reading(value: f32, range: Option<(f32, f32)>) -> Result<f32, SensorError> {
    if !value.is_valid() {
        return Err(SensorError::NotFinite);
    }

    if let Some((min, max)) = range {
        check_range(value, min, max)?;
    }

    Ok(value)
}
