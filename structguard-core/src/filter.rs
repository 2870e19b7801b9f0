//! Feature Filters
//!
//! Smooths a raw scalar stream before it reaches the fatigue accumulator and
//! the scorer. One filter per tracked feature, updated once per tick.
//!
//! ## Modes
//!
//! ### Moving average
//! Mean of the last N *valid* samples. Readings outside the plausible range
//! (or NaN) take their turn in the window but contribute nothing:
//!
//! ```text
//! window 5:  10 10 10 10 10          → 10.0
//! then 1000 (range [2, 400]):        → mean of the 4 remaining 10s = 10.0
//! ```
//!
//! If every slot in the window is invalid the filter holds its last good
//! output, or the configured fallback (typically the deflection baseline)
//! before any good output exists. It never divides by zero.
//!
//! ### Exponential
//! `s' = α·raw + (1 − α)·s`, seeded with the first finite reading. No range
//! rejection; only NaN/Inf is ignored so it cannot poison the state.
//!
//! ## Finite Output
//!
//! Both smoothing modes compute in `f64`, so large finite readings cannot
//! overflow the window sum or the blend. A non-finite result is never stored.
//!
//! ## Missing Readings
//!
//! [`Reading::Missing`] means no sample happened: the window does not advance
//! and the current output is returned unchanged. Such ticks are counted
//! separately from rejected readings.

use crate::buffer::CircularBuffer;
use crate::constants::buffers::MAX_FILTER_WINDOW;
use crate::errors::{ConfigError, ConfigResult, SensorError};
use crate::events::Reading;
use crate::validation::{check_reading, Validatable};

/// Filter mode and its fixed parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FilterMode {
    /// Arithmetic mean over the last `window` samples
    MovingAverage {
        /// Window length N, `1..=MAX_FILTER_WINDOW`
        window: usize,
        /// Inclusive plausible range `(min, max)`; readings outside are rejected
        #[cfg_attr(feature = "serde", serde(default))]
        valid_range: Option<(f32, f32)>,
    },
    /// Exponential smoothing with coefficient α in (0, 1]
    Exponential {
        /// Weight of the newest sample
        alpha: f32,
    },
    /// No smoothing; the latest finite reading passes through
    Passthrough,
}

impl FilterMode {
    /// Check the parameters without building a filter
    pub fn validate(&self) -> ConfigResult<()> {
        match *self {
            FilterMode::MovingAverage { window, valid_range } => {
                if window == 0 || window > MAX_FILTER_WINDOW {
                    return Err(ConfigError::InvalidWindow {
                        window,
                        max: MAX_FILTER_WINDOW,
                    });
                }
                if let Some((min, max)) = valid_range {
                    if !min.is_valid() || !max.is_valid() || min > max {
                        return Err(ConfigError::InvalidRange { min, max });
                    }
                }
                Ok(())
            }
            FilterMode::Exponential { alpha } => {
                // NaN fails both comparisons, so check the accepted interval directly
                if alpha > 0.0 && alpha <= 1.0 {
                    Ok(())
                } else {
                    Err(ConfigError::InvalidAlpha { alpha })
                }
            }
            FilterMode::Passthrough => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
enum FilterState {
    MovingAverage {
        window: CircularBuffer<MAX_FILTER_WINDOW>,
        valid_range: Option<(f32, f32)>,
    },
    Exponential {
        alpha: f32,
        smoothed: Option<f32>,
    },
    Passthrough,
}

/// Smoother for one feature stream
#[derive(Debug, Clone)]
pub struct FeatureFilter {
    state: FilterState,
    /// Last finite output
    last_output: Option<f32>,
    /// Output before any valid sample was seen
    fallback: f32,
    /// Readings rejected since construction
    rejected: u32,
    /// Ticks with no reading since construction
    missing: u32,
}

impl FeatureFilter {
    /// Build a filter; fails on invalid window, α or range
    pub fn new(mode: FilterMode, fallback: f32) -> ConfigResult<Self> {
        mode.validate()?;

        if !fallback.is_valid() {
            return Err(ConfigError::InvalidParameter {
                reason: "filter fallback must be finite",
            });
        }

        let state = match mode {
            FilterMode::MovingAverage { window, valid_range } => FilterState::MovingAverage {
                window: CircularBuffer::with_window(window).ok_or(ConfigError::InvalidWindow {
                    window,
                    max: MAX_FILTER_WINDOW,
                })?,
                valid_range,
            },
            FilterMode::Exponential { alpha } => FilterState::Exponential {
                alpha,
                smoothed: None,
            },
            FilterMode::Passthrough => FilterState::Passthrough,
        };

        Ok(Self {
            state,
            last_output: None,
            fallback,
            rejected: 0,
            missing: 0,
        })
    }

    /// Feed one raw value, return the smoothed value
    ///
    /// The output is always finite: a result that does not fit an `f32` is
    /// discarded and the previous output is held.
    pub fn update(&mut self, raw: f32) -> f32 {
        let next = match &mut self.state {
            FilterState::MovingAverage { window, valid_range } => {
                match check_reading(raw, *valid_range) {
                    Ok(value) => window.push(Some(value)),
                    Err(e) => {
                        window.push(None);
                        reject(&mut self.rejected, e);
                    }
                }
                window.valid_mean()
            }
            FilterState::Exponential { alpha, smoothed } => {
                if raw.is_valid() {
                    let next = match *smoothed {
                        // Convex combination in f64 stays between prev and raw
                        Some(prev) => {
                            let a = f64::from(*alpha);
                            (a * f64::from(raw) + (1.0 - a) * f64::from(prev)) as f32
                        }
                        None => raw,
                    };
                    if next.is_valid() {
                        *smoothed = Some(next);
                    }
                    Some(next)
                } else {
                    reject(&mut self.rejected, SensorError::NotFinite);
                    None
                }
            }
            FilterState::Passthrough => {
                if raw.is_valid() {
                    Some(raw)
                } else {
                    reject(&mut self.rejected, SensorError::NotFinite);
                    None
                }
            }
        };

        match next {
            Some(value) if value.is_valid() => self.last_output = Some(value),
            Some(_value) => log_warn!("Filter output {} not finite, holding previous", _value),
            None => {}
        }

        self.current()
    }

    /// Feed a reading that may be missing
    pub fn update_reading(&mut self, reading: Reading) -> f32 {
        match reading {
            Reading::Value(raw) => self.update(raw),
            Reading::Missing => {
                self.missing = self.missing.saturating_add(1);
                log_debug!("Filter holding output: {}", SensorError::Missing);
                self.current()
            }
        }
    }

    /// Current output without feeding anything
    pub fn current(&self) -> f32 {
        self.last_output.unwrap_or(self.fallback)
    }

    /// True once at least one valid sample has been filtered
    pub fn has_output(&self) -> bool {
        self.last_output.is_some()
    }

    /// Readings rejected since construction or the last reset
    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    /// Ticks that delivered no reading since construction or the last reset
    pub fn missing(&self) -> u32 {
        self.missing
    }

    /// Replace the pre-data fallback
    pub fn set_fallback(&mut self, fallback: f32) {
        if fallback.is_valid() {
            self.fallback = fallback;
        }
    }

    /// Drop all history; parameters are kept
    pub fn reset(&mut self) {
        match &mut self.state {
            FilterState::MovingAverage { window, .. } => window.clear(),
            FilterState::Exponential { smoothed, .. } => *smoothed = None,
            FilterState::Passthrough => {}
        }
        self.last_output = None;
        self.rejected = 0;
        self.missing = 0;
    }
}

fn reject(counter: &mut u32, _error: SensorError) {
    *counter = counter.saturating_add(1);
    log_debug!("Filter rejected reading: {}", _error);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving_average(window: usize, range: Option<(f32, f32)>) -> FeatureFilter {
        FeatureFilter::new(
            FilterMode::MovingAverage {
                window,
                valid_range: range,
            },
            0.0,
        )
        .unwrap()
    }

    #[test]
    fn moving_average_steady_input() {
        let mut filter = moving_average(5, Some((2.0, 400.0)));
        let mut out = 0.0;
        for _ in 0..5 {
            out = filter.update(10.0);
        }
        assert_eq!(out, 10.0);
    }

    #[test]
    fn invalid_reading_excluded_from_mean() {
        let mut filter = moving_average(5, Some((2.0, 400.0)));
        for v in [10.0, 12.0, 14.0, 16.0, 18.0] {
            filter.update(v);
        }

        // Evicts the 10.0, leaves 12, 14, 16, 18
        let out = filter.update(1000.0);
        assert_eq!(out, 15.0);
        assert_eq!(filter.rejected(), 1);
    }

    #[test]
    fn all_invalid_holds_last_good_value() {
        let mut filter = moving_average(3, Some((2.0, 400.0)));
        filter.update(20.0);
        filter.update(22.0);

        assert_eq!(filter.update(0.0), 21.0); // [20, 22, -]
        assert_eq!(filter.update(0.0), 22.0); // [-, 22, -]

        // Whole window invalid from here on
        for _ in 0..10 {
            assert_eq!(filter.update(0.0), 22.0);
        }
    }

    #[test]
    fn fallback_before_any_valid_sample() {
        let mut filter = FeatureFilter::new(
            FilterMode::MovingAverage {
                window: 4,
                valid_range: Some((2.0, 400.0)),
            },
            18.5,
        )
        .unwrap();

        assert_eq!(filter.update(f32::NAN), 18.5);
        assert_eq!(filter.update(900.0), 18.5);
        assert!(!filter.has_output());
    }

    #[test]
    fn exponential_smoothing() {
        let mut filter = FeatureFilter::new(FilterMode::Exponential { alpha: 0.5 }, 0.0).unwrap();

        assert_eq!(filter.update(10.0), 10.0); // seeds
        assert_eq!(filter.update(20.0), 15.0);
        assert_eq!(filter.update(20.0), 17.5);

        // NaN is ignored
        assert_eq!(filter.update(f32::NAN), 17.5);
    }

    #[test]
    fn alpha_one_tracks_input() {
        let mut filter = FeatureFilter::new(FilterMode::Exponential { alpha: 1.0 }, 0.0).unwrap();
        filter.update(3.0);
        assert_eq!(filter.update(7.0), 7.0);
    }

    #[test]
    fn missing_reading_does_not_advance() {
        let mut filter = moving_average(2, None);
        filter.update(4.0);
        filter.update(6.0);

        assert_eq!(filter.update_reading(Reading::Missing), 5.0);
        assert_eq!(filter.missing(), 1);
        assert_eq!(filter.rejected(), 0);
        // Window still holds [4, 6]
        assert_eq!(filter.update(8.0), 7.0);
    }

    #[test]
    fn unbounded_moving_average_near_f32_max_stays_finite() {
        let mut filter = moving_average(2, None);

        assert_eq!(filter.update(1e38), 1e38);
        let out = filter.update(f32::MAX);
        assert!(out.is_finite());
        assert!(out > 1e38);

        let out = filter.update(f32::MAX);
        assert_eq!(out, f32::MAX);
    }

    #[test]
    fn exponential_near_f32_max_stays_finite() {
        let mut filter = FeatureFilter::new(FilterMode::Exponential { alpha: 0.3 }, 0.0).unwrap();

        filter.update(f32::MAX);
        assert_eq!(filter.update(f32::MAX), f32::MAX);
        let out = filter.update(-f32::MAX);
        assert!(out.is_finite());
        assert!(out < f32::MAX);
    }

    #[test]
    fn passthrough_counts_non_finite() {
        let mut filter = FeatureFilter::new(FilterMode::Passthrough, 1.0).unwrap();

        assert_eq!(filter.update(f32::INFINITY), 1.0);
        assert_eq!(filter.update(4.0), 4.0);
        assert_eq!(filter.update(f32::NAN), 4.0);
        assert_eq!(filter.rejected(), 2);
    }

    #[test]
    fn construction_rejects_bad_parameters() {
        assert!(matches!(
            FeatureFilter::new(FilterMode::MovingAverage { window: 0, valid_range: None }, 0.0),
            Err(ConfigError::InvalidWindow { .. })
        ));
        assert!(matches!(
            FeatureFilter::new(FilterMode::MovingAverage { window: 1000, valid_range: None }, 0.0),
            Err(ConfigError::InvalidWindow { .. })
        ));
        assert!(matches!(
            FeatureFilter::new(FilterMode::Exponential { alpha: 0.0 }, 0.0),
            Err(ConfigError::InvalidAlpha { .. })
        ));
        assert!(matches!(
            FeatureFilter::new(FilterMode::Exponential { alpha: 1.5 }, 0.0),
            Err(ConfigError::InvalidAlpha { .. })
        ));
        assert!(matches!(
            FeatureFilter::new(FilterMode::Exponential { alpha: f32::NAN }, 0.0),
            Err(ConfigError::InvalidAlpha { .. })
        ));
        assert!(matches!(
            FeatureFilter::new(
                FilterMode::MovingAverage { window: 5, valid_range: Some((400.0, 2.0)) },
                0.0
            ),
            Err(ConfigError::InvalidRange { .. })
        ));
    }

    #[test]
    fn reset_clears_history() {
        let mut filter = moving_average(3, None);
        filter.update(9.0);
        filter.update_reading(Reading::Missing);
        filter.reset();

        assert!(!filter.has_output());
        assert_eq!(filter.missing(), 0);
        assert_eq!(filter.current(), 0.0);
    }
}
