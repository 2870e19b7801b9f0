//! Per-Tick Data: Samples In, Output Out
//!
//! ## Overview
//!
//! Two values cross the engine boundary every tick:
//!
//! ```text
//! SensorSource ──FeatureSample──▶ Engine ──EngineOutput──▶ AlertSink
//!                                   │
//!                                   └──AlertTransition (on level change)
//! ```
//!
//! Both are ephemeral: built, consumed and dropped within one tick.
//!
//! ### Memory Model
//!
//! - **Inline names**: [`FeatureName`] stores up to 15 bytes in place
//! - **Bounded samples**: a sample holds at most
//!   [`MAX_FEATURES`](crate::constants::buffers::MAX_FEATURES) readings in a
//!   `heapless::Vec`
//! - **Copy output**: [`EngineOutput`] is a handful of floats and an enum

use core::fmt;

use heapless::Vec;

use crate::alert::AlertLevel;
use crate::constants::buffers::MAX_FEATURES;
use crate::errors::SampleError;
use crate::time::Timestamp;

/// Maximum length for inline feature names
pub const MAX_FEATURE_NAME: usize = 15;

/// Inline feature name ("vibration", "distance", ...)
///
/// Avoids heap allocation for the short identifiers used as model keys.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureName {
    len: u8,
    data: [u8; MAX_FEATURE_NAME],
}

impl FeatureName {
    /// Create from string slice; `None` if longer than [`MAX_FEATURE_NAME`]
    pub fn new(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() > MAX_FEATURE_NAME {
            return None;
        }

        let mut data = [0u8; MAX_FEATURE_NAME];
        data[..bytes.len()].copy_from_slice(bytes);

        Some(Self {
            len: bytes.len() as u8,
            data,
        })
    }

    /// Build a name in const context
    ///
    /// # Panics
    ///
    /// If `s` is longer than [`MAX_FEATURE_NAME`]. Bind the result to a
    /// `const` so the check happens at compile time.
    pub const fn from_static(s: &'static str) -> Self {
        let bytes = s.as_bytes();
        assert!(bytes.len() <= MAX_FEATURE_NAME, "feature name too long");

        let mut data = [0u8; MAX_FEATURE_NAME];
        let mut i = 0;
        while i < bytes.len() {
            data[i] = bytes[i];
            i += 1;
        }

        Self {
            len: bytes.len() as u8,
            data,
        }
    }

    /// Get as string slice
    pub fn as_str(&self) -> &str {
        // Bytes always come from a &str, truncation never splits a char
        core::str::from_utf8(&self.data[..self.len as usize]).unwrap_or("")
    }
}

impl PartialEq<str> for FeatureName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for FeatureName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Debug for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FeatureName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FeatureName {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NameVisitor;

        impl<'de> serde::de::Visitor<'de> for NameVisitor {
            type Value = FeatureName;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a feature name of at most {} bytes", MAX_FEATURE_NAME)
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<FeatureName, E> {
                FeatureName::new(v).ok_or_else(|| E::invalid_length(v.len(), &self))
            }
        }

        deserializer.deserialize_str(NameVisitor)
    }
}

/// One raw reading: a value or the "no reading this tick" sentinel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// Sampled value in sensor units (before scaling)
    Value(f32),
    /// Timeout or acquisition failure
    Missing,
}

impl Reading {
    /// The value, if present
    pub fn value(&self) -> Option<f32> {
        match self {
            Reading::Value(v) => Some(*v),
            Reading::Missing => None,
        }
    }
}

impl From<f32> for Reading {
    fn from(value: f32) -> Self {
        Reading::Value(value)
    }
}

impl From<Option<f32>> for Reading {
    fn from(value: Option<f32>) -> Self {
        value.map_or(Reading::Missing, Reading::Value)
    }
}

/// Everything the sensors produced for one tick
///
/// Features not present in the sample are treated as [`Reading::Missing`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSample {
    readings: Vec<(FeatureName, Reading), MAX_FEATURES>,
    crack: Option<bool>,
}

impl FeatureSample {
    /// Empty sample: every feature missing, crack state unknown
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a reading, replacing any earlier one for the same name
    pub fn insert(&mut self, name: &str, reading: Reading) -> Result<(), SampleError> {
        let name = FeatureName::new(name).ok_or(SampleError::NameTooLong)?;

        if let Some(slot) = self.readings.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = reading;
            return Ok(());
        }

        self.readings
            .push((name, reading))
            .map_err(|_| SampleError::Full)
    }

    /// Builder form of [`insert`](Self::insert) with a value
    ///
    /// A reading that does not fit is dropped (and logged); the engine then
    /// sees that feature as missing.
    pub fn with(mut self, name: &str, value: f32) -> Self {
        if let Err(_e) = self.insert(name, Reading::Value(value)) {
            log_warn!("Dropping reading for '{}': {}", name, _e);
        }
        self
    }

    /// Builder form of [`insert`](Self::insert) with the missing sentinel
    pub fn with_missing(mut self, name: &str) -> Self {
        if let Err(_e) = self.insert(name, Reading::Missing) {
            log_warn!("Dropping reading for '{}': {}", name, _e);
        }
        self
    }

    /// Set the crack detector state
    pub fn with_crack(mut self, crack: bool) -> Self {
        self.crack = Some(crack);
        self
    }

    /// Set the crack detector state in place
    pub fn set_crack(&mut self, crack: Option<bool>) {
        self.crack = crack;
    }

    /// Reading for `name`, [`Reading::Missing`] if absent
    pub fn get(&self, name: &FeatureName) -> Reading {
        self.readings
            .iter()
            .find(|(n, _)| n == name)
            .map_or(Reading::Missing, |(_, r)| *r)
    }

    /// Crack detector state, `None` if no crack sensor reported
    pub fn crack(&self) -> Option<bool> {
        self.crack
    }

    /// Number of readings carried
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// True if no readings were set
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Iterate over `(name, reading)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &(FeatureName, Reading)> {
        self.readings.iter()
    }
}

/// A change of the externally visible alert level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlertTransition {
    /// Level before the tick
    pub from: AlertLevel,
    /// Level after the tick
    pub to: AlertLevel,
    /// Tick time
    pub timestamp: Timestamp,
}

impl AlertTransition {
    /// True if the new level is more severe
    pub fn is_escalation(&self) -> bool {
        self.to > self.from
    }
}

/// Result of one tick, handed to reporting and actuation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EngineOutput {
    /// Tick time
    pub timestamp: Timestamp,
    /// Collapse probability as a percentage, [0, 100]
    pub risk_percent: f32,
    /// Accumulated fatigue, [0, 100]
    pub fatigue_index: f32,
    /// `100 - fatigue_index`, [0, 100]
    pub remaining_life: f32,
    /// `remaining_life / 100 * design years`, >= 0
    pub remaining_years: f32,
    /// Externally visible alert level
    pub alert: AlertLevel,
    /// DANGER enter condition holds but dwell has not elapsed
    pub escalation_pending: bool,
    /// Level change produced by this tick, if any
    pub transition: Option<AlertTransition>,
}

impl EngineOutput {
    /// Collapse probability in [0, 1]
    pub fn probability(&self) -> f32 {
        self.risk_percent / 100.0
    }
}
