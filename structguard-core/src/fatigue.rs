//! Fatigue Accumulator
//!
//! Integrates structural wear into a bounded index. Wear accrues while the
//! filtered deflection-like signal is large, recovers slowly while it is
//! small, and does nothing in between:
//!
//! ```text
//!  signal ▲
//!         │  accrue: + gain · signal^p
//!  accrual ┼───────────────────────────
//!         │  dead band (no change)
//! recovery ┼───────────────────────────
//!         │  recover: − recovery_rate
//!         └──────────────────────────▶ time
//! ```
//!
//! The index is clamped to `[0, 100]` after every update. That clamp is the
//! invariant the rest of the engine leans on (remaining life = 100 − index),
//! so adversarial or non-finite signals must never push it outside.

use crate::constants::fatigue::{
    DEFAULT_ACCRUAL_GAIN, DEFAULT_ACCRUAL_THRESHOLD, DEFAULT_RECOVERY_RATE,
    DEFAULT_RECOVERY_THRESHOLD, DEFAULT_SQUARED_ACCRUAL_GAIN, FATIGUE_MAX, FATIGUE_MIN,
};
use crate::errors::{ConfigError, ConfigResult};
use crate::validation::Validatable;

/// Exponent applied to the signal during accrual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FatigueCurve {
    /// `gain · signal`
    #[default]
    Linear,
    /// `gain · signal²`, penalizes large deflections superlinearly
    Squared,
}

/// Accrual/recovery rule, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FatiguePolicy {
    /// Signal above which wear accrues
    pub accrual_threshold: f32,
    /// Signal below which wear recovers; strictly below `accrual_threshold`
    pub recovery_threshold: f32,
    /// Multiplier on `signal^p`
    pub accrual_gain: f32,
    /// Linear or squared accrual
    pub curve: FatigueCurve,
    /// Index points removed per quiet update
    pub recovery_rate: f32,
    /// Index points added per update while the crack detector is closed
    pub crack_penalty: f32,
}

impl Default for FatiguePolicy {
    fn default() -> Self {
        Self::linear()
    }
}

impl FatiguePolicy {
    /// Linear accrual with the default thresholds
    pub fn linear() -> Self {
        Self {
            accrual_threshold: DEFAULT_ACCRUAL_THRESHOLD,
            recovery_threshold: DEFAULT_RECOVERY_THRESHOLD,
            accrual_gain: DEFAULT_ACCRUAL_GAIN,
            curve: FatigueCurve::Linear,
            recovery_rate: DEFAULT_RECOVERY_RATE,
            crack_penalty: 0.0,
        }
    }

    /// Squared ("fast degradation") accrual with the default thresholds
    pub fn squared() -> Self {
        Self {
            accrual_gain: DEFAULT_SQUARED_ACCRUAL_GAIN,
            curve: FatigueCurve::Squared,
            ..Self::linear()
        }
    }

    /// Check the policy for consistency
    pub fn validate(&self) -> ConfigResult<()> {
        let params = [
            self.accrual_threshold,
            self.recovery_threshold,
            self.accrual_gain,
            self.recovery_rate,
            self.crack_penalty,
        ];
        if params.iter().any(|p| !p.is_valid()) {
            return Err(ConfigError::InvalidFatiguePolicy {
                reason: "parameters must be finite",
            });
        }
        if self.recovery_threshold >= self.accrual_threshold {
            return Err(ConfigError::InvalidFatiguePolicy {
                reason: "recovery threshold must be below accrual threshold",
            });
        }
        if self.accrual_gain < 0.0 || self.recovery_rate < 0.0 || self.crack_penalty < 0.0 {
            return Err(ConfigError::InvalidFatiguePolicy {
                reason: "gain, recovery rate and crack penalty must be non-negative",
            });
        }
        Ok(())
    }
}

/// Bounded wear integrator
#[derive(Debug, Clone)]
pub struct FatigueAccumulator {
    policy: FatiguePolicy,
    index: f32,
}

impl FatigueAccumulator {
    /// Build an accumulator at zero fatigue
    pub fn new(policy: FatiguePolicy) -> ConfigResult<Self> {
        policy.validate()?;
        Ok(Self {
            policy,
            index: FATIGUE_MIN,
        })
    }

    /// Feed one filtered signal magnitude; returns the new index
    pub fn update(&mut self, signal: f32, crack: bool) -> f32 {
        let mut delta = 0.0;

        if signal.is_valid() {
            if signal > self.policy.accrual_threshold {
                let magnitude = match self.policy.curve {
                    FatigueCurve::Linear => signal,
                    FatigueCurve::Squared => signal * signal,
                };
                delta += self.policy.accrual_gain * magnitude;
            } else if signal < self.policy.recovery_threshold {
                delta -= self.policy.recovery_rate;
            }
        }

        if crack {
            delta += self.policy.crack_penalty;
        }

        // +inf clamps to the top; NaN (0 gain × inf) leaves the index alone
        let next = self.index + delta;
        if !next.is_nan() {
            self.index = next.clamp(FATIGUE_MIN, FATIGUE_MAX);
        }
        self.index
    }

    /// Current index in [0, 100]
    pub fn index(&self) -> f32 {
        self.index
    }

    /// `100 - index`
    pub fn remaining_life(&self) -> f32 {
        FATIGUE_MAX - self.index
    }

    /// Policy in use
    pub fn policy(&self) -> &FatiguePolicy {
        &self.policy
    }

    /// Explicit re-initialization to zero fatigue
    pub fn reset(&mut self) {
        self.index = FATIGUE_MIN;
    }
}
