//! Logistic Collapse-Risk Scoring
//!
//! A fixed, pre-trained logistic regression:
//!
//! ```text
//! z = Σ weight[name] · feature[name]  +  crack_weight · crack  +  bias
//! p = 1 / (1 + e^(−z))
//! ```
//!
//! The scorer is a pure function of its inputs: no state, no side effects.
//!
//! ## Numeric Guards
//!
//! - z is clamped to `±LOGIT_CLAMP` before exponentiation so `e^(−z)` never
//!   overflows
//! - p is clamped to `[MIN_PROBABILITY, MAX_PROBABILITY]`, keeping it strictly
//!   inside (0, 1) after f32 rounding
//! - a NaN feature value contributes nothing; an infinite value saturates z
//!   in the direction of its weighted sign, and a NaN sum (opposing
//!   infinities) scores as z = 0
//!
//! Every clamp is monotone, so p stays non-decreasing in z and in every
//! positively weighted feature.
//!
//! ## Example
//!
//! ```rust
//! use structguard_core::scoring::{RiskModel, RiskScorer};
//! use structguard_core::FeatureName;
//!
//! let model = RiskModel::new(-4.2)
//!     .with_weight("vibration", 5.4)
//!     .with_weight("load", 4.8);
//! let scorer = RiskScorer::new(model)?;
//!
//! let vibration = FeatureName::new("vibration").unwrap();
//! let load = FeatureName::new("load").unwrap();
//! let score = scorer.score(&[(vibration, 0.5), (load, 0.5)], None);
//!
//! assert!((score.logit - 0.9).abs() < 1e-5);
//! assert!((score.percent() - 71.09).abs() < 0.01);
//! # Ok::<(), structguard_core::ConfigError>(())
//! ```

use heapless::Vec;

use crate::constants::buffers::MAX_FEATURES;
use crate::constants::model::{LOGIT_CLAMP, MAX_PROBABILITY, MIN_PROBABILITY};
use crate::errors::{ConfigError, ConfigResult};
use crate::events::FeatureName;
use crate::validation::Validatable;

/// One model coefficient
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureWeight {
    /// Feature the weight applies to
    pub feature: FeatureName,
    /// Coefficient
    pub weight: f32,
}

/// Pre-trained logistic regression coefficients
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskModel {
    /// Per-feature coefficients
    pub weights: Vec<FeatureWeight, MAX_FEATURES>,
    /// Intercept
    pub bias: f32,
    /// Coefficient on the crack flag (1.0 when closed), if modeled
    #[cfg_attr(feature = "serde", serde(default))]
    pub crack_weight: Option<f32>,
}

impl RiskModel {
    /// Model with only a bias
    pub fn new(bias: f32) -> Self {
        Self {
            weights: Vec::new(),
            bias,
            crack_weight: None,
        }
    }

    /// Add a coefficient
    ///
    /// Names that do not fit a [`FeatureName`] and weights beyond capacity are
    /// dropped here and then caught by validation as a weight mismatch.
    pub fn with_weight(mut self, feature: &str, weight: f32) -> Self {
        match FeatureName::new(feature) {
            Some(feature) => {
                if self.weights.push(FeatureWeight { feature, weight }).is_err() {
                    log_warn!("Risk model full, dropping weight for '{}'", feature);
                }
            }
            None => log_warn!("Feature name '{}' too long, weight dropped", feature),
        }
        self
    }

    /// Model the crack detector as an input
    pub fn with_crack_weight(mut self, weight: f32) -> Self {
        self.crack_weight = Some(weight);
        self
    }

    /// Coefficient for `feature`, if any
    pub fn weight(&self, feature: &FeatureName) -> Option<f32> {
        self.weights
            .iter()
            .find(|w| w.feature == *feature)
            .map(|w| w.weight)
    }

    /// Check coefficients are finite and names unique
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.bias.is_valid() || self.crack_weight.map_or(false, |w| !w.is_valid()) {
            return Err(ConfigError::InvalidParameter {
                reason: "model coefficients must be finite",
            });
        }

        for (i, w) in self.weights.iter().enumerate() {
            if !w.weight.is_valid() {
                return Err(ConfigError::InvalidParameter {
                    reason: "model coefficients must be finite",
                });
            }
            if self.weights[..i].iter().any(|other| other.feature == w.feature) {
                return Err(ConfigError::DuplicateFeature { feature: w.feature });
            }
        }

        Ok(())
    }
}

/// Scorer output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskScore {
    /// Linear predictor after clamping
    pub logit: f32,
    /// Collapse probability, strictly inside (0, 1)
    pub probability: f32,
}

impl RiskScore {
    /// Probability on the 0-100 scale used by the alert thresholds
    pub fn percent(&self) -> f32 {
        self.probability * 100.0
    }
}

/// Numerically guarded logistic function
///
/// Strictly inside (0, 1), non-decreasing in `z`, never NaN.
pub fn sigmoid(z: f32) -> f32 {
    sigmoid_clamped(clamp_logit(z))
}

/// Logistic of an already clamped `z`
fn sigmoid_clamped(z: f32) -> f32 {
    let p = 1.0 / (1.0 + libm::expf(-z));
    p.clamp(MIN_PROBABILITY, MAX_PROBABILITY)
}

fn clamp_logit(z: f32) -> f32 {
    if z.is_nan() {
        log_debug!("Logit is NaN, scoring as neutral");
        return 0.0;
    }
    if libm::fabsf(z) > LOGIT_CLAMP {
        log_debug!("Logit {} clamped to ±{}", z, LOGIT_CLAMP);
    }
    z.clamp(-LOGIT_CLAMP, LOGIT_CLAMP)
}

/// Stateless logistic-regression evaluator
#[derive(Debug, Clone)]
pub struct RiskScorer {
    model: RiskModel,
}

impl RiskScorer {
    /// Build a scorer; fails on non-finite or duplicate coefficients
    pub fn new(model: RiskModel) -> ConfigResult<Self> {
        model.validate()?;
        Ok(Self { model })
    }

    /// Model in use
    pub fn model(&self) -> &RiskModel {
        &self.model
    }

    /// Linear predictor before clamping
    ///
    /// Features without a weight are ignored; weighted features absent from
    /// `features` contribute zero. A term that overflows, or an infinite
    /// value, pushes z to ±∞ rather than dropping out, so the score stays
    /// monotone in every input.
    pub fn logit(&self, features: &[(FeatureName, f32)], crack: Option<bool>) -> f32 {
        let mut z = self.model.bias;

        for w in self.model.weights.iter() {
            let value = features
                .iter()
                .find(|(name, _)| *name == w.feature)
                .map(|(_, v)| *v);

            match value {
                Some(v) if v.is_nan() => {
                    log_debug!("NaN value for '{}' left out of score", w.feature)
                }
                Some(v) => {
                    let term = w.weight * v;
                    // 0 · ∞ carries no information
                    if !term.is_nan() {
                        z += term;
                    }
                }
                None => {}
            }
        }

        if let (Some(weight), Some(true)) = (self.model.crack_weight, crack) {
            z += weight;
        }

        z
    }

    /// Score one feature vector
    pub fn score(&self, features: &[(FeatureName, f32)], crack: Option<bool>) -> RiskScore {
        let z = clamp_logit(self.logit(features, crack));
        RiskScore {
            logit: z,
            probability: sigmoid_clamped(z),
        }
    }
}
