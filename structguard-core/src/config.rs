//! Engine Configuration
//!
//! Everything an [`Engine`](crate::engine::Engine) needs is fixed at
//! construction by an [`EngineConfig`]:
//!
//! ```text
//! EngineConfig
//! ├── features: [FeatureConfig]      name, scale, filter, role
//! ├── model: RiskModel               weights, bias, crack weight
//! ├── fatigue: FatiguePolicy         + fatigue_source
//! ├── alert: AlertThresholds         + danger_dwell_ms
//! └── tick_interval_ms, design_years
//! ```
//!
//! ## Presets
//!
//! The four deployment variants are presets over the same engine:
//!
//! | Preset | Filter | Hysteresis | Dwell | Fatigue |
//! |---|---|---|---|---|
//! | [`weighted_sum`](EngineConfig::weighted_sum) | none | minimal | 0 | none |
//! | [`deflection_fusion`](EngineConfig::deflection_fusion) | range check only | minimal | 0 | linear |
//! | [`smoothed_hysteresis`](EngineConfig::smoothed_hysteresis) | exponential | 40/70/35/65 | 0 | squared |
//! | [`dwell_qualified`](EngineConfig::dwell_qualified) | moving average | 40/70/35/65 | 5 s | linear |
//!
//! ## Loading From JSON
//!
//! With `std`, [`EngineConfig::from_json`] parses and validates in one step.
//! Filter modes use serde's external tagging:
//!
//! ```json
//! { "name": "distance", "filter": { "mode": { "moving_average": { "window": 5 } } },
//!   "role": { "deflection": { "baseline": 18.0 } } }
//! ```

use heapless::Vec;

use crate::alert::AlertThresholds;
use crate::constants::alert::MINIMAL_DEAD_BAND_PCT;
use crate::constants::buffers::MAX_FEATURES;
use crate::constants::fatigue::DEFAULT_DESIGN_YEARS;
use crate::constants::model::*;
use crate::constants::sensors::*;
use crate::constants::time::{DEFAULT_TICK_INTERVAL_MS, FAST_TICK_INTERVAL_MS};
use crate::constants::DEFAULT_DANGER_DWELL_MS;
use crate::errors::{ConfigError, ConfigResult};
use crate::events::FeatureName;
use crate::fatigue::FatiguePolicy;
use crate::filter::FilterMode;
use crate::scoring::RiskModel;
use crate::validation::Validatable;

/// Feature names used by the presets
pub mod names {
    use crate::events::FeatureName;

    /// Vibration amplitude
    pub const VIBRATION: FeatureName = FeatureName::from_static("vibration");
    /// Load cell
    pub const LOAD: FeatureName = FeatureName::from_static("load");
    /// Ambient temperature
    pub const TEMPERATURE: FeatureName = FeatureName::from_static("temperature");
    /// Ultrasonic distance to the deck (deflection source)
    pub const DISTANCE: FeatureName = FeatureName::from_static("distance");
    /// Uptime in seconds
    pub const DURATION: FeatureName = FeatureName::from_static("duration");
}

/// How a feature's value is derived each tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FeatureRole {
    /// Filtered reading used as-is
    #[default]
    Plain,
    /// `|baseline − filtered|`; the baseline is captured from the first valid
    /// filtered reading when not given
    Deflection {
        /// Rest distance of the unloaded structure
        #[cfg_attr(feature = "serde", serde(default))]
        baseline: Option<f32>,
    },
    /// Engine uptime in seconds; the sample and the filter are ignored
    Elapsed,
}

/// Filter mode plus the output used before any valid reading
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterConfig {
    /// Smoothing mode and parameters
    pub mode: FilterMode,
    /// Pre-data output; defaults to the deflection baseline, then 0
    #[cfg_attr(feature = "serde", serde(default))]
    pub fallback: Option<f32>,
}

impl FilterConfig {
    /// Moving average over `window` samples, rejecting readings outside `valid_range`
    pub const fn moving_average(window: usize, valid_range: Option<(f32, f32)>) -> Self {
        Self {
            mode: FilterMode::MovingAverage { window, valid_range },
            fallback: None,
        }
    }

    /// Exponential smoothing with coefficient `alpha`
    pub const fn exponential(alpha: f32) -> Self {
        Self {
            mode: FilterMode::Exponential { alpha },
            fallback: None,
        }
    }

    /// No smoothing
    pub const fn passthrough() -> Self {
        Self {
            mode: FilterMode::Passthrough,
            fallback: None,
        }
    }

    /// Set the pre-data output
    pub const fn with_fallback(mut self, fallback: f32) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::passthrough()
    }
}

#[cfg(feature = "serde")]
fn default_scale() -> f32 {
    1.0
}

/// One tracked feature
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureConfig {
    /// Name the sample and the risk model use
    pub name: FeatureName,
    /// Multiplier applied to the raw reading before filtering
    #[cfg_attr(feature = "serde", serde(default = "default_scale"))]
    pub scale: f32,
    /// Smoothing
    #[cfg_attr(feature = "serde", serde(default))]
    pub filter: FilterConfig,
    /// Derivation
    #[cfg_attr(feature = "serde", serde(default))]
    pub role: FeatureRole,
}

impl FeatureConfig {
    /// Plain feature with unit scale
    pub const fn new(name: FeatureName, filter: FilterConfig) -> Self {
        Self {
            name,
            scale: 1.0,
            filter,
            role: FeatureRole::Plain,
        }
    }

    /// Uptime feature
    pub const fn elapsed(name: FeatureName) -> Self {
        Self {
            name,
            scale: 1.0,
            filter: FilterConfig::passthrough(),
            role: FeatureRole::Elapsed,
        }
    }

    /// Deflection feature measured against `baseline` (captured if `None`)
    pub const fn deflection(name: FeatureName, filter: FilterConfig, baseline: Option<f32>) -> Self {
        Self {
            name,
            scale: 1.0,
            filter,
            role: FeatureRole::Deflection { baseline },
        }
    }

    /// Set the raw-to-feature scale
    pub const fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Filter output before any valid reading
    pub fn fallback(&self) -> f32 {
        let baseline = match self.role {
            FeatureRole::Deflection { baseline } => baseline,
            _ => None,
        };
        self.filter.fallback.or(baseline).unwrap_or(0.0)
    }

    fn validate(&self) -> ConfigResult<()> {
        if !self.scale.is_valid() {
            return Err(ConfigError::InvalidParameter {
                reason: "feature scale must be finite",
            });
        }
        if self.filter.fallback.map_or(false, |f| !f.is_valid()) {
            return Err(ConfigError::InvalidParameter {
                reason: "filter fallback must be finite",
            });
        }
        if let FeatureRole::Deflection { baseline: Some(b) } = self.role {
            if !b.is_valid() {
                return Err(ConfigError::InvalidParameter {
                    reason: "deflection baseline must be finite",
                });
            }
        }
        self.filter.mode.validate()
    }
}

#[cfg(feature = "serde")]
fn default_tick_interval() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

#[cfg(feature = "serde")]
fn default_design_years() -> f32 {
    DEFAULT_DESIGN_YEARS
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Tracked features, each with a model weight
    pub features: Vec<FeatureConfig, MAX_FEATURES>,
    /// Logistic model
    pub model: RiskModel,
    /// Fatigue accrual rule
    #[cfg_attr(feature = "serde", serde(default))]
    pub fatigue: FatiguePolicy,
    /// Feature whose signal drives fatigue; fatigue stays 0 without one
    #[cfg_attr(feature = "serde", serde(default))]
    pub fatigue_source: Option<FeatureName>,
    /// Hysteresis thresholds
    #[cfg_attr(feature = "serde", serde(default))]
    pub alert: AlertThresholds,
    /// Sustain time before DANGER becomes visible; 0 escalates immediately
    #[cfg_attr(feature = "serde", serde(default))]
    pub danger_dwell_ms: u64,
    /// Tick cadence for [`Engine::poll`](crate::engine::Engine::poll)
    #[cfg_attr(feature = "serde", serde(default = "default_tick_interval"))]
    pub tick_interval_ms: u64,
    /// Total service life used for remaining years
    #[cfg_attr(feature = "serde", serde(default = "default_design_years"))]
    pub design_years: f32,
}

impl EngineConfig {
    /// Empty configuration around `model`, all other settings default
    pub fn new(model: RiskModel) -> Self {
        Self {
            features: Vec::new(),
            model,
            fatigue: FatiguePolicy::default(),
            fatigue_source: None,
            alert: AlertThresholds::default(),
            danger_dwell_ms: 0,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            design_years: DEFAULT_DESIGN_YEARS,
        }
    }

    /// Add a feature, failing once capacity is reached
    pub fn push_feature(&mut self, feature: FeatureConfig) -> ConfigResult<()> {
        self.features
            .push(feature)
            .map_err(|_| ConfigError::TooManyFeatures {
                count: MAX_FEATURES + 1,
                max: MAX_FEATURES,
            })
    }

    /// Builder form of [`push_feature`](Self::push_feature)
    ///
    /// A feature beyond capacity is dropped and logged; validation then
    /// reports its model weight as unknown.
    pub fn with_feature(mut self, feature: FeatureConfig) -> Self {
        if let Err(_e) = self.push_feature(feature) {
            log_warn!("Dropping feature '{}': {}", feature.name, _e);
        }
        self
    }

    /// Drive fatigue from `feature`
    pub fn with_fatigue(mut self, policy: FatiguePolicy, source: FeatureName) -> Self {
        self.fatigue = policy;
        self.fatigue_source = Some(source);
        self
    }

    /// Set hysteresis thresholds
    pub fn with_thresholds(mut self, alert: AlertThresholds) -> Self {
        self.alert = alert;
        self
    }

    /// Set the DANGER dwell
    pub fn with_danger_dwell(mut self, dwell_ms: u64) -> Self {
        self.danger_dwell_ms = dwell_ms;
        self
    }

    /// Set the tick cadence
    pub fn with_tick_interval(mut self, interval_ms: u64) -> Self {
        self.tick_interval_ms = interval_ms;
        self
    }

    /// Set the service life
    pub fn with_design_years(mut self, years: f32) -> Self {
        self.design_years = years;
        self
    }

    /// Configuration of `name`, if tracked
    pub fn feature(&self, name: &FeatureName) -> Option<&FeatureConfig> {
        self.features.iter().find(|f| f.name == *name)
    }

    /// Run every construction-time check
    ///
    /// Alert thresholds are checked first, then features, then the model and
    /// fatigue policy, then engine scalars.
    pub fn validate(&self) -> ConfigResult<()> {
        self.alert.validate()?;

        if self.features.is_empty() {
            return Err(ConfigError::NoFeatures);
        }

        for (i, feature) in self.features.iter().enumerate() {
            if self.features[..i].iter().any(|f| f.name == feature.name) {
                return Err(ConfigError::DuplicateFeature {
                    feature: feature.name,
                });
            }
            feature.validate()?;
        }

        self.model.validate()?;

        for w in self.model.weights.iter() {
            if self.feature(&w.feature).is_none() {
                return Err(ConfigError::UnknownFeature { feature: w.feature });
            }
        }
        for feature in self.features.iter() {
            if self.model.weight(&feature.name).is_none() {
                return Err(ConfigError::MissingWeight {
                    feature: feature.name,
                });
            }
        }

        self.fatigue.validate()?;
        if let Some(source) = self.fatigue_source {
            if self.feature(&source).is_none() {
                return Err(ConfigError::UnknownFatigueSource { feature: source });
            }
        }

        if !self.design_years.is_valid() || self.design_years <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                reason: "design years must be positive",
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidParameter {
                reason: "tick interval must be non-zero",
            });
        }

        Ok(())
    }

    /// Parse and validate a JSON configuration
    #[cfg(feature = "std")]
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|_e| {
            log_warn!("Configuration parse failed: {}", _e);
            ConfigError::Parse
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON
    #[cfg(feature = "std")]
    pub fn to_json(&self) -> ConfigResult<std::string::String> {
        serde_json::to_string_pretty(self).map_err(|_| ConfigError::Parse)
    }

    // ===== PRESETS =====

    /// Raw weighted-sum scoring of vibration, temperature, load and uptime
    ///
    /// Expects raw ADC counts for vibration and load, °C for temperature.
    /// Thresholds at 40 % and 70 % with the narrowest dead band, no fatigue.
    pub fn weighted_sum() -> Self {
        let model = RiskModel::new(BIAS)
            .with_weight(names::VIBRATION.as_str(), W_VIBRATION)
            .with_weight(names::TEMPERATURE.as_str(), W_TEMPERATURE)
            .with_weight(names::LOAD.as_str(), W_LOAD)
            .with_weight(names::DURATION.as_str(), W_DURATION);

        Self::new(model)
            .with_feature(
                FeatureConfig::new(names::VIBRATION, FilterConfig::passthrough())
                    .with_scale(VIBRATION_ADC_SCALE),
            )
            .with_feature(FeatureConfig::new(
                names::TEMPERATURE,
                FilterConfig::moving_average(1, Some((DHT11_MIN_C, DHT11_MAX_C))),
            ))
            .with_feature(
                FeatureConfig::new(names::LOAD, FilterConfig::passthrough())
                    .with_scale(LOAD_ADC_SCALE),
            )
            .with_feature(FeatureConfig::elapsed(names::DURATION))
            .with_thresholds(minimal_band(40.0, 70.0))
    }

    /// Normalized vibration and load fused with deflection and the crack pin
    ///
    /// The baseline distance is captured from the first valid reading.
    pub fn deflection_fusion() -> Self {
        let model = fusion_model();

        Self::new(model)
            .with_feature(
                FeatureConfig::new(names::VIBRATION, FilterConfig::passthrough())
                    .with_scale(NORMALIZED_ADC_SCALE),
            )
            .with_feature(
                FeatureConfig::new(names::LOAD, FilterConfig::passthrough())
                    .with_scale(NORMALIZED_ADC_SCALE),
            )
            .with_feature(FeatureConfig::deflection(
                names::DISTANCE,
                FilterConfig::moving_average(1, Some((ULTRASONIC_MIN_CM, ULTRASONIC_MAX_CM))),
                None,
            ))
            .with_fatigue(FatiguePolicy::linear(), names::DISTANCE)
            .with_thresholds(minimal_band(40.0, 70.0))
    }

    /// Exponentially smoothed fusion with a real dead band and squared fatigue
    pub fn smoothed_hysteresis() -> Self {
        const ALPHA: f32 = 0.3;

        Self::new(fusion_model())
            .with_feature(
                FeatureConfig::new(names::VIBRATION, FilterConfig::exponential(ALPHA))
                    .with_scale(NORMALIZED_ADC_SCALE),
            )
            .with_feature(
                FeatureConfig::new(names::LOAD, FilterConfig::exponential(ALPHA))
                    .with_scale(NORMALIZED_ADC_SCALE),
            )
            .with_feature(FeatureConfig::deflection(
                names::DISTANCE,
                FilterConfig::exponential(ALPHA),
                None,
            ))
            .with_fatigue(FatiguePolicy::squared(), names::DISTANCE)
            .with_tick_interval(FAST_TICK_INTERVAL_MS)
    }

    /// Moving-average fusion with range rejection and a 5 s DANGER dwell
    pub fn dwell_qualified() -> Self {
        const WINDOW: usize = 5;
        let unit_range = Some((0.0, 1.0));

        Self::new(fusion_model())
            .with_feature(
                FeatureConfig::new(names::VIBRATION, FilterConfig::moving_average(WINDOW, unit_range))
                    .with_scale(NORMALIZED_ADC_SCALE),
            )
            .with_feature(
                FeatureConfig::new(names::LOAD, FilterConfig::moving_average(WINDOW, unit_range))
                    .with_scale(NORMALIZED_ADC_SCALE),
            )
            .with_feature(FeatureConfig::deflection(
                names::DISTANCE,
                FilterConfig::moving_average(WINDOW, Some((ULTRASONIC_MIN_CM, ULTRASONIC_MAX_CM))),
                None,
            ))
            .with_fatigue(FatiguePolicy::linear(), names::DISTANCE)
            .with_danger_dwell(DEFAULT_DANGER_DWELL_MS)
    }
}

fn fusion_model() -> RiskModel {
    RiskModel::new(FUSION_BIAS)
        .with_weight(names::VIBRATION.as_str(), FUSION_W_VIBRATION)
        .with_weight(names::LOAD.as_str(), FUSION_W_LOAD)
        .with_weight(names::DISTANCE.as_str(), FUSION_W_DEFLECTION)
        .with_crack_weight(FUSION_W_CRACK)
}

fn minimal_band(high_enter: f32, danger_enter: f32) -> AlertThresholds {
    AlertThresholds::new(
        high_enter,
        danger_enter,
        high_enter - MINIMAL_DEAD_BAND_PCT,
        danger_enter - MINIMAL_DEAD_BAND_PCT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        for config in [
            EngineConfig::weighted_sum(),
            EngineConfig::deflection_fusion(),
            EngineConfig::smoothed_hysteresis(),
            EngineConfig::dwell_qualified(),
        ] {
            assert_eq!(config.validate(), Ok(()));
        }
    }

    #[test]
    fn preset_differences() {
        assert_eq!(EngineConfig::dwell_qualified().danger_dwell_ms, 5000);
        assert_eq!(EngineConfig::smoothed_hysteresis().danger_dwell_ms, 0);
        assert_eq!(EngineConfig::weighted_sum().fatigue_source, None);
        assert_eq!(
            EngineConfig::smoothed_hysteresis().fatigue.curve,
            crate::fatigue::FatigueCurve::Squared
        );
    }

    #[test]
    fn thresholds_checked_first() {
        let mut config = EngineConfig::new(RiskModel::new(0.0));
        config.alert.safe_exit = 45.0;

        // Also has no features, but the threshold error wins
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdOrder { transition: "warning/safe", .. })
        ));
    }

    #[test]
    fn empty_feature_list_rejected() {
        assert_eq!(
            EngineConfig::new(RiskModel::new(0.0)).validate(),
            Err(ConfigError::NoFeatures)
        );
    }

    #[test]
    fn weight_feature_mismatch_rejected() {
        let unweighted = EngineConfig::new(RiskModel::new(0.0))
            .with_feature(FeatureConfig::new(names::LOAD, FilterConfig::passthrough()));
        assert_eq!(
            unweighted.validate(),
            Err(ConfigError::MissingWeight { feature: names::LOAD })
        );

        let unknown = EngineConfig::new(
            RiskModel::new(0.0)
                .with_weight("load", 1.0)
                .with_weight("vibration", 1.0),
        )
        .with_feature(FeatureConfig::new(names::LOAD, FilterConfig::passthrough()));
        assert_eq!(
            unknown.validate(),
            Err(ConfigError::UnknownFeature { feature: names::VIBRATION })
        );
    }

    #[test]
    fn duplicate_feature_rejected() {
        let config = EngineConfig::new(RiskModel::new(0.0).with_weight("load", 1.0))
            .with_feature(FeatureConfig::new(names::LOAD, FilterConfig::passthrough()))
            .with_feature(FeatureConfig::new(names::LOAD, FilterConfig::exponential(0.5)));
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateFeature { feature: names::LOAD })
        );
    }

    #[test]
    fn bad_filter_rejected() {
        let config = EngineConfig::new(RiskModel::new(0.0).with_weight("load", 1.0))
            .with_feature(FeatureConfig::new(names::LOAD, FilterConfig::moving_average(0, None)));
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWindow { .. })));
    }

    #[test]
    fn unknown_fatigue_source_rejected() {
        let config = EngineConfig::new(RiskModel::new(0.0).with_weight("load", 1.0))
            .with_feature(FeatureConfig::new(names::LOAD, FilterConfig::passthrough()))
            .with_fatigue(FatiguePolicy::linear(), names::DISTANCE);
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownFatigueSource { feature: names::DISTANCE })
        );
    }

    #[test]
    fn engine_scalars_rejected() {
        let base = EngineConfig::new(RiskModel::new(0.0).with_weight("load", 1.0))
            .with_feature(FeatureConfig::new(names::LOAD, FilterConfig::passthrough()));

        assert!(base.clone().with_design_years(0.0).validate().is_err());
        assert!(base.clone().with_design_years(f32::NAN).validate().is_err());
        assert!(base.clone().with_tick_interval(0).validate().is_err());
        assert!(base.validate().is_ok());
    }

    #[test]
    fn capacity_enforced() {
        let mut config = EngineConfig::new(RiskModel::new(0.0));
        let ids = ["f0", "f1", "f2", "f3", "f4", "f5", "f6", "f7"];
        for n in ids.iter().take(MAX_FEATURES) {
            let name = FeatureName::new(n).unwrap();
            config
                .push_feature(FeatureConfig::new(name, FilterConfig::passthrough()))
                .unwrap();
        }

        let extra = FeatureConfig::new(FeatureName::new("f8").unwrap(), FilterConfig::passthrough());
        assert!(matches!(
            config.push_feature(extra),
            Err(ConfigError::TooManyFeatures { .. })
        ));
    }

    #[test]
    fn fallback_prefers_explicit_then_baseline() {
        let explicit = FeatureConfig::deflection(
            names::DISTANCE,
            FilterConfig::passthrough().with_fallback(3.0),
            Some(18.0),
        );
        assert_eq!(explicit.fallback(), 3.0);

        let baseline = FeatureConfig::deflection(names::DISTANCE, FilterConfig::passthrough(), Some(18.0));
        assert_eq!(baseline.fallback(), 18.0);

        let plain = FeatureConfig::new(names::LOAD, FilterConfig::passthrough());
        assert_eq!(plain.fallback(), 0.0);
    }

    #[cfg(feature = "std")]
    #[test]
    fn json_round_trip_keeps_preset() {
        let config = EngineConfig::dwell_qualified();
        let json = config.to_json().unwrap();
        let parsed = EngineConfig::from_json(&json).unwrap();

        assert_eq!(parsed.features.len(), config.features.len());
        assert_eq!(parsed.features[2].role, config.features[2].role);
        assert_eq!(parsed.features[2].filter.mode, config.features[2].filter.mode);
        assert_eq!(parsed.alert, config.alert);
        assert_eq!(parsed.danger_dwell_ms, 5000);
        assert_eq!(parsed.fatigue_source, Some(names::DISTANCE));
    }

    #[cfg(feature = "std")]
    #[test]
    fn json_defaults_and_errors() {
        let json = r#"{
            "features": [
                { "name": "load", "filter": { "mode": { "exponential": { "alpha": 0.5 } } } },
                { "name": "distance",
                  "filter": { "mode": { "moving_average": { "window": 5, "valid_range": [2.0, 400.0] } } },
                  "role": { "deflection": { "baseline": 18.0 } } }
            ],
            "model": {
                "weights": [
                    { "feature": "load", "weight": 4.8 },
                    { "feature": "distance", "weight": 0.6 }
                ],
                "bias": -4.2
            },
            "fatigue_source": "distance",
            "danger_dwell_ms": 2000
        }"#;

        let config = EngineConfig::from_json(json).unwrap();
        assert_eq!(config.features.len(), 2);
        assert_eq!(config.features[0].scale, 1.0);
        assert_eq!(config.alert, AlertThresholds::default());
        assert_eq!(config.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
        assert_eq!(config.design_years, DEFAULT_DESIGN_YEARS);
        assert_eq!(config.danger_dwell_ms, 2000);

        assert_eq!(EngineConfig::from_json("{ not json"), Err(ConfigError::Parse));

        let misordered = json.replace("\"danger_dwell_ms\": 2000", "\"alert\": { \"high_enter\": 40.0, \"danger_enter\": 70.0, \"safe_exit\": 50.0, \"danger_exit\": 65.0 }");
        assert!(matches!(
            EngineConfig::from_json(&misordered),
            Err(ConfigError::ThresholdOrder { .. })
        ));
    }
}
