//! Structural Risk Assessment Engine
//!
//! Composes filters, fatigue, scorer and alert state machine into one tick:
//!
//! ```text
//! FeatureSample
//!   │  scale → filter (per feature)
//!   │  deflection = |baseline − filtered|, duration = uptime
//!   ├──▶ FatigueAccumulator ──▶ fatigue_index, remaining life/years
//!   └──▶ RiskScorer ──▶ risk % ──▶ AlertStateMachine ──▶ level
//!                                                          │
//!                                                   EngineOutput
//! ```
//!
//! The engine owns all of its state. Independent structures use independent
//! engines. No tick can fail: invalid readings are absorbed by the filters
//! and every value reaching the output is finite.
//!
//! ## Cadence
//!
//! [`Engine::process`] runs a tick unconditionally. [`Engine::poll`] adds the
//! non-blocking interval gate: calls before the interval has elapsed return
//! `WouldBlock` without touching any state.

use core::convert::Infallible;

use heapless::Vec;

use crate::alert::{AlertLevel, AlertStateMachine};
use crate::config::{EngineConfig, FeatureConfig, FeatureRole};
use crate::constants::buffers::MAX_FEATURES;
use crate::constants::fatigue::FATIGUE_MAX;
use crate::constants::time::MS_PER_SECOND;
use crate::errors::ConfigResult;
use crate::events::{EngineOutput, FeatureName, FeatureSample, Reading};
use crate::fatigue::FatigueAccumulator;
use crate::filter::FeatureFilter;
use crate::scoring::RiskScorer;
use crate::time::{IntervalTimer, Timestamp};
use crate::traits::SensorSource;
use crate::validation::Validatable;

/// Per-feature runtime state
#[derive(Debug, Clone)]
struct Channel {
    config: FeatureConfig,
    filter: FeatureFilter,
    baseline: Option<f32>,
}

impl Channel {
    fn new(config: FeatureConfig) -> ConfigResult<Self> {
        let baseline = match config.role {
            FeatureRole::Deflection { baseline } => baseline,
            _ => None,
        };
        Ok(Self {
            filter: FeatureFilter::new(config.filter.mode, config.fallback())?,
            config,
            baseline,
        })
    }

    /// Feature value for this tick
    fn evaluate(&mut self, reading: Reading, uptime_s: f32) -> f32 {
        let scale = self.config.scale;
        let scaled = match reading {
            // A finite reading stays finite after scaling
            Reading::Value(raw) if raw.is_valid() => Reading::Value(saturate(raw * scale)),
            other => other,
        };

        match self.config.role {
            FeatureRole::Elapsed => uptime_s,
            FeatureRole::Plain => self.filter.update_reading(scaled),
            FeatureRole::Deflection { .. } => {
                let filtered = self.filter.update_reading(scaled);

                if self.baseline.is_none() && self.filter.has_output() {
                    log_info!("Captured '{}' baseline {}", self.config.name, filtered);
                    self.baseline = Some(filtered);
                    self.filter.set_fallback(filtered);
                }

                match self.baseline {
                    Some(baseline) => saturate(libm::fabsf(baseline - filtered)),
                    None => 0.0,
                }
            }
        }
    }

    fn reset(&mut self) {
        self.filter.reset();
        if let FeatureRole::Deflection { baseline } = self.config.role {
            self.baseline = baseline;
            self.filter.set_fallback(self.config.fallback());
        }
    }
}

/// Clamp an overflowed product into the finite `f32` range
fn saturate(value: f32) -> f32 {
    value.clamp(-f32::MAX, f32::MAX)
}

/// One monitored structure
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    channels: Vec<Channel, MAX_FEATURES>,
    fatigue_channel: Option<usize>,
    fatigue: FatigueAccumulator,
    scorer: RiskScorer,
    alert: AlertStateMachine,
    timer: IntervalTimer,
    started_at: Option<Timestamp>,
    ticks: u64,
    last_output: Option<EngineOutput>,
}

impl Engine {
    /// Validate `config` and build an engine in its initial state
    ///
    /// Initial state: SAFE, zero fatigue, empty filters.
    pub fn new(config: EngineConfig) -> ConfigResult<Self> {
        config.validate()?;

        let mut channels = Vec::new();
        for feature in config.features.iter() {
            // Same capacity as config.features, cannot overflow
            let _ = channels.push(Channel::new(*feature)?);
        }

        let fatigue_channel = config
            .fatigue_source
            .and_then(|source| config.features.iter().position(|f| f.name == source));

        Ok(Self {
            fatigue_channel,
            channels,
            fatigue: FatigueAccumulator::new(config.fatigue)?,
            scorer: RiskScorer::new(config.model.clone())?,
            alert: AlertStateMachine::new(config.alert, config.danger_dwell_ms)?,
            timer: IntervalTimer::new(config.tick_interval_ms),
            started_at: None,
            ticks: 0,
            last_output: None,
            config,
        })
    }

    /// Run one tick at `now`
    pub fn process(&mut self, sample: &FeatureSample, now: Timestamp) -> EngineOutput {
        let started = *self.started_at.get_or_insert(now);
        let uptime_s = now.saturating_sub(started) as f32 / MS_PER_SECOND as f32;
        let crack = sample.crack();
        let hard_fault = crack.unwrap_or(false);

        let mut features: Vec<(FeatureName, f32), MAX_FEATURES> = Vec::new();
        let mut fatigue_signal = None;

        for (i, channel) in self.channels.iter_mut().enumerate() {
            let name = channel.config.name;
            let value = channel.evaluate(sample.get(&name), uptime_s);

            if self.fatigue_channel == Some(i) {
                fatigue_signal = Some(value);
            }
            let _ = features.push((name, value));
        }

        let fatigue_index = match fatigue_signal {
            Some(signal) => self.fatigue.update(signal, hard_fault),
            None => self.fatigue.index(),
        };

        let score = self.scorer.score(&features, crack);
        let risk_percent = score.percent();
        let transition = self.alert.update(risk_percent, hard_fault, now);

        let remaining_life = FATIGUE_MAX - fatigue_index;
        let remaining_years = remaining_life / FATIGUE_MAX * self.config.design_years;

        self.ticks = self.ticks.saturating_add(1);

        let output = EngineOutput {
            timestamp: now,
            risk_percent,
            fatigue_index,
            remaining_life,
            remaining_years: if remaining_years.is_valid() {
                remaining_years.max(0.0)
            } else {
                0.0
            },
            alert: self.alert.level(),
            escalation_pending: self.alert.is_escalation_pending(),
            transition,
        };

        log_debug!(
            "Tick {} at {} ms: risk {}%, fatigue {}, {}",
            self.ticks,
            now,
            output.risk_percent,
            output.fatigue_index,
            output.alert
        );

        self.last_output = Some(output);
        output
    }

    /// Run a tick if the interval has elapsed
    ///
    /// Returns `WouldBlock` between ticks and while `source` has no sample
    /// ready. A device-level source error is logged and the tick runs with
    /// every feature missing.
    pub fn poll<S: SensorSource>(
        &mut self,
        source: &mut S,
        now: Timestamp,
    ) -> nb::Result<EngineOutput, Infallible> {
        if !self.timer.is_due(now) {
            return Err(nb::Error::WouldBlock);
        }

        let sample = match source.poll_sample() {
            Ok(sample) => sample,
            Err(nb::Error::WouldBlock) => return Err(nb::Error::WouldBlock),
            Err(nb::Error::Other(_e)) => {
                log_warn!("Sensor source failed, running tick without readings: {:?}", _e);
                FeatureSample::new()
            }
        };

        self.timer.mark(now);
        Ok(self.process(&sample, now))
    }

    /// Set or override a deflection baseline
    ///
    /// Returns `false` if `feature` is not a deflection feature or
    /// `baseline` is not finite.
    pub fn set_baseline(&mut self, feature: &FeatureName, baseline: f32) -> bool {
        if !baseline.is_valid() {
            return false;
        }

        match self.channels.iter_mut().find(|c| c.config.name == *feature) {
            Some(channel) if matches!(channel.config.role, FeatureRole::Deflection { .. }) => {
                log_info!("Baseline for '{}' set to {}", feature, baseline);
                channel.baseline = Some(baseline);
                if channel.config.filter.fallback.is_none() {
                    channel.filter.set_fallback(baseline);
                }
                true
            }
            _ => false,
        }
    }

    /// Current baseline of a deflection feature
    pub fn baseline(&self, feature: &FeatureName) -> Option<f32> {
        self.channels
            .iter()
            .find(|c| c.config.name == *feature)
            .and_then(|c| c.baseline)
    }

    /// Explicit re-initialization: SAFE, zero fatigue, empty filters
    ///
    /// Configured baselines are restored; captured ones are dropped.
    pub fn reset(&mut self) {
        log_info!("Engine reset after {} ticks", self.ticks);
        for channel in self.channels.iter_mut() {
            channel.reset();
        }
        self.fatigue.reset();
        self.alert.reset();
        self.timer.reset();
        self.started_at = None;
        self.ticks = 0;
        self.last_output = None;
    }

    /// Current alert level
    pub fn level(&self) -> AlertLevel {
        self.alert.level()
    }

    /// Current fatigue index
    pub fn fatigue_index(&self) -> f32 {
        self.fatigue.index()
    }

    /// Ticks processed since construction or the last reset
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Readings of `feature` rejected by its filter
    pub fn rejected(&self, feature: &FeatureName) -> Option<u32> {
        self.channels
            .iter()
            .find(|c| c.config.name == *feature)
            .map(|c| c.filter.rejected())
    }

    /// Output of the most recent tick
    pub fn last_output(&self) -> Option<&EngineOutput> {
        self.last_output.as_ref()
    }

    /// Configuration the engine was built from
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
