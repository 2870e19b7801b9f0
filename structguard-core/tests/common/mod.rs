//! Shared fixtures for integration tests
//!
//! - [`ScriptedSource`]: replays a fixed list of samples, then reports missing readings
//! - [`RecordingSink`]: keeps every output and transition it is handed
//! - `assert_within_tolerance!`: float comparison with a readable failure

#![allow(dead_code)]

use std::collections::VecDeque;

use structguard_core::config::{names, FeatureConfig, FilterConfig};
use structguard_core::traits::{AlertSink, SensorSource};
use structguard_core::{
    AlertLevel, AlertThresholds, AlertTransition, EngineConfig, EngineOutput, FeatureSample,
    RiskModel,
};

#[macro_export]
macro_rules! assert_within_tolerance {
    ($actual:expr, $expected:expr, $tolerance:expr) => {
        let diff = ($actual - $expected).abs();
        if diff > $tolerance {
            panic!(
                "Value {} not within tolerance {} of expected {} (diff: {})",
                $actual, $tolerance, $expected, diff
            );
        }
    };
}

/// One scripted poll result
#[derive(Debug, Clone)]
pub enum Step {
    Sample(FeatureSample),
    NotReady,
    Fault,
}

/// Sensor source that replays a script
#[derive(Debug, Default)]
pub struct ScriptedSource {
    steps: VecDeque<Step>,
    pub polls: usize,
}

impl ScriptedSource {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            polls: 0,
        }
    }

    /// The same sample `count` times
    pub fn repeat(sample: FeatureSample, count: usize) -> Self {
        Self::new(std::iter::repeat(Step::Sample(sample)).take(count))
    }
}

impl SensorSource for ScriptedSource {
    type Error = &'static str;

    fn poll_sample(&mut self) -> nb::Result<FeatureSample, Self::Error> {
        self.polls += 1;
        match self.steps.pop_front() {
            Some(Step::Sample(sample)) => Ok(sample),
            Some(Step::NotReady) => Err(nb::Error::WouldBlock),
            Some(Step::Fault) => Err(nb::Error::Other("bus fault")),
            // Script exhausted: every sensor timed out
            None => Ok(FeatureSample::new()),
        }
    }
}

/// Sink that records everything
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub outputs: Vec<EngineOutput>,
    pub transitions: Vec<AlertTransition>,
}

impl RecordingSink {
    pub fn levels(&self) -> Vec<AlertLevel> {
        self.outputs.iter().map(|o| o.alert).collect()
    }
}

impl AlertSink for RecordingSink {
    fn publish(&mut self, output: &EngineOutput) {
        self.outputs.push(*output);
    }

    fn on_transition(&mut self, transition: &AlertTransition) {
        self.transitions.push(*transition);
    }
}

/// Two-feature fusion model on pre-normalized inputs
pub fn fusion_config(thresholds: AlertThresholds, dwell_ms: u64) -> EngineConfig {
    EngineConfig::new(
        RiskModel::new(-4.2)
            .with_weight("vibration", 5.4)
            .with_weight("load", 4.8),
    )
    .with_feature(FeatureConfig::new(names::VIBRATION, FilterConfig::passthrough()))
    .with_feature(FeatureConfig::new(names::LOAD, FilterConfig::passthrough()))
    .with_thresholds(thresholds)
    .with_danger_dwell(dwell_ms)
}

pub fn sample(vibration: f32, load: f32) -> FeatureSample {
    FeatureSample::new()
        .with("vibration", vibration)
        .with("load", load)
}
