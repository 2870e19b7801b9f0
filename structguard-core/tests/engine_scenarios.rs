//! End-to-end engine scenarios
//!
//! Drives full engines (mostly through a [`Monitor`]) with scripted sensor
//! sources and checks what the actuation side would see.

mod common;

use common::{fusion_config, sample, RecordingSink, ScriptedSource, Step};
use structguard_core::config::names;
use structguard_core::time::MockTimeSource;
use structguard_core::{
    AlertLevel, AlertThresholds, Engine, EngineConfig, FeatureSample, Monitor,
};

const THRESHOLDS: AlertThresholds = AlertThresholds::new(40.0, 70.0, 35.0, 65.0);

/// Vibration value that puts the two-feature fusion model at `pct` risk with zero load
fn vibration_for_risk(pct: f32) -> f32 {
    let p = pct / 100.0;
    let z = (p / (1.0 - p)).ln();
    (z + 4.2) / 5.4
}

fn at_risk(pct: f32) -> FeatureSample {
    sample(vibration_for_risk(pct), 0.0)
}

/// Poll once per second for `ticks` seconds
fn run<S>(monitor: &mut Monitor<S, RecordingSink, &MockTimeSource>, clock: &MockTimeSource, ticks: usize)
where
    S: structguard_core::SensorSource,
{
    for _ in 0..ticks {
        let _ = monitor.poll();
        clock.advance(1000);
    }
}

#[test]
fn reference_inputs_escalate_safe_warning_danger() {
    let clock = MockTimeSource::new(0);
    let engine = Engine::new(fusion_config(THRESHOLDS, 0)).unwrap();
    let source = ScriptedSource::repeat(sample(0.5, 0.5), 3);
    let mut monitor = Monitor::new(engine, source, RecordingSink::default(), &clock);

    run(&mut monitor, &clock, 3);

    let sink = monitor.sink();
    assert_within_tolerance!(sink.outputs[0].risk_percent, 71.09, 0.01);
    assert_within_tolerance!(sink.outputs[0].probability(), 0.7109, 1e-4);
    assert_eq!(
        sink.levels(),
        vec![AlertLevel::Warning, AlertLevel::Danger, AlertLevel::Danger]
    );

    let steps: Vec<_> = sink.transitions.iter().map(|t| (t.from, t.to)).collect();
    assert_eq!(
        steps,
        vec![
            (AlertLevel::Safe, AlertLevel::Warning),
            (AlertLevel::Warning, AlertLevel::Danger),
        ]
    );
    assert_eq!(sink.transitions[1].timestamp, 1000);
}

#[test]
fn warning_dead_band_holds_for_hundred_ticks() {
    let clock = MockTimeSource::new(0);
    let engine = Engine::new(fusion_config(THRESHOLDS, 0)).unwrap();
    let source = ScriptedSource::repeat(at_risk(50.0), 101);
    let mut monitor = Monitor::new(engine, source, RecordingSink::default(), &clock);

    run(&mut monitor, &clock, 101);

    let sink = monitor.sink();
    assert_within_tolerance!(sink.outputs[0].risk_percent, 50.0, 0.01);
    assert!(sink.levels().iter().all(|l| *l == AlertLevel::Warning));
    assert_eq!(sink.transitions.len(), 1);
}

#[test]
fn short_excursion_is_suppressed_by_dwell() {
    let clock = MockTimeSource::new(0);
    let engine = Engine::new(fusion_config(THRESHOLDS, 5000)).unwrap();

    // WARNING, then 80 % for 2 s, then back to 50 %
    let mut steps = vec![Step::Sample(at_risk(50.0))];
    steps.extend((0..3).map(|_| Step::Sample(at_risk(80.0))));
    steps.extend((0..10).map(|_| Step::Sample(at_risk(50.0))));
    let mut monitor = Monitor::new(engine, ScriptedSource::new(steps), RecordingSink::default(), &clock);

    run(&mut monitor, &clock, 14);

    let sink = monitor.sink();
    assert!(sink.levels().iter().all(|l| *l != AlertLevel::Danger));
    assert!(sink.outputs[1].escalation_pending);
    assert!(!sink.outputs[4].escalation_pending);
}

#[test]
fn sustained_excursion_reaches_danger_when_dwell_elapses() {
    let clock = MockTimeSource::new(0);
    let engine = Engine::new(fusion_config(THRESHOLDS, 5000)).unwrap();

    let mut steps = vec![Step::Sample(at_risk(50.0))];
    steps.extend((0..10).map(|_| Step::Sample(at_risk(80.0))));
    let mut monitor = Monitor::new(engine, ScriptedSource::new(steps), RecordingSink::default(), &clock);

    run(&mut monitor, &clock, 11);

    // Condition first holds at t = 1000, dwell elapses at t = 6000
    let sink = monitor.sink();
    let danger = sink
        .transitions
        .iter()
        .find(|t| t.to == AlertLevel::Danger)
        .unwrap();
    assert_eq!(danger.timestamp, 6000);
    assert_eq!(sink.outputs[5].alert, AlertLevel::Warning);
    assert_eq!(sink.outputs[6].alert, AlertLevel::Danger);
}

#[test]
fn de_escalation_is_immediate_with_dwell() {
    let mut engine = Engine::new(fusion_config(THRESHOLDS, 5000)).unwrap();

    for t in 0..8u64 {
        engine.process(&at_risk(90.0), t * 1000);
    }
    assert_eq!(engine.level(), AlertLevel::Danger);

    let out = engine.process(&at_risk(10.0), 8000);
    assert_eq!(out.alert, AlertLevel::Warning);
    let out = engine.process(&at_risk(10.0), 9000);
    assert_eq!(out.alert, AlertLevel::Safe);
}

#[test]
fn ultrasonic_timeout_is_excluded_from_the_window() {
    let mut engine = Engine::new(EngineConfig::dwell_qualified()).unwrap();
    assert!(engine.set_baseline(&names::DISTANCE, 20.0));

    let quiet = |distance: f32| {
        FeatureSample::new()
            .with("vibration", 0.0)
            .with("load", 0.0)
            .with("distance", distance)
            .with_crack(false)
    };

    for t in 0..5u64 {
        engine.process(&quiet(10.0), t * 1000);
    }
    let settled = engine.last_output().copied().unwrap();

    // 1000 cm echo timeout, bound is 400
    let out = engine.process(&quiet(1000.0), 5000);

    assert_eq!(engine.rejected(&names::DISTANCE), Some(1));
    // Deflection stays 10 cm, so risk is unchanged
    assert_within_tolerance!(out.risk_percent, settled.risk_percent, 1e-4);
}

#[test]
fn weighted_sum_preset_matches_logistic_formula() {
    let mut engine = Engine::new(EngineConfig::weighted_sum()).unwrap();

    let tick = |vibration_adc: f32, temperature: f32, load_adc: f32| {
        FeatureSample::new()
            .with("vibration", vibration_adc)
            .with("temperature", temperature)
            .with("load", load_adc)
    };

    // z = 0.7·5 + 0.03·25 + 0.5·2 + 0.02·0 − 8 = −2.75
    let calm = engine.process(&tick(500.0, 25.0, 300.0), 0);
    let expected = 100.0 / (1.0 + 2.75f32.exp());
    assert_within_tolerance!(calm.risk_percent, expected, 1e-3);
    assert_eq!(calm.alert, AlertLevel::Safe);

    // Ten seconds later the duration term adds 0.2
    let later = engine.process(&tick(500.0, 25.0, 300.0), 10_000);
    let expected = 100.0 / (1.0 + 2.55f32.exp());
    assert_within_tolerance!(later.risk_percent, expected, 1e-3);

    // Failed DHT read keeps the last temperature
    let nan_temp = engine.process(&tick(500.0, f32::NAN, 300.0), 10_000);
    assert_within_tolerance!(nan_temp.risk_percent, later.risk_percent, 1e-4);

    // Strong vibration: z = 0.7·9 + 0.75 + 1 + 0.2 − 8 = 0.25, above 40 %
    let shaking = engine.process(&tick(900.0, 25.0, 300.0), 10_000);
    assert!(shaking.risk_percent > 40.0);
    assert_eq!(shaking.alert, AlertLevel::Warning);
    assert_eq!(engine.fatigue_index(), 0.0);
}

#[test]
fn crack_drives_danger_and_holds_it() {
    let clock = MockTimeSource::new(0);
    let engine = Engine::new(EngineConfig::deflection_fusion()).unwrap();

    let cracked = FeatureSample::new()
        .with("vibration", 0.0)
        .with("load", 0.0)
        .with("distance", 20.0)
        .with_crack(true);
    let mut steps: Vec<Step> = (0..5).map(|_| Step::Sample(cracked.clone())).collect();
    steps.push(Step::Sample(cracked.clone().with_crack(false)));

    let mut monitor = Monitor::new(engine, ScriptedSource::new(steps), RecordingSink::default(), &clock);
    run(&mut monitor, &clock, 6);

    assert_eq!(
        monitor.sink().levels(),
        vec![
            AlertLevel::Warning,
            AlertLevel::Danger,
            AlertLevel::Danger,
            AlertLevel::Danger,
            AlertLevel::Danger,
            AlertLevel::Warning,
        ]
    );
}

#[test]
fn source_faults_and_stalls() {
    let clock = MockTimeSource::new(0);
    let engine = Engine::new(fusion_config(THRESHOLDS, 0)).unwrap();
    let source = ScriptedSource::new([
        Step::Sample(sample(0.1, 0.1)),
        Step::NotReady,
        Step::Fault,
        Step::Sample(sample(0.1, 0.1)),
    ]);
    let mut monitor = Monitor::new(engine, source, RecordingSink::default(), &clock);

    assert!(monitor.poll().is_ok());

    // Sub-interval poll never reaches the source
    clock.advance(400);
    assert_eq!(monitor.poll(), Err(nb::Error::WouldBlock));

    clock.advance(600);
    assert_eq!(monitor.poll(), Err(nb::Error::WouldBlock));

    // Fault: tick still runs with held values
    let faulted = monitor.poll().unwrap();
    assert_eq!(faulted.timestamp, 1000);
    assert_eq!(faulted.alert, AlertLevel::Safe);

    let (engine, source, sink, _) = monitor.release();
    assert_eq!(engine.tick_count(), 2);
    assert_eq!(source.polls, 3);
    assert_eq!(sink.outputs.len(), 2);
}

#[test]
fn fatigue_accrues_and_recovers_with_deflection() {
    let mut engine = Engine::new(EngineConfig::deflection_fusion()).unwrap();

    let at = |distance: f32| {
        FeatureSample::new()
            .with("vibration", 0.0)
            .with("load", 0.0)
            .with("distance", distance)
    };

    // Baseline captured at 20 cm
    engine.process(&at(20.0), 0);

    // 10 cm sag for 20 ticks: 0.05 · 10 per tick
    for t in 1..=20u64 {
        engine.process(&at(10.0), t * 1000);
    }
    assert_within_tolerance!(engine.fatigue_index(), 10.0, 1e-3);

    // Back at rest: slow recovery
    for t in 21..=120u64 {
        engine.process(&at(20.0), t * 1000);
    }
    assert_within_tolerance!(engine.fatigue_index(), 9.0, 1e-3);

    let out = engine.last_output().unwrap();
    assert_within_tolerance!(out.remaining_life, 91.0, 1e-3);
    assert_within_tolerance!(out.remaining_years, 45.5, 1e-3);
}

#[test]
fn reset_reinitializes_engine() {
    let mut engine = Engine::new(fusion_config(THRESHOLDS, 0)).unwrap();
    engine.process(&sample(0.5, 0.5), 0);
    engine.process(&sample(0.5, 0.5), 1000);
    assert_eq!(engine.level(), AlertLevel::Danger);

    engine.reset();
    assert_eq!(engine.level(), AlertLevel::Safe);
    assert_eq!(engine.tick_count(), 0);

    let out = engine.process(&sample(0.0, 0.0), 2000);
    assert_eq!(out.alert, AlertLevel::Safe);
    assert!(out.transition.is_none());
}

#[test]
fn json_configured_engine() {
    let json = r#"{
        "features": [
            { "name": "vibration" },
            { "name": "load", "filter": { "mode": { "moving_average": { "window": 3 } } } }
        ],
        "model": {
            "weights": [
                { "feature": "vibration", "weight": 5.4 },
                { "feature": "load", "weight": 4.8 }
            ],
            "bias": -4.2
        },
        "alert": { "high_enter": 40.0, "danger_enter": 70.0, "safe_exit": 35.0, "danger_exit": 65.0 }
    }"#;

    let mut engine = Engine::new(EngineConfig::from_json(json).unwrap()).unwrap();
    let out = engine.process(&sample(0.5, 0.5), 0);
    assert_within_tolerance!(out.risk_percent, 71.09, 0.01);
}
