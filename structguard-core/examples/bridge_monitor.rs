//! Bridge Monitor Example
//!
//! Simulates a footbridge instrumented with a vibration pickup, a load cell,
//! an ultrasonic ranger under the deck and a crack-detection wire, and runs
//! the dwell-qualified engine over two minutes of readings.
//!
//! ## What You'll Learn
//!
//! - Building an engine from a preset
//! - Implementing `SensorSource` and `AlertSink`
//! - Driving the non-blocking `Monitor::poll` loop from a clock
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example bridge_monitor
//! ```

use structguard_core::time::MockTimeSource;
use structguard_core::traits::{AlertSink, SensorSource};
use structguard_core::{
    AlertLevel, AlertTransition, Engine, EngineConfig, EngineOutput, FeatureSample, Monitor,
};

/// Synthetic front end: quiet, then a heavy crossing, then a crack
struct SimulatedBridge {
    tick: u32,
}

impl SensorSource for SimulatedBridge {
    type Error = ();

    fn poll_sample(&mut self) -> nb::Result<FeatureSample, ()> {
        let t = self.tick;
        self.tick += 1;

        // Raw ADC counts (0-1023) and centimetres
        let (vibration, load, distance) = match t {
            0..=29 => (120.0, 150.0, 20.0),
            30..=69 => (700.0, 650.0, 16.5),
            _ => (300.0, 300.0, 18.0),
        };

        let mut sample = FeatureSample::new()
            .with("vibration", vibration)
            .with("load", load)
            .with_crack(t >= 100);

        // Every 17th echo times out
        if t % 17 == 16 {
            sample = sample.with("distance", 1000.0);
        } else {
            sample = sample.with("distance", distance);
        }

        Ok(sample)
    }
}

/// Serial-style reporter standing in for LEDs and buzzer
struct SerialReport;

impl AlertSink for SerialReport {
    fn publish(&mut self, output: &EngineOutput) {
        if output.timestamp % 10_000 == 0 {
            println!(
                "t={:>4}s  risk {:>5.1}%  fatigue {:>5.2}  life {:>5.1}%  ({:.1} y)  {}",
                output.timestamp / 1000,
                output.risk_percent,
                output.fatigue_index,
                output.remaining_life,
                output.remaining_years,
                output.alert
            );
        }
    }

    fn on_transition(&mut self, transition: &AlertTransition) {
        let led = match transition.to {
            AlertLevel::Safe => "green",
            AlertLevel::Warning => "yellow",
            AlertLevel::Danger => "red + buzzer",
        };
        println!(
            ">>> t={}s {} -> {} ({})",
            transition.timestamp / 1000,
            transition.from,
            transition.to,
            led
        );
    }
}

fn main() -> Result<(), structguard_core::ConfigError> {
    println!("StructGuard Bridge Monitor Example");
    println!("==================================\n");

    let config = EngineConfig::dwell_qualified();
    println!(
        "{} features, dwell {} ms, tick {} ms\n",
        config.features.len(),
        config.danger_dwell_ms,
        config.tick_interval_ms
    );

    let clock = MockTimeSource::new(0);
    let engine = Engine::new(config)?;
    let mut monitor = Monitor::new(engine, SimulatedBridge { tick: 0 }, SerialReport, &clock);

    // Poll four times per tick; only one poll per second does any work
    for _ in 0..(120 * 4) {
        let _ = monitor.poll();
        clock.advance(250);
    }

    let engine = monitor.engine();
    println!("\nTicks: {}", engine.tick_count());
    println!(
        "Rejected distance readings: {}",
        engine
            .rejected(&structguard_core::config::names::DISTANCE)
            .unwrap_or(0)
    );
    println!("Final level: {}", engine.level());

    Ok(())
}
