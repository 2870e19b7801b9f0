//! Alert State Machine
//!
//! Debounces collapse risk into three levels with hysteresis and optional
//! dwell qualification.
//!
//! ## Transitions
//!
//! ```text
//!            risk > high_enter            risk > danger_enter ∨ crack
//!          ┌──────────────────┐          ┌───────────────────────────┐
//!          │                  ▼          │                           ▼
//!        SAFE              WARNING ──────┘                        DANGER
//!          ▲                  │  ▲                                   │
//!          └──────────────────┘  └───────────────────────────────────┘
//!            risk < safe_exit      risk < danger_exit ∧ ¬crack
//! ```
//!
//! - One transition per tick at most, so SAFE never jumps to DANGER.
//! - A crack while SAFE escalates to WARNING first, whatever the risk. This
//!   edge extends the risk-only table above (SAFE has no crack exit there);
//!   a hard fault is never allowed to leave the level at SAFE.
//! - Exit thresholds sit strictly below enter thresholds; risk inside the gap
//!   never moves the state (dead band).
//!
//! ## Dwell Qualification
//!
//! With `min_dwell_ms > 0`, the DANGER enter condition arms a pending timer
//! the first tick it holds (even while still SAFE). The visible level stays
//! put until `now − pending_since ≥ min_dwell_ms`. If the condition lapses
//! first, the timer is cancelled. De-escalation never waits.
//!
//! ```text
//! risk:     50   80   80   80   80   80   80
//! t (s):     0    1    2    3    4    5    6
//! level:    W    W    W    W    W    W    D      (dwell 5 s, armed at t=1)
//! ```

use core::fmt;

use crate::errors::{ConfigError, ConfigResult};
use crate::events::AlertTransition;
use crate::time::Timestamp;
use crate::validation::Validatable;

/// Externally visible alert level, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertLevel {
    /// Normal operation
    #[default]
    Safe,
    /// Elevated risk
    Warning,
    /// Collapse risk high or crack detected
    Danger,
}

impl AlertLevel {
    /// Upper-case label used by serial reporting
    pub const fn label(&self) -> &'static str {
        match self {
            AlertLevel::Safe => "SAFE",
            AlertLevel::Warning => "WARNING",
            AlertLevel::Danger => "DANGER",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Hysteresis thresholds on the 0-100 risk scale
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlertThresholds {
    /// SAFE → WARNING when risk exceeds this
    pub high_enter: f32,
    /// WARNING → DANGER when risk exceeds this
    pub danger_enter: f32,
    /// WARNING → SAFE when risk drops below this
    pub safe_exit: f32,
    /// DANGER → WARNING when risk drops below this
    pub danger_exit: f32,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        use crate::constants::alert::*;
        Self {
            high_enter: HIGH_ENTER_PCT,
            danger_enter: DANGER_ENTER_PCT,
            safe_exit: SAFE_EXIT_PCT,
            danger_exit: DANGER_EXIT_PCT,
        }
    }
}

impl AlertThresholds {
    /// Thresholds in `(high_enter, danger_enter, safe_exit, danger_exit)` order
    pub const fn new(high_enter: f32, danger_enter: f32, safe_exit: f32, danger_exit: f32) -> Self {
        Self {
            high_enter,
            danger_enter,
            safe_exit,
            danger_exit,
        }
    }

    /// Check ranges and ordering
    pub fn validate(&self) -> ConfigResult<()> {
        for value in [self.high_enter, self.danger_enter, self.safe_exit, self.danger_exit] {
            if !value.is_valid() || !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { value });
            }
        }

        if self.safe_exit >= self.high_enter {
            return Err(ConfigError::ThresholdOrder {
                transition: "warning/safe",
                enter: self.high_enter,
                exit: self.safe_exit,
            });
        }

        if self.danger_exit >= self.danger_enter {
            return Err(ConfigError::ThresholdOrder {
                transition: "danger/warning",
                enter: self.danger_enter,
                exit: self.danger_exit,
            });
        }

        if self.high_enter >= self.danger_enter {
            return Err(ConfigError::InvalidParameter {
                reason: "high_enter must be below danger_enter",
            });
        }

        Ok(())
    }
}

/// Hysteresis state machine over [`AlertLevel`]
#[derive(Debug, Clone)]
pub struct AlertStateMachine {
    thresholds: AlertThresholds,
    min_dwell_ms: u64,
    level: AlertLevel,
    pending_since: Option<Timestamp>,
}

impl AlertStateMachine {
    /// Build a machine in SAFE; `min_dwell_ms = 0` escalates immediately
    pub fn new(thresholds: AlertThresholds, min_dwell_ms: u64) -> ConfigResult<Self> {
        thresholds.validate()?;
        Ok(Self {
            thresholds,
            min_dwell_ms,
            level: AlertLevel::Safe,
            pending_since: None,
        })
    }

    /// Current visible level
    pub fn level(&self) -> AlertLevel {
        self.level
    }

    /// Thresholds in use
    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    /// Dwell required before DANGER becomes visible
    pub fn min_dwell_ms(&self) -> u64 {
        self.min_dwell_ms
    }

    /// When the DANGER enter condition started holding, if it is armed
    pub fn pending_since(&self) -> Option<Timestamp> {
        self.pending_since
    }

    /// True while DANGER is armed but not yet visible
    pub fn is_escalation_pending(&self) -> bool {
        self.pending_since.is_some() && self.level != AlertLevel::Danger
    }

    /// Evaluate one tick
    ///
    /// `risk_percent` is clamped to [0, 100]; a NaN risk leaves the state
    /// untouched. Returns the transition if the visible level changed.
    pub fn update(
        &mut self,
        risk_percent: f32,
        hard_fault: bool,
        now: Timestamp,
    ) -> Option<AlertTransition> {
        if risk_percent.is_nan() {
            log_warn!("NaN risk ignored by alert state machine");
            return None;
        }
        let risk = risk_percent.clamp(0.0, 100.0);
        let t = self.thresholds;
        let danger_condition = risk > t.danger_enter || hard_fault;

        let next = match self.level {
            AlertLevel::Safe => {
                if danger_condition {
                    self.arm(now);
                    AlertLevel::Warning
                } else if risk > t.high_enter {
                    AlertLevel::Warning
                } else {
                    AlertLevel::Safe
                }
            }
            AlertLevel::Warning => {
                if danger_condition {
                    if self.dwell_elapsed(now) {
                        AlertLevel::Danger
                    } else {
                        AlertLevel::Warning
                    }
                } else {
                    self.disarm();
                    if risk < t.safe_exit {
                        AlertLevel::Safe
                    } else {
                        AlertLevel::Warning
                    }
                }
            }
            AlertLevel::Danger => {
                if risk < t.danger_exit && !hard_fault {
                    AlertLevel::Warning
                } else {
                    AlertLevel::Danger
                }
            }
        };

        if next == AlertLevel::Danger || next == AlertLevel::Safe {
            self.pending_since = None;
        }

        if next == self.level {
            return None;
        }

        let transition = AlertTransition {
            from: self.level,
            to: next,
            timestamp: now,
        };
        log_info!(
            "Alert {} -> {} at {} ms (risk {}%, crack {})",
            transition.from,
            transition.to,
            now,
            risk,
            hard_fault
        );
        self.level = next;
        Some(transition)
    }

    /// Explicit re-initialization to SAFE
    pub fn reset(&mut self) {
        self.level = AlertLevel::Safe;
        self.pending_since = None;
    }

    fn arm(&mut self, now: Timestamp) {
        if self.min_dwell_ms > 0 && self.pending_since.is_none() {
            log_debug!("DANGER escalation pending from {} ms", now);
            self.pending_since = Some(now);
        }
    }

    fn disarm(&mut self) {
        if let Some(_since) = self.pending_since.take() {
            log_debug!("DANGER escalation armed at {} ms cancelled", _since);
        }
    }

    fn dwell_elapsed(&mut self, now: Timestamp) -> bool {
        if self.min_dwell_ms == 0 {
            return true;
        }
        self.arm(now);
        match self.pending_since {
            Some(since) => now.saturating_sub(since) >= self.min_dwell_ms,
            None => false,
        }
    }
}
