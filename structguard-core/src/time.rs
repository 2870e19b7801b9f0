//! Time management for tick-driven monitoring
//!
//! Provides clock implementations and the interval gate that sets the tick
//! cadence:
//! - Monotonic clock (std, for hosted deployments and simulations)
//! - Mock clock (tests and replay)
//! - [`IntervalTimer`] for the `now - last >= interval` check
//!
//! The engine never sleeps. Callers poll as often as they like and the timer
//! decides whether a tick is due.

use core::cell::Cell;

pub use crate::traits::time::TimeSource;

/// Timestamp in milliseconds since an arbitrary monotonic origin
pub type Timestamp = u64;

/// Controllable time source for tests and replay
///
/// Uses interior mutability so a test can hold a shared reference to the clock
/// while the monitor owns another.
#[derive(Debug, Clone, Default)]
pub struct MockTimeSource {
    timestamp: Cell<Timestamp>,
}

impl MockTimeSource {
    /// Create a clock frozen at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp: Cell::new(timestamp),
        }
    }

    /// Jump to an absolute time
    pub fn set(&self, timestamp: Timestamp) {
        self.timestamp.set(timestamp);
    }

    /// Move forward by `ms`
    pub fn advance(&self, ms: u64) {
        self.timestamp.set(self.timestamp.get().saturating_add(ms));
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.timestamp.get()
    }

    fn is_wall_clock(&self) -> bool {
        false
    }

    fn precision_ms(&self) -> u32 {
        1
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Timestamp {
        (**self).now()
    }

    fn is_wall_clock(&self) -> bool {
        (**self).is_wall_clock()
    }

    fn precision_ms(&self) -> u32 {
        (**self).precision_ms()
    }
}

/// Monotonic time since the clock was created (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct StdMonotonic {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdMonotonic {
    /// Start a clock at zero
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdMonotonic {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for StdMonotonic {
    fn now(&self) -> Timestamp {
        self.origin.elapsed().as_millis() as Timestamp
    }

    fn is_wall_clock(&self) -> bool {
        false
    }

    fn precision_ms(&self) -> u32 {
        1
    }
}

/// Fixed-interval tick gate
///
/// A tick is due when no tick has fired yet or when at least `interval_ms`
/// has elapsed since the last one. A clock that steps backwards is treated as
/// "not due" until it catches up again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTimer {
    interval_ms: u64,
    last_tick: Option<Timestamp>,
}

impl IntervalTimer {
    /// Create a timer; the first check is always due
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_tick: None,
        }
    }

    /// Configured interval
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Time of the last fired tick
    pub fn last_tick(&self) -> Option<Timestamp> {
        self.last_tick
    }

    /// Whether a tick should fire at `now`
    pub fn is_due(&self, now: Timestamp) -> bool {
        match self.last_tick {
            None => true,
            Some(last) => now >= last && now - last >= self.interval_ms,
        }
    }

    /// Record that a tick fired at `now`
    pub fn mark(&mut self, now: Timestamp) {
        self.last_tick = Some(now);
    }

    /// Check and mark in one step; returns whether the tick fired
    pub fn try_fire(&mut self, now: Timestamp) -> bool {
        if self.is_due(now) {
            self.mark(now);
            true
        } else {
            false
        }
    }

    /// Forget the last tick so the next check fires immediately
    pub fn reset(&mut self) {
        self.last_tick = None;
    }
}
