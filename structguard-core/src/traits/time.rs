//! Time Source Abstraction for Embedded Systems
//!
//! This module provides the `TimeSource` trait which abstracts time handling
//! across platforms and test environments.
//!
//! ## Design Goals
//!
//! - **Platform Independence**: Works on bare metal, RTOS, and Linux
//! - **Testability**: Easy to mock for deterministic testing
//! - **Efficiency**: Zero allocation, minimal overhead
//!
//! ## Common Implementations
//!
//! - `StdMonotonic`: `std::time::Instant` based, hosted targets
//! - `MockTimeSource`: controllable time for testing

use crate::time::Timestamp;

/// Source of time for the system
///
/// Tick cadence and dwell qualification both measure intervals, so the source
/// should be monotonic. A wall clock works, but a backwards step simply delays
/// the next tick until the clock catches up.
///
/// ## Example Implementation
///
/// ```rust
/// use structguard_core::traits::TimeSource;
/// use structguard_core::time::Timestamp;
///
/// struct SysTick {
///     // ... hardware timer handle
/// }
///
/// impl TimeSource for SysTick {
///     fn now(&self) -> Timestamp {
///         // Read the millisecond counter
///         0 // placeholder
///     }
///
///     fn is_wall_clock(&self) -> bool {
///         false
///     }
///
///     fn precision_ms(&self) -> u32 {
///         1
///     }
/// }
/// ```
///
/// ## Platform-Specific Considerations
///
/// ### Bare Metal (no_std)
/// - Use a hardware timer peripheral or SysTick counter
/// - A 32-bit millisecond counter wraps after ~49 days; widen it to u64
///
/// ### Linux/Unix
/// - Use CLOCK_MONOTONIC for intervals
pub trait TimeSource {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;

    /// Check if this source provides wall clock time (vs monotonic)
    ///
    /// Wall clock time can be adjusted and may go backwards. Monotonic time
    /// always increases and is only useful for measuring intervals.
    fn is_wall_clock(&self) -> bool;

    /// Get precision in milliseconds
    fn precision_ms(&self) -> u32;
}
