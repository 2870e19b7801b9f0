//! Fixed-Capacity Circular Buffer for Filter Windows
//!
//! ## Overview
//!
//! The moving-average filter needs the last N samples of a feature. This
//! buffer holds them without dynamic allocation: capacity is a compile-time
//! constant, and the active window length N is chosen at construction.
//!
//! ## Design Rationale
//!
//! ### Why Slots Are `Option<f32>`
//!
//! A reading rejected as implausible still *happened*: it takes its turn in the
//! window and evicts the oldest sample, but it must not contribute its value.
//! Storing `None` in that slot gives exactly that:
//!
//! ```text
//! window = 5, after [10, 10, 10, 10, 10] then 1000 (rejected):
//! ┌──────┬──────┬──────┬──────┬──────┐
//! │ None │  10  │  10  │  10  │  10  │   valid_mean = 40 / 4 = 10
//! └──────┴──────┴──────┴──────┴──────┘
//!    ↑
//!    └── write_pos wrapped here
//! ```
//!
//! ### Why Not `heapless::HistoryBuffer`?
//!
//! The window length is a runtime parameter bounded by the capacity, and the
//! mean must skip invalid slots. Both are simpler with a dedicated type.
//!
//! ### Performance Characteristics
//!
//! - `push()`: O(1)
//! - `valid_mean()`: O(N)
//! - zero heap allocations
//!
//! ## Usage Example
//!
//! ```rust
//! use structguard_core::buffer::CircularBuffer;
//!
//! let mut window: CircularBuffer<8> = CircularBuffer::with_window(3).unwrap();
//! window.push(Some(1.0));
//! window.push(None); // rejected reading
//! window.push(Some(3.0));
//!
//! assert_eq!(window.valid_count(), 2);
//! assert_eq!(window.valid_mean(), Some(2.0));
//! ```

/// Fixed-capacity ring of optional samples
///
/// ## Internal Invariants
///
/// - `1 <= window <= N`
/// - `write_pos < window`
/// - `len <= window`
#[derive(Debug, Clone)]
pub struct CircularBuffer<const N: usize> {
    /// `None` marks a rejected reading (or an unused slot)
    data: [Option<f32>; N],

    /// Active window length
    window: usize,

    /// Index where the next write will occur
    write_pos: usize,

    /// Slots written so far, saturating at `window`
    len: usize,
}

impl<const N: usize> CircularBuffer<N> {
    /// Creates an empty buffer using the full capacity as window
    pub const fn new() -> Self {
        Self {
            data: [None; N],
            window: N,
            write_pos: 0,
            len: 0,
        }
    }

    /// Creates an empty buffer with an active window of `window` slots
    ///
    /// Returns `None` unless `1 <= window <= N`.
    pub fn with_window(window: usize) -> Option<Self> {
        if window == 0 || window > N {
            return None;
        }

        Some(Self {
            data: [None; N],
            window,
            write_pos: 0,
            len: 0,
        })
    }

    /// Writes a sample, evicting the oldest once the window is full
    ///
    /// `None` occupies a slot without contributing a value.
    pub fn push(&mut self, sample: Option<f32>) {
        self.data[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.window;

        if self.len < self.window {
            self.len += 1;
        }
    }

    /// Active window length
    pub fn window(&self) -> usize {
        self.window
    }

    /// Slots written so far (valid or not)
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if nothing was written yet
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if every slot of the window has been written
    pub fn is_full(&self) -> bool {
        self.len == self.window
    }

    /// Number of slots holding a valid sample
    pub fn valid_count(&self) -> usize {
        self.active().iter().filter(|s| s.is_some()).count()
    }

    /// Mean of valid samples, `None` if there are none
    ///
    /// Accumulates in `f64`, so finite samples near `f32::MAX` cannot
    /// overflow the sum. The mean of finite samples is always finite.
    pub fn valid_mean(&self) -> Option<f32> {
        let (sum, count) = self
            .active()
            .iter()
            .flatten()
            .fold((0.0f64, 0usize), |(sum, count), v| (sum + f64::from(*v), count + 1));

        if count == 0 {
            None
        } else {
            Some((sum / count as f64) as f32)
        }
    }

    /// Most recently written slot
    pub fn last(&self) -> Option<Option<f32>> {
        if self.is_empty() {
            return None;
        }

        let idx = if self.write_pos == 0 {
            self.window - 1
        } else {
            self.write_pos - 1
        };

        Some(self.data[idx])
    }

    /// Iterate over written slots from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = Option<f32>> + '_ {
        // Before the first wrap the oldest slot is 0; afterwards it is write_pos
        let start = if self.is_full() { self.write_pos } else { 0 };
        (0..self.len).map(move |i| self.data[(start + i) % self.window])
    }

    /// Clear all samples, keeping the window length
    pub fn clear(&mut self) {
        self.data = [None; N];
        self.write_pos = 0;
        self.len = 0;
    }

    fn active(&self) -> &[Option<f32>] {
        &self.data[..self.len]
    }
}

impl<const N: usize> Default for CircularBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
