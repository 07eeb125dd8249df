//! Time source abstraction for supporting both real-time and virtual time.
//!
//! The carousel never reads the wall clock directly. Every component that needs
//! "now" receives a [`TimeSource`], so the same code runs against the real
//! monotonic clock in the live harness and against a [`VirtualClock`] in tests
//! and in `simulate`, where sleeping simply moves the clock forward.
//!
//! Time is expressed as a [`Duration`] since the source's origin. Only
//! differences between two readings carry meaning.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Trait for abstracting time operations
pub trait TimeSource: Send + Sync {
    /// Time elapsed since this source's origin
    fn now(&self) -> Duration;

    /// Sleep for the specified duration (or simulate it)
    fn sleep(&self, duration: Duration);

    /// Check if this is a simulated time source
    fn is_simulated(&self) -> bool;
}

/// Real-time implementation backed by [`Instant`].
pub struct RealTimeSource {
    origin: Instant,
}

impl RealTimeSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for RealTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for RealTimeSource {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn is_simulated(&self) -> bool {
        false
    }
}

/// Virtual clock that only moves when told to.
///
/// `sleep` advances the clock by exactly the requested duration and returns
/// immediately, the equivalent of a fast-forward simulation.
#[derive(Debug, Default)]
pub struct VirtualClock {
    elapsed_nanos: AtomicU64,
}

impl VirtualClock {
    /// Create a clock reading zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `by`
    pub fn advance(&self, by: Duration) {
        let nanos = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        let _ = self
            .elapsed_nanos
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                Some(current.saturating_add(nanos))
            });
    }

    /// Move the clock to `to` if it lies in the future; the clock never runs backwards.
    pub fn advance_to(&self, to: Duration) {
        let target = u64::try_from(to.as_nanos()).unwrap_or(u64::MAX);
        self.elapsed_nanos.fetch_max(target, Ordering::SeqCst);
    }
}

impl TimeSource for VirtualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos.load(Ordering::SeqCst))
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }

    fn is_simulated(&self) -> bool {
        true
    }
}
