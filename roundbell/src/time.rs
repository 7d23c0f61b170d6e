//! The clock seam used by the timer registry.

use tokio::time::Instant;

/// The registry's source of monotonic time.
///
/// All deadline arithmetic goes through this one seam. It reads
/// `tokio::time::Instant`, so under `#[tokio::test(start_paused = true)]`
/// the runtime's virtual clock takes over and timing logic is fully
/// deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clock;

impl Clock {
    pub fn new() -> Self {
        Self
    }

    /// The current instant.
    pub fn now(&self) -> Instant {
        Instant::now()
    }
}
