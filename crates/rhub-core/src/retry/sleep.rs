//! Blocking wait between attempts.

use std::time::Duration;

/// Waits out a backoff delay. Injected so retries can be tested without real sleeps.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, delay: Duration);
}

/// Blocks the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, delay: Duration) {
        std::thread::sleep(delay);
    }
}
