//! Retry loop: run a closure until success or policy says stop.

use super::classify;
use super::error::AttemptError;
use super::policy::{RetryDecision, RetryPolicy};
use super::sleep::Sleeper;

/// Last error seen when the loop stopped, and how many attempts were made.
#[derive(Debug)]
pub struct GaveUp {
    pub attempts: u32,
    pub error: AttemptError,
}

/// Runs `f` (given the 1-based attempt number) until it succeeds or the retry
/// policy says to stop. On retryable failure, sleeps for the backoff duration
/// then tries again.
pub fn run_with_retry<T, F>(
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    mut f: F,
) -> Result<T, GaveUp>
where
    F: FnMut(u32) -> Result<T, AttemptError>,
{
    let mut attempt = 1u32;
    loop {
        match f(attempt) {
            Ok(v) => return Ok(v),
            Err(e) => {
                let kind = classify::classify(&e);
                match policy.decide(attempt, kind) {
                    RetryDecision::NoRetry => {
                        return Err(GaveUp {
                            attempts: attempt,
                            error: e,
                        })
                    }
                    RetryDecision::RetryAfter(d) => {
                        tracing::warn!(
                            "attempt {}/{} failed ({:?}): {}; retrying in {:?}",
                            attempt,
                            policy.max_attempts,
                            kind,
                            e,
                            d
                        );
                        sleeper.sleep(d);
                        attempt += 1;
                    }
                }
            }
        }
    }
}
