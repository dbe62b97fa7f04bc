//! Retry and backoff policy.
//!
//! This module encapsulates error classification (timeouts, throttling,
//! connection failures, bad statuses) and exponential backoff decisions so
//! that any step of an upload can be retried with the same policy. Sleeping
//! goes through [`Sleeper`] so tests can observe delays without waiting.

mod classify;
mod error;
mod policy;
mod run;
mod sleep;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::AttemptError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::{run_with_retry, GaveUp};
pub use sleep::{Sleeper, ThreadSleeper};
