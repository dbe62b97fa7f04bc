//! Error type shared by every upload operation.
//!
//! Each variant carries enough context (endpoint, status, body) to diagnose a
//! failed call from a log line alone, so the underlying error is rendered into
//! the message rather than chained as a source.

use std::path::PathBuf;

use thiserror::Error;

use crate::retry::AttemptError;

#[derive(Debug, Error)]
pub enum UploadError {
    /// Missing or empty api key / base URL, or an input the service cannot accept.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The logical model name did not resolve to a local regular file.
    #[error("file not found: '{name}' (searched: {searched})")]
    FileNotFound { name: String, searched: String },

    /// Reading the file while computing its content hash failed.
    #[error("failed to hash {}: {error}", path.display())]
    Hash { path: PathBuf, error: std::io::Error },

    /// The control plane answered with a non-zero `code`.
    #[error("{endpoint}: API reported error (code {code}): {msg}; response: {body}")]
    Api {
        endpoint: String,
        code: i64,
        msg: String,
        body: String,
    },

    /// The response could not be parsed or lacked required fields.
    #[error("{endpoint}: invalid response: {reason}; response: {body}")]
    Protocol {
        endpoint: String,
        reason: String,
        body: String,
    },

    /// Transport failure or non-2xx status on a single-shot request.
    #[error("{endpoint}: request failed: {error}")]
    Network { endpoint: String, error: AttemptError },

    /// The presigned PUT did not succeed within the retry budget.
    #[error("upload to {url} failed after {attempts} attempt(s): {error}")]
    UploadFailed {
        url: String,
        attempts: u32,
        error: AttemptError,
    },
}

impl UploadError {
    /// HTTP status of the last response, when one was received.
    pub fn status(&self) -> Option<u32> {
        match self {
            UploadError::Network { error, .. } | UploadError::UploadFailed { error, .. } => {
                error.status()
            }
            _ => None,
        }
    }
}
