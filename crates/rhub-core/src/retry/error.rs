//! Error from a single HTTP attempt, kept unconverted so it can be classified.

use std::fmt;

/// Failure of one request attempt (curl failure, HTTP error, or local read failure).
#[derive(Debug)]
pub enum AttemptError {
    /// Curl reported an error (timeout, connection reset, DNS, etc.).
    Curl(curl::Error),
    /// The server answered with a non-2xx status.
    Http { status: u32, body: String },
    /// Reading the local source file failed. Not retried.
    Io(std::io::Error),
}

impl AttemptError {
    /// Status code of the response, if the server answered at all.
    pub fn status(&self) -> Option<u32> {
        match self {
            AttemptError::Http { status, .. } => Some(*status),
            AttemptError::Curl(_) | AttemptError::Io(_) => None,
        }
    }

    /// Response body of a non-2xx answer.
    pub fn body(&self) -> Option<&str> {
        match self {
            AttemptError::Http { body, .. } => Some(body),
            AttemptError::Curl(_) | AttemptError::Io(_) => None,
        }
    }
}

impl From<curl::Error> for AttemptError {
    fn from(e: curl::Error) -> Self {
        AttemptError::Curl(e)
    }
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptError::Curl(e) => write!(f, "{}", e),
            AttemptError::Http { status, body } if body.is_empty() => write!(f, "HTTP {}", status),
            AttemptError::Http { status, body } => write!(f, "HTTP {}: {}", status, body),
            AttemptError::Io(e) => write!(f, "local read: {}", e),
        }
    }
}

impl std::error::Error for AttemptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AttemptError::Curl(e) => Some(e),
            AttemptError::Io(e) => Some(e),
            AttemptError::Http { .. } => None,
        }
    }
}
