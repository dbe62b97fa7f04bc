//! Classify HTTP status and curl errors into retry policy error kinds.

use super::error::AttemptError;
use super::policy::ErrorKind;

/// Classify an HTTP status code for retry decisions.
///
/// Any non-2xx answer from the storage endpoint is worth another attempt;
/// 429 and 503 are singled out so logs show throttling distinctly.
pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        429 | 503 => ErrorKind::Throttled,
        _ => ErrorKind::HttpStatus(u16::try_from(code).unwrap_or(u16::MAX)),
    }
}

/// Classify a curl error for retry decisions.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    // Errors in how the request was built; repeating it cannot help.
    if e.is_url_malformed() || e.is_unsupported_protocol() || e.is_aborted_by_callback() {
        return ErrorKind::Other;
    }
    ErrorKind::Connection
}

/// Classify an attempt error (curl, HTTP, or local I/O) into an ErrorKind.
pub fn classify(e: &AttemptError) -> ErrorKind {
    match e {
        AttemptError::Curl(ce) => classify_curl_error(ce),
        AttemptError::Http { status, .. } => classify_http_status(*status),
        AttemptError::Io(_) => ErrorKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_429_and_503_throttled() {
        assert_eq!(classify_http_status(429), ErrorKind::Throttled);
        assert_eq!(classify_http_status(503), ErrorKind::Throttled);
    }

    #[test]
    fn http_4xx_and_5xx_retryable() {
        assert_eq!(classify_http_status(403), ErrorKind::HttpStatus(403));
        assert_eq!(classify_http_status(500), ErrorKind::HttpStatus(500));
    }

    #[test]
    fn curl_errors() {
        // CURLE_OPERATION_TIMEDOUT = 28, CURLE_COULDNT_CONNECT = 7, CURLE_URL_MALFORMAT = 3
        assert_eq!(classify_curl_error(&curl::Error::new(28)), ErrorKind::Timeout);
        assert_eq!(classify_curl_error(&curl::Error::new(7)), ErrorKind::Connection);
        assert_eq!(classify_curl_error(&curl::Error::new(3)), ErrorKind::Other);
    }

    #[test]
    fn local_io_not_retried() {
        let e = AttemptError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(classify(&e), ErrorKind::Other);
    }
}
