//! `{"code", "msg", "data"}` response envelope returned by the control plane.

use serde_json::Value;

use crate::error::UploadError;

/// Parses a control-plane body and returns its `data` object.
///
/// Fails with [`UploadError::Api`] when `code` is non-zero (even on HTTP 200) and
/// with [`UploadError::Protocol`] when the body is not JSON, has no numeric `code`,
/// or carries no `data` object.
pub(crate) fn parse_data(
    endpoint: &str,
    body: &[u8],
) -> Result<serde_json::Map<String, Value>, UploadError> {
    let text = String::from_utf8_lossy(body);
    let protocol = |reason: &str| UploadError::Protocol {
        endpoint: endpoint.to_string(),
        reason: reason.to_string(),
        body: text.to_string(),
    };

    let root: Value =
        serde_json::from_slice(body).map_err(|e| protocol(&format!("malformed JSON ({})", e)))?;
    let code = root
        .get("code")
        .and_then(Value::as_i64)
        .ok_or_else(|| protocol("missing numeric 'code'"))?;
    if code != 0 {
        let msg = root
            .get("msg")
            .and_then(Value::as_str)
            .unwrap_or("unknown API error")
            .to_string();
        return Err(UploadError::Api {
            endpoint: endpoint.to_string(),
            code,
            msg,
            body: text.to_string(),
        });
    }
    match root.get("data") {
        Some(Value::Object(data)) => Ok(data.clone()),
        _ => Err(protocol("'data' is missing or not an object")),
    }
}

/// A string field of `data` that must be present and non-empty.
pub(crate) fn required_str(
    endpoint: &str,
    data: &serde_json::Map<String, Value>,
    field: &str,
) -> Result<String, UploadError> {
    match data.get(field).and_then(Value::as_str).map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(UploadError::Protocol {
            endpoint: endpoint.to_string(),
            reason: format!("'data.{}' is missing or empty", field),
            body: Value::Object(data.clone()).to_string(),
        }),
    }
}
