//! Step one of a LoRA upload: ask the control plane for a presigned URL.

use serde::Serialize;

use super::envelope::{parse_data, required_str};
use super::{http, UploadTarget, Uploader, LORA_UPLOAD_URL_PATH};
use crate::error::UploadError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadUrlRequest<'a> {
    api_key: &'a str,
    lora_name: &'a str,
    md5_hex: &'a str,
}

impl Uploader {
    /// Requests an upload target for `lora_name` with content hash `md5_hex`.
    ///
    /// A single POST; transport failures and non-2xx statuses are returned
    /// immediately as [`UploadError::Network`] without retrying.
    pub fn request_upload_target(
        &self,
        lora_name: &str,
        md5_hex: &str,
    ) -> Result<UploadTarget, UploadError> {
        let endpoint = self.api.endpoint(LORA_UPLOAD_URL_PATH);
        let payload = UploadUrlRequest {
            api_key: &self.api.api_key,
            lora_name,
            md5_hex,
        };
        let json = serde_json::to_vec(&payload).map_err(|e| UploadError::Protocol {
            endpoint: endpoint.clone(),
            reason: format!("cannot encode request ({})", e),
            body: String::new(),
        })?;
        tracing::info!(
            "requesting upload URL from {} for loraName={} md5={}",
            endpoint,
            lora_name,
            md5_hex
        );

        let resp = http::post_json(&endpoint, &json, &self.http).map_err(|error| {
            UploadError::Network {
                endpoint: endpoint.clone(),
                error,
            }
        })?;
        tracing::debug!(
            "upload URL response (HTTP {}): {}",
            resp.status,
            String::from_utf8_lossy(&resp.body)
        );

        let data = parse_data(&endpoint, &resp.body)?;
        let target = UploadTarget {
            presigned_url: required_str(&endpoint, &data, "url")?,
            server_file_name: required_str(&endpoint, &data, "fileName")?,
        };
        tracing::info!(
            "got upload target {} (server file name {})",
            http::redact_query(&target.presigned_url),
            target.server_file_name
        );
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_uses_camel_case_keys() {
        let payload = UploadUrlRequest {
            api_key: "k",
            lora_name: "myLora",
            md5_hex: "d41d8cd98f00b204e9800998ecf8427e",
        };
        let v: serde_json::Value = serde_json::to_value(&payload).unwrap();
        assert_eq!(v["apiKey"], "k");
        assert_eq!(v["loraName"], "myLora");
        assert_eq!(v["md5Hex"], "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(v.as_object().unwrap().len(), 3);
    }
}
