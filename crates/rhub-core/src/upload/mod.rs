//! Upload client for the RunningHub open API.
//!
//! LoRA files go through a two-step protocol: the control plane is asked for a
//! presigned URL (identified by the file's MD5), then the bytes are PUT to that
//! URL with bounded retries. Images are sent in a single multipart POST.
//!
//! Every operation is a fresh, independent call chain; nothing is cached
//! between invocations, so a failed upload is simply re-run from the start.

mod envelope;
mod http;
mod image;
mod lora;
mod target;

use std::path::Path;

use crate::config::{ApiConfig, HttpConfig, RhubConfig};
use crate::error::UploadError;
use crate::retry::{self, RetryPolicy, Sleeper, ThreadSleeper};

pub use http::{redact_query, USER_AGENT};
pub use image::IMAGE_EXTENSIONS;

/// Control-plane path that issues presigned LoRA upload URLs.
pub const LORA_UPLOAD_URL_PATH: &str = "/api/openapi/getLoraUploadUrl";
/// Control-plane path accepting multipart image uploads.
pub const IMAGE_UPLOAD_PATH: &str = "/task/openapi/upload";

/// Where to send the bytes, as issued by the control plane. Consumed by [`Uploader::upload_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub presigned_url: String,
    pub server_file_name: String,
}

/// Name the service assigned to the uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub server_file_name: String,
}

/// A LoRA upload as the user selected it.
#[derive(Debug, Clone, Default)]
pub struct LoraUploadRequest {
    /// Logical name, resolved through a [`crate::resolver::ModelResolver`].
    pub lora_name: String,
    /// Name to register on the server; blank means "derive from the file name".
    pub server_name: Option<String>,
}

/// Client for one RunningHub account. Holds no state between calls.
pub struct Uploader {
    api: ApiConfig,
    http: HttpConfig,
    retry: RetryPolicy,
    sleeper: Box<dyn Sleeper>,
}

impl Uploader {
    /// Builds a client after checking the api key and base URL are present.
    pub fn new(api: &ApiConfig) -> Result<Self, UploadError> {
        Ok(Self {
            api: api.validated()?,
            http: HttpConfig::default(),
            retry: RetryPolicy::default(),
            sleeper: Box::new(ThreadSleeper),
        })
    }

    /// Client using the API settings, timeouts and retry policy from `cfg`.
    pub fn from_config(cfg: &RhubConfig) -> Result<Self, UploadError> {
        Ok(Self::new(&cfg.api)?
            .with_http(cfg.http())
            .with_retry_policy(cfg.retry_policy()))
    }

    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// PUT the file to the presigned URL, retrying network failures and non-2xx
    /// answers per the retry policy. The file is reopened for every attempt.
    pub fn upload_file(
        &self,
        path: &Path,
        target: UploadTarget,
    ) -> Result<UploadResult, UploadError> {
        let shown_url = redact_query(&target.presigned_url);
        tracing::info!("uploading {} to {}", path.display(), shown_url);

        let outcome = retry::run_with_retry(&self.retry, &*self.sleeper, |attempt| {
            let resp = http::put_file(&target.presigned_url, path, &self.http)?;
            tracing::debug!(
                "PUT attempt {}/{} -> HTTP {}",
                attempt,
                self.retry.max_attempts,
                resp.status
            );
            Ok(attempt)
        });

        match outcome {
            Ok(attempts) => {
                tracing::info!(
                    "upload of {} complete after {} attempt(s); server file name {}",
                    path.display(),
                    attempts,
                    target.server_file_name
                );
                Ok(UploadResult {
                    server_file_name: target.server_file_name,
                })
            }
            Err(gave_up) => {
                tracing::error!(
                    "upload to {} failed after {} attempt(s): {}",
                    shown_url,
                    gave_up.attempts,
                    gave_up.error
                );
                Err(UploadError::UploadFailed {
                    url: shown_url,
                    attempts: gave_up.attempts,
                    error: gave_up.error,
                })
            }
        }
    }
}
