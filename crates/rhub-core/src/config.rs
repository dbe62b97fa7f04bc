use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::UploadError;
use crate::retry::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "https://www.runninghub.cn";

/// Credentials and endpoint of the RunningHub open API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the control plane, without a trailing slash.
    pub base_url: String,
    /// API key sent in every control-plane request body.
    pub api_key: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Checks presence only: both fields must be non-blank. Returns a copy with
    /// surrounding whitespace and any trailing `/` removed from the base URL.
    pub fn validated(&self) -> Result<ApiConfig, UploadError> {
        let api_key = self.api_key.trim();
        if api_key.is_empty() {
            return Err(UploadError::Configuration("api key is missing".into()));
        }
        let base_url = self.base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(UploadError::Configuration("base URL is missing".into()));
        }
        Ok(ApiConfig {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Full URL of an API path such as `/api/openapi/getLoraUploadUrl`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Retry policy parameters for the presigned PUT (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Delay in seconds before the second attempt (e.g. 2.0).
    pub base_delay_secs: f64,
    /// Factor applied to the delay after each retry.
    pub multiplier: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 2.0,
            multiplier: 2,
        }
    }
}

/// Timeouts handed to libcurl (optional section in config.toml).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Connection establishment timeout.
    pub connect_timeout_secs: u64,
    /// Total timeout for control-plane requests. PUTs are bounded by the low-speed limit instead.
    pub request_timeout_secs: u64,
    /// Abort a PUT that stays below 1 KiB/s for this long.
    pub low_speed_time_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            request_timeout_secs: 60,
            low_speed_time_secs: 60,
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn low_speed_time(&self) -> Duration {
        Duration::from_secs(self.low_speed_time_secs)
    }
}

/// Global configuration loaded from `~/.config/rhub/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RhubConfig {
    /// Folders searched (in order) for LoRA files.
    #[serde(default)]
    pub lora_dirs: Vec<PathBuf>,
    pub api: ApiConfig,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Optional HTTP timeouts; if missing, built-in defaults are used.
    #[serde(default)]
    pub http: Option<HttpConfig>,
}

impl Default for RhubConfig {
    fn default() -> Self {
        Self {
            lora_dirs: Vec::new(),
            api: ApiConfig::new(DEFAULT_BASE_URL, ""),
            retry: None,
            http: None,
        }
    }
}

impl RhubConfig {
    /// Retry policy from the `[retry]` section, or the 3 attempts / 2s / x2 default.
    pub fn retry_policy(&self) -> RetryPolicy {
        let default = RetryPolicy::default();
        self.retry
            .as_ref()
            .map(|r| RetryPolicy {
                max_attempts: r.max_attempts.max(1),
                base_delay: Duration::try_from_secs_f64(r.base_delay_secs)
                    .unwrap_or(default.base_delay),
                multiplier: r.multiplier,
            })
            .unwrap_or(default)
    }

    pub fn http(&self) -> HttpConfig {
        self.http.unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rhub")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RhubConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RhubConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: RhubConfig = toml::from_str(&data)?;
    Ok(cfg)
}
