//! `rhub config` – effective settings, with the API key masked.

use anyhow::Result;
use rhub_core::config::{self, RhubConfig};
use rhub_core::logging;

/// Shows only the last four characters of a key.
pub(crate) fn mask_key(key: &str) -> String {
    let key = key.trim();
    if key.is_empty() {
        return "(not set)".to_string();
    }
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

pub fn run_show_config(cfg: &RhubConfig) -> Result<()> {
    let retry = cfg.retry_policy();
    let http = cfg.http();
    println!("config file:  {}", config::config_path()?.display());
    println!("log file:     {}", logging::log_file_path()?.display());
    println!("base_url:     {}", cfg.api.base_url);
    println!("api_key:      {}", mask_key(&cfg.api.api_key));
    if cfg.lora_dirs.is_empty() {
        println!("lora_dirs:    (none)");
    } else {
        for (i, dir) in cfg.lora_dirs.iter().enumerate() {
            let label = if i == 0 { "lora_dirs:" } else { "" };
            println!("{:<13} {}", label, dir.display());
        }
    }
    println!(
        "retry:        {} attempts, {:?} base delay, x{}",
        retry.max_attempts, retry.base_delay, retry.multiplier
    );
    println!(
        "http:         connect {:?}, request {:?}, low-speed abort {:?}",
        http.connect_timeout(),
        http.request_timeout(),
        http.low_speed_time()
    );
    Ok(())
}
