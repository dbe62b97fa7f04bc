//! `rhub upload-image <path>`.

use anyhow::{Context, Result};
use rhub_core::config::RhubConfig;
use rhub_core::Uploader;
use std::path::Path;

pub fn run_upload_image(cfg: &RhubConfig, path: &Path) -> Result<()> {
    let uploader = Uploader::from_config(cfg)?;
    let result = uploader
        .upload_image(path)
        .with_context(|| format!("uploading image {}", path.display()))?;
    println!("{}", result.server_file_name);
    Ok(())
}
