//! `rhub upload-lora <name>` – presigned upload of a local LoRA.

use anyhow::{Context, Result};
use rhub_core::config::RhubConfig;
use rhub_core::resolver::FolderResolver;
use rhub_core::{LoraUploadRequest, Uploader};

pub fn run_upload_lora(cfg: &RhubConfig, name: &str, server_name: Option<String>) -> Result<()> {
    let uploader = Uploader::from_config(cfg)?;
    let resolver = FolderResolver::new(cfg.lora_dirs.clone());
    let request = LoraUploadRequest {
        lora_name: name.to_string(),
        server_name,
    };
    let result = uploader
        .upload_lora(&resolver, &request)
        .with_context(|| format!("uploading LoRA '{}'", name))?;
    println!("{}", result.server_file_name);
    Ok(())
}
