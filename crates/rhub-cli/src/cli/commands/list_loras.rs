//! `rhub list-loras` – names accepted by `upload-lora`.

use anyhow::Result;
use rhub_core::config::RhubConfig;
use rhub_core::resolver::{FolderResolver, ModelResolver};

pub fn run_list_loras(cfg: &RhubConfig) -> Result<()> {
    let resolver = FolderResolver::new(cfg.lora_dirs.clone());
    let names = resolver.list();
    if names.is_empty() {
        println!("No LoRA files found ({}).", resolver.search_locations());
        return Ok(());
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}
