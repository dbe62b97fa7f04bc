//! `rhub checksum <path>` – MD5 of a file, as sent in upload requests.

use anyhow::Result;
use rhub_core::checksum;
use std::path::Path;

pub fn run_checksum(path: &Path) -> Result<()> {
    let digest = checksum::md5_path(path)?;
    println!("{}  {}", digest, path.display());
    Ok(())
}
