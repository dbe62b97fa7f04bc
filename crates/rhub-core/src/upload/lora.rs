//! Full LoRA upload: resolve, hash, request target, PUT.

use super::{LoraUploadRequest, UploadResult, Uploader};
use crate::checksum;
use crate::error::UploadError;
use crate::resolver::{default_server_name, ModelResolver};

impl Uploader {
    /// Uploads the selected LoRA and returns the file name the server assigned.
    ///
    /// Any failing step aborts the whole operation; nothing is left half-done
    /// on the client side, so the call can be repeated from scratch.
    pub fn upload_lora(
        &self,
        resolver: &dyn ModelResolver,
        request: &LoraUploadRequest,
    ) -> Result<UploadResult, UploadError> {
        let selected = request.lora_name.trim();
        if selected.is_empty() {
            return Err(UploadError::Configuration("no LoRA file selected".into()));
        }

        let local_path = resolver
            .resolve(selected)
            .ok_or_else(|| UploadError::FileNotFound {
                name: selected.to_string(),
                searched: resolver.search_locations(),
            })?;
        tracing::info!("found local LoRA file at {}", local_path.display());

        let md5_hex = checksum::md5_path(&local_path)?;
        tracing::info!("md5 of {}: {}", local_path.display(), md5_hex);

        let server_name = match request.server_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => default_server_name(selected),
        };
        if server_name.is_empty() {
            return Err(UploadError::Configuration(format!(
                "cannot derive a server name from '{}'",
                selected
            )));
        }

        let target = self.request_upload_target(&server_name, &md5_hex)?;
        self.upload_file(&local_path, target)
    }
}
