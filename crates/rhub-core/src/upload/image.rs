//! Single-request image upload (multipart POST, no presigned step).

use std::path::Path;

use curl::easy::Form;

use super::envelope::{parse_data, required_str};
use super::{http, UploadResult, Uploader, IMAGE_UPLOAD_PATH};
use crate::error::UploadError;

/// Image extensions the service accepts.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

fn image_content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

impl Uploader {
    /// Uploads a local image and returns the server file name to reference it by.
    pub fn upload_image(&self, path: &Path) -> Result<UploadResult, UploadError> {
        let content_type = image_content_type(path).ok_or_else(|| {
            UploadError::Configuration(format!(
                "{} is not a supported image (expected one of: {})",
                path.display(),
                IMAGE_EXTENSIONS.join(", ")
            ))
        })?;
        if !path.is_file() {
            return Err(UploadError::FileNotFound {
                name: path.display().to_string(),
                searched: "local filesystem".to_string(),
            });
        }

        let endpoint = self.api.endpoint(IMAGE_UPLOAD_PATH);
        let form = self.image_form(path, content_type).map_err(|e| {
            UploadError::Configuration(format!("cannot build upload form: {}", e))
        })?;
        tracing::info!("uploading image {} to {}", path.display(), endpoint);

        let resp = http::post_form(&endpoint, form, &self.http).map_err(|error| {
            UploadError::Network {
                endpoint: endpoint.clone(),
                error,
            }
        })?;
        let data = parse_data(&endpoint, &resp.body)?;
        let server_file_name = required_str(&endpoint, &data, "fileName")?;
        tracing::info!("image uploaded as {}", server_file_name);
        Ok(UploadResult { server_file_name })
    }

    fn image_form(&self, path: &Path, content_type: &str) -> Result<Form, curl::FormError> {
        let mut form = Form::new();
        form.part("apiKey")
            .contents(self.api.api_key.as_bytes())
            .add()?;
        form.part("fileType").contents(b"image").add()?;
        form.part("file").file(path).content_type(content_type).add()?;
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_by_extension() {
        assert_eq!(image_content_type(Path::new("a.PNG")), Some("image/png"));
        assert_eq!(image_content_type(Path::new("a.jpeg")), Some("image/jpeg"));
        assert_eq!(image_content_type(Path::new("a.jpg")), Some("image/jpeg"));
        assert_eq!(image_content_type(Path::new("a.webp")), Some("image/webp"));
        assert_eq!(image_content_type(Path::new("a.gif")), None);
        assert_eq!(image_content_type(Path::new("noext")), None);
    }
}
