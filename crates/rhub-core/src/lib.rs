pub mod config;
pub mod logging;

pub mod checksum;
pub mod error;
pub mod resolver;
pub mod retry;
pub mod upload;

pub use error::UploadError;
pub use upload::{LoraUploadRequest, UploadResult, UploadTarget, Uploader};
