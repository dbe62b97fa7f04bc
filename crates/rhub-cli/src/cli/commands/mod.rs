//! CLI command handlers, one per file.

mod checksum;
mod list_loras;
mod show_config;
mod upload_image;
mod upload_lora;

pub use checksum::run_checksum;
pub use list_loras::run_list_loras;
pub use show_config::run_show_config;
pub use upload_image::run_upload_image;
pub use upload_lora::run_upload_lora;
