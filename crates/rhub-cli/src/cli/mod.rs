//! CLI for uploading LoRA models and images to RunningHub.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rhub_core::config::{self, RhubConfig};
use std::path::PathBuf;

use commands::{run_checksum, run_list_loras, run_show_config, run_upload_image, run_upload_lora};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "rhub")]
#[command(about = "Upload LoRA models and images to RunningHub", long_about = None)]
pub struct Cli {
    /// API key to use instead of the one in config.toml.
    #[arg(long, global = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Base URL to use instead of the one in config.toml.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Echo log output to stderr as well as the log file.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Upload a LoRA file and print the file name assigned by the server.
    UploadLora {
        /// LoRA file name relative to a LoRA folder (e.g. `style/ink.safetensors`).
        name: String,

        /// Name to register on the server (default: file name without extension).
        #[arg(long, value_name = "NAME")]
        server_name: Option<String>,

        /// Extra LoRA folder, searched before the configured ones. Repeatable.
        #[arg(long = "lora-dir", value_name = "DIR")]
        lora_dirs: Vec<PathBuf>,
    },

    /// Upload an image (png, jpg, jpeg, webp) and print its server file name.
    UploadImage {
        /// Path to the image.
        path: PathBuf,
    },

    /// List LoRA files found in the LoRA folders.
    ListLoras {
        /// Extra LoRA folder, searched before the configured ones. Repeatable.
        #[arg(long = "lora-dir", value_name = "DIR")]
        lora_dirs: Vec<PathBuf>,
    },

    /// Compute the MD5 the service uses to identify a file.
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },

    /// Show the effective configuration and where it is stored.
    Config,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, cfg: &mut RhubConfig) {
        if let Some(key) = &self.api_key {
            cfg.api.api_key = key.clone();
        }
        if let Some(url) = &self.base_url {
            cfg.api.base_url = url.clone();
        }
        if let CliCommand::UploadLora { lora_dirs, .. } | CliCommand::ListLoras { lora_dirs } =
            &self.command
        {
            let mut dirs = lora_dirs.clone();
            dirs.append(&mut cfg.lora_dirs);
            cfg.lora_dirs = dirs;
        }
    }

    pub fn run(self) -> Result<()> {
        let mut cfg = config::load_or_init()?;
        self.apply_overrides(&mut cfg);
        tracing::debug!(
            "base_url={} lora_dirs={:?} retry={:?}",
            cfg.api.base_url,
            cfg.lora_dirs,
            cfg.retry_policy()
        );

        match self.command {
            CliCommand::UploadLora {
                name, server_name, ..
            } => run_upload_lora(&cfg, &name, server_name)?,
            CliCommand::UploadImage { path } => run_upload_image(&cfg, &path)?,
            CliCommand::ListLoras { .. } => run_list_loras(&cfg)?,
            CliCommand::Checksum { path } => run_checksum(&path)?,
            CliCommand::Config => run_show_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
