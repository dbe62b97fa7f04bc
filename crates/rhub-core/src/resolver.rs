//! Resolver interface for turning logical model names into local files.
//!
//! The uploader only depends on [`ModelResolver`]; [`FolderResolver`] is the
//! implementation backed by the configured LoRA folders.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

/// Extensions listed as LoRA / model weight files.
pub const MODEL_EXTENSIONS: &[&str] = &["safetensors", "ckpt", "pt", "pth", "bin"];

/// Locates model files by the name a user selected (e.g. `style/ink.safetensors`).
pub trait ModelResolver {
    /// Absolute path of the named file, or `None` if it does not exist.
    fn resolve(&self, name: &str) -> Option<PathBuf>;

    /// Names (relative, `/`-separated) of every model file that can be resolved.
    fn list(&self) -> Vec<String>;

    /// Human-readable description of where `resolve` looks, for error messages.
    fn search_locations(&self) -> String;
}

/// Searches an ordered list of folders; the first folder containing the file wins.
#[derive(Debug, Clone, Default)]
pub struct FolderResolver {
    roots: Vec<PathBuf>,
}

impl FolderResolver {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

/// Only plain relative names are accepted; anything that could escape the root is rejected.
fn is_safe_relative(name: &Path) -> bool {
    name.components().next().is_some()
        && name
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn has_model_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            MODEL_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(e))
        })
        .unwrap_or(false)
}

impl ModelResolver for FolderResolver {
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let name = name.trim();
        let rel = Path::new(name);
        if name.is_empty() || !is_safe_relative(rel) {
            return None;
        }
        self.roots
            .iter()
            .map(|root| root.join(rel))
            .find(|candidate| candidate.is_file())
            .map(|p| std::path::absolute(&p).unwrap_or(p))
    }

    fn list(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        for root in &self.roots {
            for entry in WalkDir::new(root)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if !entry.file_type().is_file() || !has_model_extension(entry.path()) {
                    continue;
                }
                let Ok(rel) = entry.path().strip_prefix(root) else {
                    continue;
                };
                let parts: Vec<String> = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                names.insert(parts.join("/"));
            }
        }
        names.into_iter().collect()
    }

    fn search_locations(&self) -> String {
        if self.roots.is_empty() {
            return "no LoRA folders configured".to_string();
        }
        self.roots
            .iter()
            .map(|r| r.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Name to request on the server when the caller gave none: the base name of
/// the selected file with its final extension removed.
pub fn default_server_name(selected: &str) -> String {
    let path = Path::new(selected.trim());
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
