//! Configuration module for censys-asm-search
//!
//! Handles loading settings from YAML files and environment variables.
//! Settings are built once at startup and passed by reference afterwards.

mod settings;

pub use settings::*;

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_ENV: &str = "CENSYS_ASM_SEARCH_SETTINGS";

/// Load settings from the first settings file found, then apply the environment
///
/// An explicit path wins over `CENSYS_ASM_SEARCH_SETTINGS`, which wins over
/// the default locations. Without any file the defaults are used.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    let mut settings = match locate(explicit) {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)?
        }
        None => {
            debug!("No settings file found, using defaults");
            Settings::default()
        }
    };
    settings.merge_env();
    Ok(settings)
}

fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(SETTINGS_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let mut candidates = vec![PathBuf::from("censys-asm-search.yml")];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("censys-asm-search/settings.yml"));
    }
    candidates.into_iter().find(|p| p.exists())
}
