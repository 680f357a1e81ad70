//! Configuration management
//!
//! Reads the kiosk INI file into a section/key store, then validates it into
//! a typed [`KioskConfig`] once at startup.

pub mod error;
pub mod kiosk;
pub mod store;

use std::path::PathBuf;

pub use error::ConfigError;
pub use kiosk::{ButtonSpec, KioskConfig};
pub use store::ConfigStore;

use crate::constants::config::{APP_DIR, FILENAME};

/// Candidate configuration locations, in priority order:
/// 1. `./config.ini` (next to where the kiosk is started)
/// 2. `<platform config dir>/scan-kiosk/config.ini`
pub fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(FILENAME)];

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(APP_DIR).join(FILENAME));
    }

    paths
}

/// Pick the configuration file: the explicit path if given, else the first
/// existing candidate, else the working-directory default (so the error
/// message names a sensible path).
pub fn resolve_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }

    candidate_paths()
        .into_iter()
        .find(|p| p.exists())
        .unwrap_or_else(|| PathBuf::from(FILENAME))
}
