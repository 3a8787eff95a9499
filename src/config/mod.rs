//! Configuration for the watcher
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/turnbell/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod notification;
mod observability;
mod serialization;
mod services;
mod timing;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use notification::{FileNotification, NotificationConfig};
pub use observability::{FileLogging, LogRotation, LoggingConfig};
pub use services::{FileServiceOverride, ServicesConfig};
#[cfg(test)]
pub use services::ServiceOverride;
pub use timing::{FileTiming, TimingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Debounce window and garbage collection cadence
    pub timing: TimingConfig,

    /// Notification text and icon
    pub notification: NotificationConfig,

    /// Per-service enable flags and duration thresholds
    pub services: ServicesConfig,
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    /// Optional [logging] section
    pub logging: Option<FileLogging>,

    /// Optional [timing] section
    pub timing: Option<FileTiming>,

    /// Optional [notification] section
    pub notification: Option<FileNotification>,

    /// Optional [services.X] sections
    #[serde(default)]
    pub services: HashMap<String, FileServiceOverride>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/turnbell/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("turnbell").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        // Use Config::default().to_toml() as single source of truth
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Read and parse a config file. A missing file is not an error.
    ///
    /// A file that exists but does not parse is an error: a broken config
    /// should fail fast, not silently fall back to defaults.
    fn load_file_config(path: &Path) -> Result<FileConfig> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).with_context(|| {
                format!(
                    "Failed to parse {} (check quoting, booleans and section names)",
                    path.display()
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e).with_context(|| format!("Cannot read {}", path.display())),
        }
    }

    /// Build from a parsed file, falling back to defaults per field
    pub(crate) fn from_file(file: FileConfig) -> Self {
        Self {
            logging: LoggingConfig::from_file(file.logging),
            timing: TimingConfig::from_file(file.timing),
            notification: NotificationConfig::from_file(file.notification),
            services: ServicesConfig::from_file(file.services),
        }
    }

    /// Apply environment overrides on top of file/default values
    fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `TURNBELL_*` overrides read through `lookup`
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(level) = lookup("TURNBELL_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(ms) = lookup("TURNBELL_DEBOUNCE_MS").and_then(|v| v.parse().ok()) {
            self.timing.debounce_ms = ms;
            self.timing = self.timing.clone().clamped();
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Result<Self> {
        let file = match Self::config_path() {
            Some(path) => Self::load_file_config(&path)?,
            None => FileConfig::default(),
        };
        let mut config = Self::from_file(file);
        config.apply_env();
        Ok(config)
    }

    /// Load from an explicit file path (env vars still apply)
    #[cfg(test)]
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut config = Self::from_file(Self::load_file_config(path)?);
        config.apply_env();
        Ok(config)
    }
}
