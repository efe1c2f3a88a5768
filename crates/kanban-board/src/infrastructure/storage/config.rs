//! TOML-based configuration for the kanban board.
//!
//! Reads `AppConfig` from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\Kanban\config.toml`
//! - Linux:    `~/.config/kanban/config.toml`
//! - macOS:    `~/Library/Application Support/Kanban/config.toml`
//!
//! Example:
//!
//! ```toml
//! [app]
//! log_level = "debug"
//!
//! [storage]
//! data_dir = "/var/lib/kanban"
//! key = "trello-clone"
//!
//! [layout]
//! column_width = 300.0
//! card_height = 48.0
//! ```
//!
//! # Serde default values
//!
//! Every field is annotated with `#[serde(default = "some_fn")]` and every
//! section with `#[serde(default)]`, so an empty file, a missing file, and a
//! file written by an older version all load.

use std::path::{Path, PathBuf};

use kanban_core::{LayoutMetrics, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::board_store::DEFAULT_KEY;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// The platform data directory could not be determined.
    #[error("could not determine platform data directory")]
    NoPlatformDataDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level application configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// General behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppSection {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Where the board is stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding the board file.  Platform data dir when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Key the board is stored under; the file is `<key>.json`.
    #[serde(default = "default_key")]
    pub key: String,
}

/// On-screen geometry, in screen units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    #[serde(default)]
    pub origin_x: f64,
    #[serde(default)]
    pub origin_y: f64,
    #[serde(default = "default_column_width")]
    pub column_width: f64,
    #[serde(default = "default_column_gap")]
    pub column_gap: f64,
    #[serde(default = "default_column_min_height")]
    pub column_min_height: f64,
    #[serde(default = "default_header_height")]
    pub header_height: f64,
    #[serde(default = "default_card_height")]
    pub card_height: f64,
    #[serde(default = "default_card_gap")]
    pub card_gap: f64,
    #[serde(default = "default_padding")]
    pub padding: f64,
    #[serde(default = "default_delete_control_size")]
    pub delete_control_size: f64,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_key() -> String {
    DEFAULT_KEY.to_string()
}
fn default_column_width() -> f64 {
    LayoutMetrics::default().column_width
}
fn default_column_gap() -> f64 {
    LayoutMetrics::default().column_gap
}
fn default_column_min_height() -> f64 {
    LayoutMetrics::default().column_min_height
}
fn default_header_height() -> f64 {
    LayoutMetrics::default().header_height
}
fn default_card_height() -> f64 {
    LayoutMetrics::default().card_height
}
fn default_card_gap() -> f64 {
    LayoutMetrics::default().card_gap
}
fn default_padding() -> f64 {
    LayoutMetrics::default().padding
}
fn default_delete_control_size() -> f64 {
    LayoutMetrics::default().delete_control_size
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            key: default_key(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            column_width: default_column_width(),
            column_gap: default_column_gap(),
            column_min_height: default_column_min_height(),
            header_height: default_header_height(),
            card_height: default_card_height(),
            card_gap: default_card_gap(),
            padding: default_padding(),
            delete_control_size: default_delete_control_size(),
        }
    }
}

impl LayoutConfig {
    /// Converts the section into the metrics the layout is computed with.
    pub fn to_metrics(&self) -> LayoutMetrics {
        LayoutMetrics {
            origin: Point::new(self.origin_x, self.origin_y),
            column_width: self.column_width,
            column_gap: self.column_gap,
            column_min_height: self.column_min_height,
            header_height: self.header_height,
            card_height: self.card_height,
            card_gap: self.card_gap,
            padding: self.padding,
            delete_control_size: self.delete_control_size,
        }
    }
}

impl StorageConfig {
    /// Returns the configured data directory, or the platform default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPlatformDataDir`] when no directory is
    /// configured and the platform default cannot be determined.
    pub fn resolve_data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => platform_data_dir().ok_or(ConfigError::NoPlatformDataDir),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(platform_config_dir()
        .ok_or(ConfigError::NoPlatformConfigDir)?
        .join("config.toml"))
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Loads `AppConfig` from the default config file.
///
/// # Errors
///
/// See [`config_file_path`] and [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("Kanban"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("kanban"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library").join("Application Support").join("Kanban"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

fn platform_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("LOCALAPPDATA").map(|p| PathBuf::from(p).join("Kanban"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_DATA_HOME or ~/.local/share
        let base = std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local").join("share"))
            })?;
        Some(base.join("kanban"))
    }

    #[cfg(target_os = "macos")]
    {
        platform_config_dir()
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
