//! Configuration for the dmap command-line tool.
//!
//! Settings are read from `~/.config/dmap/config.toml`. Every field has a
//! default, so a partial file (or no file at all) is fine. Command-line flags
//! override whatever is configured here.
//!
//! # Example
//!
//! ```
//! use dmap::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.format, "auto");
//! assert_eq!(config.log_level, "warn");
//!
//! let custom: Config = toml::from_str("format = \"yaml\"").unwrap();
//! assert_eq!(custom.format, "yaml");
//! assert!(custom.exists_exit_code);
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::document::parser::Format;

/// Configuration for the dmap tool.
///
/// # Fields
///
/// * `format` - Input format: "auto", "json", or "yaml" (default: "auto")
/// * `log_level` - Default log filter when `RUST_LOG` is unset (default: "warn")
/// * `exists_exit_code` - `exists` exits with status 1 when the path is missing (default: true)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Input format: "auto", "json", or "yaml"
    #[serde(default = "default_format")]
    pub format: String,

    /// Default log filter
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Exit with status 1 from `exists` when the path does not resolve
    #[serde(default = "default_exists_exit_code")]
    pub exists_exit_code: bool,
}

fn default_format() -> String {
    "auto".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_exists_exit_code() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: default_format(),
            log_level: default_log_level(),
            exists_exit_code: default_exists_exit_code(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/dmap/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("dmap");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if there is no home directory or no
    /// config file. A file that exists but cannot be read or parsed is an
    /// error; callers decide whether to fall back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads configuration from an explicit file, reporting any failure.
    pub fn load_from<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Saves configuration to the given file, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(config_path)
    }

    /// Returns the configured input format, or `None` for "auto".
    pub fn input_format(&self) -> anyhow::Result<Option<Format>> {
        if self.format.eq_ignore_ascii_case("auto") {
            return Ok(None);
        }
        self.format
            .parse::<Format>()
            .map(Some)
            .map_err(|err| anyhow::anyhow!("Invalid format in config: {}", err))
    }
}
