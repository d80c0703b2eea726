//! TOML configuration.
//!
//! ```toml
//! backend = "auto"          # "auto" | "injection" | "native-windows"
//!
//! [delays]                  # optional per-action overrides, milliseconds
//! down_ms = 20
//! press_ms = 15
//!
//! [[buttons]]
//! id = "paste"
//! name = "Paste"
//! key_sequence = [["ctrl", "down"], ["v", "press"], ["ctrl", "up"]]
//! ```

use std::collections::HashSet;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::buttons::Button;
use crate::platform::DelayTable;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which input backend to build at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendChoice {
    /// Native Windows backend on Windows, generic injection elsewhere.
    #[default]
    Auto,
    Injection,
    NativeWindows,
}

/// Per-action delay overrides in milliseconds. Unset fields keep the
/// platform default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DelayOverrides {
    pub down_ms: Option<u64>,
    pub up_ms: Option<u64>,
    pub press_ms: Option<u64>,
}

impl DelayOverrides {
    pub fn apply(&self, base: DelayTable) -> DelayTable {
        let pick = |ms: Option<u64>, default: Duration| {
            ms.map(Duration::from_millis).unwrap_or(default)
        };
        DelayTable {
            down: pick(self.down_ms, base.down),
            up: pick(self.up_ms, base.up),
            press: pick(self.press_ms, base.press),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub backend: BackendChoice,
    pub delays: DelayOverrides,
    pub buttons: Vec<Button>,
}

impl Config {
    /// Parses and validates a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        log::info!("config: loaded {}", path.display());
        Ok(config)
    }

    /// Loads the file at `default_path()`, or defaults when it does not
    /// exist.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_if_present(default_path().as_deref())
    }

    /// Loads `path` when it names an existing file, defaults otherwise.
    fn load_if_present(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            _ => {
                log::debug!("config: no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for button in &self.buttons {
            if button.id.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "button '{}' has an empty id",
                    button.name
                )));
            }
            if !seen.insert(button.id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate button id '{}'",
                    button.id
                )));
            }
        }
        Ok(())
    }
}

/// `$XDG_CONFIG_HOME/webinput/config.toml`, falling back to
/// `$HOME/.config/webinput/config.toml`.
pub fn default_path() -> Option<PathBuf> {
    config_path_from(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

fn config_path_from(xdg: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    let config_dir = xdg
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            home.filter(|v| !v.is_empty())
                .map(|h| PathBuf::from(h).join(".config"))
        })?;
    Some(config_dir.join("webinput").join("config.toml"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
