//! Configuration loaded from `~/.compform/config.toml`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CompformError, Result};
use crate::tour::TourTimings;

/// Env var naming an alternative config file.
pub const CONFIG_ENV: &str = "COMPFORM_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompformConfig {
    pub tour: TourTimings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset (e.g. "info", "compform_core=debug")
    pub level: Option<String>,
    /// Where the interactive form writes its logs
    pub file: Option<PathBuf>,
}

impl CompformConfig {
    /// Default config file path: ~/.compform/config.toml
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".compform")
            .join("config.toml")
    }

    /// Default TUI log file: ~/.compform/compform.log
    pub fn default_log_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".compform")
            .join("compform.log")
    }

    /// Resolve the config path: explicit argument, then `COMPFORM_CONFIG`,
    /// then the default location.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from))
            .unwrap_or_else(Self::default_path)
    }

    /// Load config, falling back to defaults when the file does not exist,
    /// then apply environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_path(explicit);
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CompformError::config(path, e.to_string()))?;
        config.logging.file = config.logging.file.as_deref().map(expand_path);
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|var| env::var(var).ok())
    }

    /// Per-delay overrides: COMPFORM_CHAR_DELAY_MS, COMPFORM_SETTLE_DELAY_MS,
    /// COMPFORM_SUBMIT_DELAY_MS.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let overrides = [
            ("COMPFORM_CHAR_DELAY_MS", &mut self.tour.char_delay_ms),
            ("COMPFORM_SETTLE_DELAY_MS", &mut self.tour.settle_delay_ms),
            ("COMPFORM_SUBMIT_DELAY_MS", &mut self.tour.submit_delay_ms),
        ];
        for (var, slot) in overrides {
            if let Some(raw) = lookup(var) {
                *slot = raw.trim().parse().map_err(|_| CompformError::EnvOverride {
                    var: var.to_string(),
                    reason: format!("expected milliseconds, got '{raw}'"),
                })?;
                debug!(var, value = *slot, "applied env override");
            }
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CompformError::config(Self::default_path(), e.to_string()))
    }
}

/// Expand a leading `~` to the home directory. Other paths pass through.
pub fn expand_path(path: &Path) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return path.to_path_buf();
    };
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}
