use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::{slog_debug, Error, Result};

/// Delay between a tea selection and the start of the countdown, leaving
/// room for further presses that pick a later infusion cycle.
const DEFAULT_PREP_DELAY_MS: u64 = 1400;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Preparation delay in milliseconds before an infusion starts.
    pub prep_delay_ms: Option<u64>,
}

impl Config {
    pub fn steep_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".steep"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::steep_dir()?.join("steep.toml"))
    }

    pub fn teas_path() -> Result<PathBuf> {
        Ok(Self::steep_dir()?.join("teas.json"))
    }

    pub fn theme_path() -> Result<PathBuf> {
        Ok(Self::steep_dir()?.join("theme.toml"))
    }

    pub fn prep_delay(&self) -> Duration {
        Duration::from_millis(self.prep_delay_ms.unwrap_or(DEFAULT_PREP_DELAY_MS))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        slog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            slog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(&path)?)?;
        slog_debug!("Config loaded: prep_delay_ms={:?}", config.prep_delay_ms);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let steep_dir = Self::steep_dir()?;
        slog_debug!("Config::save steep_dir={}", steep_dir.display());
        if !steep_dir.exists() {
            slog_debug!("Creating steep directory");
            fs::create_dir_all(&steep_dir)?;
        }
        let path = Self::config_path()?;
        fs::write(&path, toml::to_string_pretty(self)?)?;
        slog_debug!("Config saved to {}", path.display());
        Ok(())
    }

    pub fn ensure_dirs() -> Result<()> {
        let steep_dir = Self::steep_dir()?;
        if !steep_dir.exists() {
            slog_debug!("Creating steep directory: {}", steep_dir.display());
            fs::create_dir_all(&steep_dir)?;
        }
        Ok(())
    }
}
