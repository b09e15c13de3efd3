//! Persisted tea store: two editable teas, each with a name and three
//! per-cycle infusion durations.
//!
//! The store is written wholesale on edit confirmation and read once at
//! startup. A missing file silently falls back to the built-in defaults;
//! a corrupt file is an error.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::infusion::MAX_CYCLES;
use crate::util::blocking;
use crate::{slog_debug, Result};

const STORE_VERSION: u32 = 1;

/// Maximum characters per display line of a tea name.
pub const NAME_WRAP_WIDTH: usize = 12;

/// A kind of tea and its per-cycle infusion durations in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tea {
    pub name: String,
    pub infusion_times: [u32; MAX_CYCLES],
}

impl Tea {
    pub fn new(name: impl Into<String>, infusion_times: [u32; MAX_CYCLES]) -> Self {
        Self {
            name: name.into(),
            infusion_times,
        }
    }

    /// Duration in seconds for a 1-based infusion cycle.
    pub fn duration_for_cycle(&self, cycle: u8) -> u32 {
        self.infusion_times[(cycle as usize).saturating_sub(1)]
    }

    /// Name with stored line breaks flattened for single-line display.
    pub fn display_name(&self) -> String {
        self.name.replace('\n', " ")
    }
}

/// The two stored teas, serialized wholesale to `teas.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeaStore {
    pub version: u32,
    pub teas: Vec<Tea>,
}

impl Default for TeaStore {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            teas: vec![
                Tea::new("Premium\nSencha", [180, 30, 300]),
                Tea::new("Premium\nBancha", [120, 180, 240]),
            ],
        }
    }
}

impl TeaStore {
    pub async fn load() -> Result<Self> {
        blocking(Self::load_sync).await
    }

    pub fn load_sync() -> Result<Self> {
        Self::load_from(&Config::teas_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        slog_debug!("TeaStore::load_from path={}", path.display());

        if !path.exists() {
            slog_debug!("Tea store not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let store: TeaStore = serde_json::from_str(&contents)?;
        slog_debug!("Tea store loaded: {} teas", store.teas.len());
        Ok(store)
    }

    pub async fn save(&self) -> Result<()> {
        slog_debug!("TeaStore::save teas={}", self.teas.len());
        let store = self.clone();
        blocking(move || store.save_sync()).await
    }

    pub fn save_sync(&self) -> Result<()> {
        Config::ensure_dirs()?;
        self.save_to(&Config::teas_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if path.exists() {
            let backup_path = path.with_extension("json.bak");
            slog_debug!("Creating tea store backup: {}", backup_path.display());
            fs::copy(path, &backup_path)?;
        }

        let temp_path = path.with_extension("json.tmp");
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&temp_path, &contents)?;
        fs::rename(&temp_path, path)?;
        slog_debug!("Tea store saved: {}", path.display());

        Ok(())
    }
}

/// Word-wrap an edited tea name to lines of at most [`NAME_WRAP_WIDTH`]
/// characters, joined with newlines. Words longer than the width get a
/// line of their own.
pub fn wrap_name(name: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in name.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= NAME_WRAP_WIDTH {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}
