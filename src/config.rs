mod config_validator;
pub mod constants;
pub mod raw_config;

use std::{
    io,
    path::{Path, PathBuf},
    time::Duration,
};

use flipotron_core::MappingTable;
pub use raw_config::RawConfig;
use serde::{Deserialize, Deserializer, Serialize};

use crate::engine::LayoutPair;

/// Settle intervals between the externally visible steps of a sequence.
///
/// These are tuning values, not completion signals: the OS does not report
/// when a copy, paste or layout switch has taken effect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Timings {
    pub retype_after_delete_ms: u32,
    pub retype_after_switch_ms: u32,
    pub retype_after_replay_ms: u32,
    pub selection_after_clear_ms: u32,
    pub selection_after_copy_ms: u32,
    pub selection_before_paste_ms: u32,
    pub selection_after_paste_ms: u32,
    pub clipboard_restore_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            retype_after_delete_ms: 30,
            retype_after_switch_ms: 30,
            retype_after_replay_ms: 50,
            selection_after_clear_ms: 20,
            selection_after_copy_ms: 100,
            selection_before_paste_ms: 20,
            selection_after_paste_ms: 100,
            clipboard_restore_ms: 200,
        }
    }
}

impl Timings {
    pub fn named(&self) -> [(&'static str, u32); 8] {
        [
            ("retype_after_delete_ms", self.retype_after_delete_ms),
            ("retype_after_switch_ms", self.retype_after_switch_ms),
            ("retype_after_replay_ms", self.retype_after_replay_ms),
            ("selection_after_clear_ms", self.selection_after_clear_ms),
            ("selection_after_copy_ms", self.selection_after_copy_ms),
            ("selection_before_paste_ms", self.selection_before_paste_ms),
            ("selection_after_paste_ms", self.selection_after_paste_ms),
            ("clipboard_restore_ms", self.clipboard_restore_ms),
        ]
    }
}

pub fn settle(ms: u32) -> Duration {
    Duration::from_millis(u64::from(ms))
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Config {
    pub primary_layout: String,
    pub secondary_layout: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping: Option<Vec<(char, char)>>,
    pub timings: Timings,
}

impl Default for Config {
    fn default() -> Self {
        let raw = RawConfig::default();
        Self {
            primary_layout: raw.primary_layout,
            secondary_layout: raw.secondary_layout,
            mapping: raw.mapping,
            timings: raw.timings,
        }
    }
}

impl TryFrom<RawConfig> for Config {
    type Error = String;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let cfg = Self {
            primary_layout: raw.primary_layout,
            secondary_layout: raw.secondary_layout,
            mapping: raw.mapping,
            timings: raw.timings,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawConfig::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

impl Config {
    pub fn layouts(&self) -> LayoutPair {
        LayoutPair::new(&self.primary_layout, &self.secondary_layout)
    }

    /// Builds the mapping table, falling back to the built-in alphabet when no
    /// mapping is configured.
    pub fn mapping_table(&self) -> MappingTable {
        let Some(pairs) = self.mapping.as_deref() else {
            return MappingTable::default();
        };

        let table = MappingTable::from_pairs(pairs.iter().copied());
        for (from, to) in table.collisions() {
            tracing::warn!(%from, %to, "mapping target reused; later pair owns the reverse entry");
        }
        table
    }
}

/// Config file location: `FLIPOTRON_CONFIG` if set, else the platform config dir.
pub fn config_path() -> io::Result<PathBuf> {
    if let Some(path) = std::env::var_os(constants::CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    confy::get_configuration_file_path(constants::APP_NAME, constants::CONFIG_NAME)
        .map_err(confy_err)
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    let Some(dir) = path.parent() else {
        return Ok(());
    };
    std::fs::create_dir_all(dir)
}

fn confy_err(e: confy::ConfyError) -> io::Error {
    io::Error::other(e)
}

pub fn load() -> io::Result<Config> {
    load_from(&config_path()?)
}

pub fn load_from(path: &Path) -> io::Result<Config> {
    ensure_parent_dir(path)?;
    confy::load_path(path).map_err(confy_err)
}

pub fn save(cfg: &Config) -> io::Result<()> {
    save_to(&config_path()?, cfg)
}

pub fn save_to(path: &Path, cfg: &Config) -> io::Result<()> {
    cfg.validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    ensure_parent_dir(path)?;
    confy::store_path(path, cfg).map_err(confy_err)
}

/// Loads the config, or logs why it could not and returns the defaults.
pub fn load_or_default() -> Config {
    match load() {
        Ok(cfg) => {
            tracing::info!(
                primary = %cfg.primary_layout,
                secondary = %cfg.secondary_layout,
                custom_mapping = cfg.mapping.is_some(),
                "config loaded"
            );
            cfg
        }
        Err(e) => {
            tracing::warn!(error = %e, "config unavailable, using defaults");
            Config::default()
        }
    }
}
