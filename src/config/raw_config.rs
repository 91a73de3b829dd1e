use serde::Deserialize;

use super::{Timings, constants};

/// Configuration exactly as read from disk, before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub primary_layout: String,
    pub secondary_layout: String,
    pub mapping: Option<Vec<(char, char)>>,
    pub timings: Timings,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            primary_layout: constants::DEFAULT_PRIMARY_LAYOUT.to_owned(),
            secondary_layout: constants::DEFAULT_SECONDARY_LAYOUT.to_owned(),
            mapping: None,
            timings: Timings::default(),
        }
    }
}
