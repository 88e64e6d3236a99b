//! Session settings merged from the optional TOML file and command-line flags.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use labyrinth_core::DEFAULT_STARTING_SHOTS;
use serde::Deserialize;

/// Board edge length used when neither the file nor the flags choose one.
pub(crate) const DEFAULT_BOARD_SIZE: u32 = 4;

/// Settings read from a configuration file. Every key is optional.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub(crate) board_size: Option<u32>,
    pub(crate) starting_shots: Option<u32>,
}

impl FileConfig {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid config file at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse config toml contents")
    }
}

/// Fully resolved settings for one session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) board_size: u32,
    pub(crate) starting_shots: u32,
}

impl Settings {
    /// Flag values win over file values, which win over the defaults.
    pub(crate) fn resolve(
        file: FileConfig,
        board_size: Option<u32>,
        starting_shots: Option<u32>,
    ) -> Self {
        Self {
            board_size: board_size
                .or(file.board_size)
                .unwrap_or(DEFAULT_BOARD_SIZE),
            starting_shots: starting_shots
                .or(file.starting_shots)
                .unwrap_or(DEFAULT_STARTING_SHOTS),
        }
    }
}
