//! Config file loading.
//!
//! Settings are read from a TOML file. The search order is:
//!
//! 1. Path given on the command line (`--config`)
//! 2. `./quizbowl.toml`
//! 3. `$HOME/.config/quizbowl/config.toml`
//!
//! Every field is optional; a missing file yields the defaults.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizbowlConfig {
    /// Question bank to play when none is given on the command line.
    #[serde(default)]
    pub default_bank: Option<PathBuf>,

    /// Directory where session transcripts are written after each game.
    #[serde(default)]
    pub transcript_dir: Option<PathBuf>,

    /// Fixed shuffle seed, for reproducible sessions.
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

/// Loads the config, starting from an explicit path when one is given.
///
/// An explicit path that does not exist is an error; the fallback locations
/// are allowed to be absent.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizbowlConfig> {
    if let Some(path) = path {
        if !path.exists() {
            bail!("config file not found: {}", path.display());
        }
        return read_config(path);
    }

    let local = Path::new("quizbowl.toml");
    if local.exists() {
        return read_config(local);
    }

    if let Some(dir) = dirs_path() {
        let user = dir.join("config.toml");
        if user.exists() {
            return read_config(&user);
        }
    }

    Ok(QuizbowlConfig::default())
}

fn read_config(path: &Path) -> Result<QuizbowlConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config").join("quizbowl"))
}
