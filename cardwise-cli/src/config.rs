//! TOML configuration for the CLI.
//!
//! ```toml
//! [limits]
//! new_per_day = 20
//! reviews_per_day = 100
//! ```

use anyhow::{bail, Context, Result};
use cardwise_core::StudyLimits;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::opts::LimitArgs;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub limits: StudyLimits,
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "cardwise", "Cardwise").map(|pd| pd.config_dir().join("config.toml"))
}

/// Loads `explicit` if given (it must exist), otherwise the default path.
/// A missing default file means defaults.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(p) if !p.exists() => bail!("config file not found: {}", p.display()),
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) if p.exists() => p,
            _ => {
                debug!("no config file, using defaults");
                return Ok(Config::default());
            }
        },
    };
    let text = fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: Config =
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
    debug!(path = %path.display(), limits = ?config.limits, "loaded config");
    Ok(config)
}

impl LimitArgs {
    pub fn apply(&self, base: StudyLimits) -> StudyLimits {
        StudyLimits {
            new_per_day: self.new_per_day.unwrap_or(base.new_per_day),
            reviews_per_day: self.reviews_per_day.unwrap_or(base.reviews_per_day),
        }
    }
}
