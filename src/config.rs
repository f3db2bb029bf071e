// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `AISLENAV_ENTRANCE`
pub const ENV_PREFIX: &str = "AISLENAV";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Floor-plan file; the built-in demo store is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_plan: Option<PathBuf>,
    /// Node routes start from when no start is given
    pub entrance: String,
    /// Node routes end at when no end is given
    pub checkout: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Colored terminal output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            floor_plan: None,
            entrance: "entrance".to_string(),
            checkout: "E1".to_string(),
            log_level: "info".to_string(),
            color: true,
        }
    }
}

impl Config {
    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Look up a single key as text
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "floor_plan" => Some(
                self.floor_plan
                    .as_ref()
                    .map_or_else(|| "(demo)".to_string(), |p| p.display().to_string()),
            ),
            "entrance" => Some(self.entrance.clone()),
            "checkout" => Some(self.checkout.clone()),
            "log_level" => Some(self.log_level.clone()),
            "color" => Some(self.color.to_string()),
            _ => None,
        }
    }
}

/// Default configuration file location
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "hyperpolymath", "aislenav")
        .map(|d| d.config_dir().join("aislenav.toml"))
}

/// Load configuration: defaults, then the config file (the explicit path
/// must exist; the default location is optional), then `AISLENAV_*`
/// environment variables.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let defaults = Config::default();

    let mut builder = config::Config::builder()
        .set_default("entrance", defaults.entrance)?
        .set_default("checkout", defaults.checkout)?
        .set_default("log_level", defaults.log_level)?
        .set_default("color", defaults.color)?;

    match path {
        Some(p) => {
            builder = builder.add_source(config::File::from(p).format(config::FileFormat::Toml).required(true));
        }
        None => {
            if let Some(p) = default_path() {
                builder = builder.add_source(
                    config::File::from(p.as_path())
                        .format(config::FileFormat::Toml)
                        .required(false),
                );
            }
        }
    }

    let settings = builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()
        .context("Failed to load configuration")?;

    let config: Config = settings
        .try_deserialize()
        .context("Invalid configuration")?;

    tracing::debug!("Loaded configuration: {:?}", config);
    Ok(config)
}
