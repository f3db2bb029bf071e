// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Config command - show the effective configuration

use crate::config::Config;
use anyhow::{bail, Result};

/// Print the effective configuration, or a single key
pub fn run(config: &Config, key: Option<&str>) -> Result<()> {
    match key {
        Some(k) => match config.get(k) {
            Some(value) => println!("{value}"),
            None => bail!("Unknown config key: {}. Valid: floor_plan, entrance, checkout, log_level, color", k),
        },
        None => print!("{}", config.to_toml()?),
    }
    Ok(())
}
