// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Export command - exports the floor plan to various formats

use super::{load_graph, resolve_node, EdgeEvents};
use crate::config::Config;
use crate::optimizer::build_optimized_path;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Graphviz DOT format
    Dot,
    /// JSON floor plan
    Json,
    /// TOML floor plan
    Toml,
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "dot" | "graphviz" => Ok(Self::Dot),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => anyhow::bail!("Unknown export format: {}. Supported: dot, json, toml", s),
        }
    }
}

impl ExportFormat {
    /// Get file extension for format
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

/// Run the export command.
///
/// With `highlight` stops, the DOT output marks the optimized route from
/// the entrance through those stops to the checkout.
pub fn run(
    config: &Config,
    format: &str,
    output: Option<PathBuf>,
    highlight: &[String],
    events: &EdgeEvents,
) -> Result<()> {
    let export_format: ExportFormat = format.parse()?;
    info!("Exporting floor plan as {}", export_format.extension());

    let graph = load_graph(config)?;

    if graph.is_empty() {
        eprintln!("Warning: Floor plan is empty.");
    }

    let content = match export_format {
        ExportFormat::Dot => {
            let route = if highlight.is_empty() {
                None
            } else {
                let stops = highlight
                    .iter()
                    .map(|s| resolve_node(&graph, s))
                    .collect::<Result<Vec<_>>>()?;
                let path = build_optimized_path(
                    &graph,
                    &stops,
                    &config.entrance,
                    &config.checkout,
                    &events.to_modifiers(),
                )
                .context("No route available to highlight")?;
                Some(path)
            };
            graph.to_dot(route.as_ref())
        }
        ExportFormat::Json => graph.to_floor_plan().to_json()?,
        ExportFormat::Toml => toml::to_string_pretty(&graph.to_floor_plan())
            .context("Failed to serialize floor plan to TOML")?,
    };

    match output {
        Some(path) => {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
            println!("Exported to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!("DOT".parse::<ExportFormat>().unwrap(), ExportFormat::Dot);
        assert_eq!("graphviz".parse::<ExportFormat>().unwrap(), ExportFormat::Dot);
        assert_eq!("toml".parse::<ExportFormat>().unwrap().extension(), "toml");
        assert!("yaml".parse::<ExportFormat>().is_err());
    }
}
