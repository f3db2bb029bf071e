// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod completions;
pub mod config;
pub mod export;
pub mod modifiers;
pub mod path;
pub mod route;

use crate::config::Config;
use crate::floor_plan::FloorPlan;
use crate::graph::StoreGraph;
use crate::modifiers::{create_blocked_modifier, create_congestion_modifier, CostModifier, EdgeKey};
use crate::types::PathResult;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing::info;

/// Output settings shared by all commands
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    /// Emit JSON instead of text
    pub json: bool,
    /// Colored text output
    pub color: bool,
}

/// Edge events given on the command line
#[derive(Debug, Clone, Default)]
pub struct EdgeEvents {
    /// Congested edges
    pub congest: Vec<EdgeKey>,
    /// Blocked edges
    pub block: Vec<EdgeKey>,
}

impl EdgeEvents {
    /// Modifiers for these events: congestion first, then blocks
    #[must_use]
    pub fn to_modifiers(&self) -> Vec<CostModifier> {
        self.congest
            .iter()
            .map(|e| create_congestion_modifier(&e.from, &e.to))
            .chain(self.block.iter().map(|e| create_blocked_modifier(&e.from, &e.to)))
            .collect()
    }
}

/// Load the configured floor plan, or the demo store when none is set
pub fn load_graph(config: &Config) -> Result<StoreGraph> {
    let plan = match &config.floor_plan {
        Some(path) => {
            info!("Loading floor plan {}", path.display());
            FloorPlan::load(path)?
        }
        None => {
            info!("Using the built-in demo floor plan");
            FloorPlan::demo()
        }
    };

    StoreGraph::try_from(plan).context("Failed to build store graph")
}

/// Resolve a node ID or aisle identifier, failing with a helpful message
pub fn resolve_node(graph: &StoreGraph, name: &str) -> Result<String> {
    graph
        .resolve(name)
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("Unknown location: {}. Use a node id or an aisle name", name))
}

/// Print a path, as text or JSON
pub fn print_path(graph: &StoreGraph, path: &PathResult, output: Output) -> Result<()> {
    if output.json {
        let json = serde_json::to_string_pretty(path).context("Failed to serialize path")?;
        println!("{json}");
        return Ok(());
    }

    let label = |id: &str| {
        graph
            .node(id)
            .map(|n| n.label.clone())
            .filter(|l| !l.is_empty())
            .map_or_else(|| id.to_string(), |l| format!("{id} ({l})"))
    };

    let header = format!("{} hops, total cost {:.2}", path.hop_count(), path.total_cost);
    if output.color {
        println!("{}", header.bold());
    } else {
        println!("{header}");
    }

    if let Some(start) = path.start() {
        println!("  {}", label(start));
    }
    for segment in &path.segments {
        let cost = format!("+{:.2}", segment.cost);
        if output.color {
            println!("  -> {} {}", label(&segment.to), cost.dimmed());
        } else {
            println!("  -> {} {}", label(&segment.to), cost);
        }
    }

    Ok(())
}
