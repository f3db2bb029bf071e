// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Path command - least-cost path between two locations

use super::{load_graph, print_path, resolve_node, EdgeEvents, Output};
use crate::astar::find_path;
use crate::config::Config;
use anyhow::{Context, Result};
use tracing::info;

/// Run the path command
pub fn run(config: &Config, from: &str, to: &str, events: &EdgeEvents, output: Output) -> Result<()> {
    let graph = load_graph(config)?;
    let from = resolve_node(&graph, from)?;
    let to = resolve_node(&graph, to)?;
    let modifiers = events.to_modifiers();

    info!("Finding path {} -> {} with {} modifier(s)", from, to, modifiers.len());

    let path = find_path(&graph, &from, &to, &modifiers)
        .with_context(|| format!("No route available from {from} to {to}"))?;

    print_path(&graph, &path, output)
}
