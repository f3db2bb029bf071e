// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Route command - optimized walk through a shopping list

use super::{load_graph, print_path, resolve_node, EdgeEvents, Output};
use crate::config::Config;
use crate::optimizer::{assemble_path, optimize_route, route_cost};
use anyhow::{Context, Result};
use std::iter;
use tracing::info;

/// Arguments for the route command
#[derive(Debug, Clone, Default)]
pub struct RouteArgs {
    /// Stops as node ids or aisle names, in list order
    pub stops: Vec<String>,
    /// Start override (defaults to the configured entrance)
    pub start: Option<String>,
    /// End override (defaults to the configured checkout)
    pub end: Option<String>,
}

/// Run the route command
pub fn run(config: &Config, args: &RouteArgs, events: &EdgeEvents, output: Output) -> Result<()> {
    let graph = load_graph(config)?;
    let start = resolve_node(&graph, args.start.as_deref().unwrap_or(&config.entrance))?;
    let end = resolve_node(&graph, args.end.as_deref().unwrap_or(&config.checkout))?;
    let stops = args
        .stops
        .iter()
        .map(|s| resolve_node(&graph, s))
        .collect::<Result<Vec<_>>>()?;
    let modifiers = events.to_modifiers();

    info!("Planning route {} -> {} through {} stop(s)", start, end, stops.len());

    let order = optimize_route(&graph, &stops, &start, &end, &modifiers)
        .context("Failed to order stops")?;
    let naive: Vec<&str> = iter::once(start.as_str())
        .chain(stops.iter().map(String::as_str))
        .chain(iter::once(end.as_str()))
        .collect();
    info!(
        "Visiting order {} (list order costs {:.2})",
        order.join(" -> "),
        route_cost(&graph, &naive, &modifiers)
    );

    let path = assemble_path(&graph, &order, &modifiers).context("No route available")?;

    if !output.json {
        println!("Order: {}", order.join(" -> "));
    }
    print_path(&graph, &path, output)
}
