// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Multi-stop route optimization.
//!
//! Start and end are fixed; the intermediate stops are reordered with 2-opt
//! local search (segment reversal, first improvement, restart). The result
//! is a local optimum, not an exact travelling-salesman solution, which is
//! fine for the handful of stops a shopping list produces.

use crate::astar::find_path;
use crate::error::{NavError, Result};
use crate::graph::StoreGraph;
use crate::modifiers::CostModifier;
use crate::types::PathResult;
use std::collections::HashMap;
use std::iter;

/// Leg costs for one optimization run.
///
/// Scoped to a single call, so a changed modifier set is always seen by the
/// next call.
struct LegCosts<'a> {
    graph: &'a StoreGraph,
    modifiers: &'a [CostModifier],
    cache: HashMap<(&'a str, &'a str), f64>,
}

impl<'a> LegCosts<'a> {
    fn new(graph: &'a StoreGraph, modifiers: &'a [CostModifier]) -> Self {
        Self {
            graph,
            modifiers,
            cache: HashMap::new(),
        }
    }

    /// Cost of one leg, infinity if it has no path
    fn leg(&mut self, from: &'a str, to: &'a str) -> f64 {
        let (graph, modifiers) = (self.graph, self.modifiers);
        *self.cache.entry((from, to)).or_insert_with(|| {
            find_path(graph, from, to, modifiers).map_or(f64::INFINITY, |p| p.total_cost)
        })
    }

    /// Sum of leg costs, infinity as soon as one leg is unreachable
    fn route(&mut self, route: &[&'a str]) -> f64 {
        let mut total = 0.0;
        for pair in route.windows(2) {
            let cost = self.leg(pair[0], pair[1]);
            if cost.is_infinite() {
                return f64::INFINITY;
            }
            total += cost;
        }
        total
    }
}

/// Total cost of visiting `route` in order.
///
/// Returns infinity if any consecutive pair has no path (or names an unknown
/// node); routes with fewer than two nodes cost nothing.
#[must_use]
pub fn route_cost<S: AsRef<str>>(graph: &StoreGraph, route: &[S], modifiers: &[CostModifier]) -> f64 {
    let route: Vec<&str> = route.iter().map(AsRef::as_ref).collect();
    LegCosts::new(graph, modifiers).route(&route)
}

/// Order `stops` between `start` and `end` to minimise total path cost.
///
/// Returns the full visiting order, `start` first and `end` last. With zero
/// or one stop the order is returned as given, without searching.
///
/// # Errors
///
/// Returns [`NavError::NodeNotFound`] for the first of `start`, `end`,
/// `stops` (in that order) that is not in the graph.
pub fn optimize_route<S: AsRef<str>>(
    graph: &StoreGraph,
    stops: &[S],
    start: &str,
    end: &str,
    modifiers: &[CostModifier],
) -> Result<Vec<String>> {
    let stops: Vec<&str> = stops.iter().map(AsRef::as_ref).collect();
    for id in iter::once(start).chain(iter::once(end)).chain(stops.iter().copied()) {
        if !graph.contains(id) {
            return Err(NavError::NodeNotFound(id.to_string()));
        }
    }

    let mut route: Vec<&str> = iter::once(start)
        .chain(stops.iter().copied())
        .chain(iter::once(end))
        .collect();

    if stops.len() <= 1 {
        return Ok(route.into_iter().map(String::from).collect());
    }

    let mut legs = LegCosts::new(graph, modifiers);
    let naive_cost = legs.route(&route);
    let mut best_cost = naive_cost;
    let last_stop = route.len() - 2;
    let mut moves = 0_usize;

    'scan: loop {
        for i in 1..last_stop {
            for j in i + 1..=last_stop {
                let mut candidate = route.clone();
                candidate[i..=j].reverse();

                let cost = legs.route(&candidate);
                if cost < best_cost {
                    tracing::trace!("2-opt: reversed stops {}..={}, cost {:.2} -> {:.2}", i, j, best_cost, cost);
                    route = candidate;
                    best_cost = cost;
                    moves += 1;
                    continue 'scan;
                }
            }
        }
        break;
    }

    tracing::debug!(
        "Optimized {} stops with {} moves: cost {:.2} -> {:.2}",
        stops.len(),
        moves,
        naive_cost,
        best_cost
    );

    Ok(route.into_iter().map(String::from).collect())
}

/// Optimize the stop order, then stitch the legs into one path.
///
/// # Errors
///
/// * [`NavError::NodeNotFound`] for unknown ids
/// * [`NavError::UnreachableLeg`] if any leg of the optimized order has no
///   path; no partial route is returned
pub fn build_optimized_path<S: AsRef<str>>(
    graph: &StoreGraph,
    stops: &[S],
    start: &str,
    end: &str,
    modifiers: &[CostModifier],
) -> Result<PathResult> {
    let order = optimize_route(graph, stops, start, end, modifiers)?;
    assemble_path(graph, &order, modifiers)
}

/// Join the legs of a visiting order into one path.
///
/// Consecutive legs share their boundary node, which appears once in the
/// combined path. A single-node order yields the stationary path.
///
/// # Errors
///
/// * [`NavError::NodeNotFound`] for unknown ids
/// * [`NavError::UnreachableLeg`] if any leg has no path
pub fn assemble_path<S: AsRef<str>>(
    graph: &StoreGraph,
    order: &[S],
    modifiers: &[CostModifier],
) -> Result<PathResult> {
    if let [only] = order {
        return find_path(graph, only.as_ref(), only.as_ref(), modifiers);
    }

    let mut combined = PathResult {
        path: Vec::new(),
        segments: Vec::new(),
        total_cost: 0.0,
    };

    for pair in order.windows(2) {
        let (from, to) = (pair[0].as_ref(), pair[1].as_ref());
        let leg = find_path(graph, from, to, modifiers).map_err(|e| match e {
            NavError::NoPath { from, to } => NavError::UnreachableLeg { from, to },
            other => other,
        })?;

        let skip = usize::from(!combined.path.is_empty());
        combined.path.extend(leg.path.into_iter().skip(skip));
        combined.segments.extend(leg.segments);
        combined.total_cost += leg.total_cost;
    }

    Ok(combined)
}
