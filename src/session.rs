// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Navigation session state
//!
//! Holds what the application layer owns between searches: the live list of
//! cost modifiers, the shopper's current node, and the route planned last.

use crate::astar::find_path;
use crate::error::{NavError, Result};
use crate::graph::StoreGraph;
use crate::modifiers::{remove_modifier, CostModifier, EdgeKey};
use crate::optimizer::build_optimized_path;
use crate::types::PathResult;

/// The stops and end node of the last planned route
#[derive(Debug, Clone, PartialEq)]
struct RouteRequest {
    stops: Vec<String>,
    end: String,
}

/// Mutable navigation state over a read-only store graph
#[derive(Debug, Clone)]
pub struct NavSession<'g> {
    graph: &'g StoreGraph,
    modifiers: Vec<CostModifier>,
    position: String,
    current_path: Option<PathResult>,
    request: Option<RouteRequest>,
}

impl<'g> NavSession<'g> {
    /// Start a session with the shopper at `position`
    ///
    /// # Errors
    ///
    /// Returns [`NavError::NodeNotFound`] if `position` is not in the graph.
    pub fn new(graph: &'g StoreGraph, position: &str) -> Result<Self> {
        ensure_node(graph, position)?;
        Ok(Self {
            graph,
            modifiers: Vec::new(),
            position: position.to_string(),
            current_path: None,
            request: None,
        })
    }

    /// The graph this session navigates
    #[must_use]
    pub fn graph(&self) -> &'g StoreGraph {
        self.graph
    }

    /// Active modifiers in registration order
    #[must_use]
    pub fn modifiers(&self) -> &[CostModifier] {
        &self.modifiers
    }

    /// Register a modifier
    pub fn add_modifier(&mut self, modifier: CostModifier) {
        tracing::info!("Modifier added on {}: {}", modifier.edge, modifier.reason);
        self.modifiers.push(modifier);
    }

    /// Drop every modifier on `edge`; returns how many were removed
    pub fn remove_modifier(&mut self, edge: &EdgeKey) -> usize {
        let before = self.modifiers.len();
        self.modifiers = remove_modifier(&self.modifiers, edge);
        let removed = before - self.modifiers.len();
        tracing::info!("Removed {} modifier(s) on {}", removed, edge);
        removed
    }

    /// Drop all modifiers
    pub fn clear_modifiers(&mut self) {
        self.modifiers.clear();
    }

    /// The shopper's current node
    #[must_use]
    pub fn position(&self) -> &str {
        &self.position
    }

    /// Move the shopper to `node`
    ///
    /// # Errors
    ///
    /// Returns [`NavError::NodeNotFound`] if `node` is not in the graph.
    pub fn set_position(&mut self, node: &str) -> Result<()> {
        ensure_node(self.graph, node)?;
        self.position = node.to_string();
        Ok(())
    }

    /// The route planned last, if any
    #[must_use]
    pub fn current_path(&self) -> Option<&PathResult> {
        self.current_path.as_ref()
    }

    /// Single-leg path from the current position
    ///
    /// # Errors
    ///
    /// See [`find_path`].
    pub fn navigate_to(&mut self, goal: &str) -> Result<&PathResult> {
        self.plan_route(&[] as &[&str], goal)
    }

    /// Plan an optimized route from the current position through `stops`
    /// to `end`, replacing the current path.
    ///
    /// # Errors
    ///
    /// See [`build_optimized_path`]. On error the current path is cleared.
    pub fn plan_route<S: AsRef<str>>(&mut self, stops: &[S], end: &str) -> Result<&PathResult> {
        let request = RouteRequest {
            stops: stops.iter().map(|s| s.as_ref().to_string()).collect(),
            end: end.to_string(),
        };
        self.request = Some(request.clone());
        self.plan(&request)
    }

    /// Re-plan the last requested route against the current modifiers and
    /// position. Returns `Ok(None)` if nothing has been planned yet.
    ///
    /// # Errors
    ///
    /// See [`build_optimized_path`]. On error the stale path is cleared.
    pub fn reroute(&mut self) -> Result<Option<&PathResult>> {
        let Some(request) = self.request.clone() else {
            return Ok(None);
        };
        self.plan(&request).map(Some)
    }

    fn plan(&mut self, request: &RouteRequest) -> Result<&PathResult> {
        let planned = if request.stops.is_empty() {
            find_path(self.graph, &self.position, &request.end, &self.modifiers)
        } else {
            build_optimized_path(
                self.graph,
                &request.stops,
                &self.position,
                &request.end,
                &self.modifiers,
            )
        };

        match planned {
            Ok(path) => Ok(&*self.current_path.insert(path)),
            Err(e) => {
                tracing::warn!("No route available: {}", e);
                self.current_path = None;
                Err(e)
            }
        }
    }
}

fn ensure_node(graph: &StoreGraph, id: &str) -> Result<()> {
    if graph.contains(id) {
        Ok(())
    } else {
        Err(NavError::NodeNotFound(id.to_string()))
    }
}
