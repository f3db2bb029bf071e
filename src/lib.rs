// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Aislenav library - in-store wayfinding engine
//!
//! This crate models a store floor plan as a weighted undirected graph,
//! finds least-cost paths between locations with A*, re-weights edges with
//! transient cost modifiers (congestion, blocked aisles), and sequences
//! several shopping stops into a single walking route with 2-opt search.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod astar;
pub mod commands;
pub mod config;
pub mod error;
pub mod floor_plan;
pub mod graph;
pub mod modifiers;
pub mod optimizer;
pub mod session;

pub use astar::find_path;
pub use error::{NavError, Result};
pub use floor_plan::FloorPlan;
pub use graph::StoreGraph;
pub use modifiers::{
    active_modifiers, create_blocked_modifier, create_congestion_modifier, effective_cost,
    effective_multiplier, remove_modifier, CostModifier, EdgeKey,
};
pub use optimizer::{assemble_path, build_optimized_path, optimize_route, route_cost};
pub use session::NavSession;

/// Core data types shared by the graph, the path finder and the optimizer
pub mod types {
    use serde::{Deserialize, Serialize};

    // =========================================================================
    // Floor Plan Elements
    // =========================================================================

    /// A discrete location on the floor plan (aisle, section or landmark)
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct GraphNode {
        /// Unique identifier, e.g. `A1` or `entrance`
        pub id: String,
        /// X coordinate, used only for the search heuristic
        pub x: f64,
        /// Y coordinate, used only for the search heuristic
        pub y: f64,
        /// Display label
        #[serde(default)]
        pub label: String,
    }

    impl GraphNode {
        /// Create a node
        #[must_use]
        pub fn new(id: impl Into<String>, x: f64, y: f64, label: impl Into<String>) -> Self {
            Self {
                id: id.into(),
                x,
                y,
                label: label.into(),
            }
        }

        /// Straight-line distance to another node
        #[must_use]
        pub fn distance_to(&self, other: &Self) -> f64 {
            let dx = self.x - other.x;
            let dy = self.y - other.y;
            (dx * dx + dy * dy).sqrt()
        }
    }

    /// Walkable connection between two nodes, traversable in both directions
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct GraphEdge {
        /// One endpoint
        pub from: String,
        /// The other endpoint
        pub to: String,
        /// Nominal traversal effort (non-negative)
        #[serde(alias = "baseCost")]
        pub base_cost: f64,
    }

    impl GraphEdge {
        /// Create an edge
        #[must_use]
        pub fn new(from: impl Into<String>, to: impl Into<String>, base_cost: f64) -> Self {
            Self {
                from: from.into(),
                to: to.into(),
                base_cost,
            }
        }
    }

    // =========================================================================
    // Search Results
    // =========================================================================

    /// One traversed edge of a path
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct PathSegment {
        /// Node the hop leaves from
        pub from: String,
        /// Node the hop arrives at
        pub to: String,
        /// Effective cost, modifiers applied
        pub cost: f64,
    }

    /// A computed path. This is a snapshot and is never re-validated against
    /// later changes to the modifiers.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct PathResult {
        /// Node ids from start to goal, inclusive
        pub path: Vec<String>,
        /// One segment per hop
        pub segments: Vec<PathSegment>,
        /// Sum of segment costs
        pub total_cost: f64,
    }

    impl PathResult {
        /// The zero-length path that stays on `node`
        #[must_use]
        pub fn stationary(node: impl Into<String>) -> Self {
            Self {
                path: vec![node.into()],
                segments: Vec::new(),
                total_cost: 0.0,
            }
        }

        /// Number of hops
        #[must_use]
        pub fn hop_count(&self) -> usize {
            self.segments.len()
        }

        /// First node of the path
        #[must_use]
        pub fn start(&self) -> Option<&str> {
            self.path.first().map(String::as_str)
        }

        /// Last node of the path
        #[must_use]
        pub fn goal(&self) -> Option<&str> {
            self.path.last().map(String::as_str)
        }
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::error::{NavError, Result};
    pub use crate::graph::StoreGraph;
    pub use crate::modifiers::{CostModifier, EdgeKey};
    pub use crate::types::*;
}
