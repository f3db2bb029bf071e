// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Authored floor-plan data and the built-in demo store

use crate::types::{GraphEdge, GraphNode};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Floor plan as authored: nodes, walkable edges and the aisle mapping.
///
/// This is the unvalidated input form; build a [`crate::StoreGraph`] from it
/// before searching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    /// All locations
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    /// All walkable connections
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
    /// Logical aisle identifier -> node id
    #[serde(default, alias = "aisleMapping")]
    pub aisle_mapping: BTreeMap<String, String>,
}

impl FloorPlan {
    /// Parse a floor plan from JSON
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse floor plan JSON")
    }

    /// Parse a floor plan from TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse floor plan TOML")
    }

    /// Load a floor plan file; `.toml` files are read as TOML, anything
    /// else as JSON
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let plan = if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        };
        plan.with_context(|| format!("Failed to load floor plan {}", path.display()))
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize floor plan to JSON")
    }

    /// The demo store layout.
    ///
    /// Three columns of aisles (A, B, C), two service counters on the right
    /// (D1 deli, D2 meat) and the checkout (E1) at the bottom. Every base
    /// cost is at least the straight-line distance between its endpoints.
    #[must_use]
    pub fn demo() -> Self {
        let nodes = vec![
            GraphNode::new("entrance", 0.0, 0.0, "Entrance"),
            GraphNode::new("A1", 0.0, 2.0, "Produce"),
            GraphNode::new("A2", 0.0, 4.0, "Dairy"),
            GraphNode::new("A3", 0.0, 6.0, "Frozen"),
            GraphNode::new("B1", 2.0, 2.0, "Snacks"),
            GraphNode::new("B2", 2.0, 4.0, "Beverages"),
            GraphNode::new("B3", 2.0, 6.0, "Bakery"),
            GraphNode::new("C1", 4.0, 2.0, "Canned Goods"),
            GraphNode::new("C2", 4.0, 4.0, "Pasta"),
            GraphNode::new("C3", 4.0, 6.0, "Cereal"),
            GraphNode::new("D1", 6.0, 3.0, "Deli"),
            GraphNode::new("D2", 6.0, 5.0, "Meat"),
            GraphNode::new("E1", 2.0, 8.0, "Checkout"),
        ];

        let edges = [
            ("entrance", "A1", 2.0),
            ("entrance", "B1", 3.0),
            // Down the aisles
            ("A1", "A2", 2.0),
            ("A2", "A3", 2.0),
            ("B1", "B2", 2.0),
            ("B2", "B3", 2.0),
            ("C1", "C2", 2.0),
            ("C2", "C3", 2.0),
            // Cross aisles
            ("A1", "B1", 2.0),
            ("A2", "B2", 2.0),
            ("A3", "B3", 2.0),
            ("B1", "C1", 2.0),
            ("B2", "C2", 2.0),
            ("B3", "C3", 2.0),
            // Service counters
            ("C1", "D1", 2.5),
            ("C2", "D1", 2.5),
            ("C2", "D2", 2.5),
            ("C3", "D2", 2.5),
            ("D1", "D2", 2.0),
            // Checkout lanes
            ("A3", "E1", 3.0),
            ("B3", "E1", 2.0),
            ("C3", "E1", 3.0),
        ]
        .into_iter()
        .map(|(from, to, cost)| GraphEdge::new(from, to, cost))
        .collect();

        let aisle_mapping = [
            ("produce", "A1"),
            ("dairy", "A2"),
            ("frozen", "A3"),
            ("snacks", "B1"),
            ("beverages", "B2"),
            ("bakery", "B3"),
            ("canned", "C1"),
            ("pasta", "C2"),
            ("cereal", "C3"),
            ("deli", "D1"),
            ("meat", "D2"),
            ("checkout", "E1"),
        ]
        .into_iter()
        .map(|(aisle, node)| (aisle.to_string(), node.to_string()))
        .collect();

        Self {
            nodes,
            edges,
            aisle_mapping,
        }
    }
}
