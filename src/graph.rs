// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Store graph built from a floor plan, with petgraph backing for the searches

use crate::error::{NavError, Result};
use crate::floor_plan::FloorPlan;
use crate::types::{GraphEdge, GraphNode, PathResult};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::{BTreeMap, HashMap};

/// Validated, read-only model of the store floor plan
#[derive(Debug, Clone)]
pub struct StoreGraph {
    /// The underlying undirected graph; edge weights are base costs
    graph: UnGraph<GraphNode, f64>,
    /// Map from node ID to node index
    node_indices: HashMap<String, NodeIndex>,
    /// Logical aisle identifier -> node id
    aisle_mapping: BTreeMap<String, String>,
}

impl TryFrom<FloorPlan> for StoreGraph {
    type Error = NavError;

    fn try_from(plan: FloorPlan) -> Result<Self> {
        Self::from_floor_plan(plan)
    }
}

impl StoreGraph {
    /// Build a graph from authored data.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::InvalidFloorPlan`] for empty or duplicate node
    /// ids, non-finite node coordinates, edges to unknown nodes, self-loops, parallel edges, negative or
    /// non-finite base costs, and aisle mappings to unknown nodes.
    pub fn from_floor_plan(plan: FloorPlan) -> Result<Self> {
        let mut graph = UnGraph::with_capacity(plan.nodes.len(), plan.edges.len());
        let mut node_indices = HashMap::with_capacity(plan.nodes.len());

        for node in plan.nodes {
            if node.id.is_empty() {
                return Err(NavError::InvalidFloorPlan("node with empty id".into()));
            }
            if !node.x.is_finite() || !node.y.is_finite() {
                return Err(NavError::InvalidFloorPlan(format!(
                    "node {} has non-finite coordinates ({}, {})",
                    node.id, node.x, node.y
                )));
            }
            if node_indices.contains_key(&node.id) {
                return Err(NavError::InvalidFloorPlan(format!(
                    "duplicate node id: {}",
                    node.id
                )));
            }
            let id = node.id.clone();
            let idx = graph.add_node(node);
            node_indices.insert(id, idx);
        }

        for edge in plan.edges {
            let lookup = |id: &str| {
                node_indices.get(id).copied().ok_or_else(|| {
                    NavError::InvalidFloorPlan(format!(
                        "edge {}-{} references unknown node {}",
                        edge.from, edge.to, id
                    ))
                })
            };
            let from_idx = lookup(&edge.from)?;
            let to_idx = lookup(&edge.to)?;

            if from_idx == to_idx {
                return Err(NavError::InvalidFloorPlan(format!(
                    "edge {}-{} connects a node to itself",
                    edge.from, edge.to
                )));
            }
            if !edge.base_cost.is_finite() || edge.base_cost < 0.0 {
                return Err(NavError::InvalidFloorPlan(format!(
                    "edge {}-{} has invalid base cost {}",
                    edge.from, edge.to, edge.base_cost
                )));
            }
            if graph.find_edge(from_idx, to_idx).is_some() {
                return Err(NavError::InvalidFloorPlan(format!(
                    "duplicate edge {}-{}",
                    edge.from, edge.to
                )));
            }

            graph.add_edge(from_idx, to_idx, edge.base_cost);
        }

        if let Some((aisle, node)) = plan
            .aisle_mapping
            .iter()
            .find(|(_, node)| !node_indices.contains_key(node.as_str()))
        {
            return Err(NavError::InvalidFloorPlan(format!(
                "aisle {aisle} maps to unknown node {node}"
            )));
        }

        tracing::debug!(
            "Built store graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self {
            graph,
            node_indices,
            aisle_mapping: plan.aisle_mapping,
        })
    }

    /// The built-in demo store
    #[must_use]
    pub fn demo() -> Self {
        match Self::from_floor_plan(FloorPlan::demo()) {
            Ok(graph) => graph,
            Err(e) => unreachable!("demo floor plan is valid: {e}"),
        }
    }

    /// Get a node by ID
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.node_indices.get(id).map(|&idx| &self.graph[idx])
    }

    /// Whether a node with this ID exists
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.node_indices.contains_key(id)
    }

    /// Node index for an ID
    pub(crate) fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.node_indices.get(id).copied()
    }

    /// Node at an index obtained from this graph
    pub(crate) fn node_at(&self, idx: NodeIndex) -> &GraphNode {
        &self.graph[idx]
    }

    /// Neighbours of `idx` with the base cost of the connecting edge
    pub(crate) fn incident(&self, idx: NodeIndex) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        self.graph.edges(idx).map(move |e| {
            let other = if e.source() == idx { e.target() } else { e.source() };
            (other, *e.weight())
        })
    }

    /// Base cost of the edge between two nodes, in either direction
    #[must_use]
    pub fn base_cost(&self, from: &str, to: &str) -> Option<f64> {
        let edge = self.graph.find_edge(self.index_of(from)?, self.index_of(to)?)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Resolve a node ID or an aisle identifier to a node ID
    #[must_use]
    pub fn resolve<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        if self.contains(name) {
            return Some(name);
        }
        self.aisle_mapping.get(name).map(String::as_str)
    }

    /// All nodes in floor-plan order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_weights()
    }

    /// All edges in floor-plan order
    pub fn edges(&self) -> impl Iterator<Item = GraphEdge> + '_ {
        self.graph.edge_references().map(|e| GraphEdge {
            from: self.graph[e.source()].id.clone(),
            to: self.graph[e.target()].id.clone(),
            base_cost: *e.weight(),
        })
    }

    /// Edges touching a node
    #[must_use]
    pub fn edges_of(&self, id: &str) -> Vec<GraphEdge> {
        self.edges().filter(|e| e.from == id || e.to == id).collect()
    }

    /// Aisle identifier -> node id mapping
    #[must_use]
    pub fn aisle_mapping(&self) -> &BTreeMap<String, String> {
        &self.aisle_mapping
    }

    /// Get node count
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get edge count
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check if the graph is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Authored form of this graph
    #[must_use]
    pub fn to_floor_plan(&self) -> FloorPlan {
        FloorPlan {
            nodes: self.nodes().cloned().collect(),
            edges: self.edges().collect(),
            aisle_mapping: self.aisle_mapping.clone(),
        }
    }

    /// Export to DOT format for Graphviz, optionally highlighting a route
    #[must_use]
    pub fn to_dot(&self, route: Option<&PathResult>) -> String {
        let walked = |from: &str, to: &str| {
            route.is_some_and(|r| {
                r.segments
                    .iter()
                    .any(|s| (s.from == from && s.to == to) || (s.from == to && s.to == from))
            })
        };

        let mut dot = String::from("graph store {\n");
        dot.push_str("  node [shape=box, style=rounded];\n\n");

        for node in self.nodes() {
            // DOT's pos is in inches, y grows upward
            let id = escape_dot(&node.id);
            dot.push_str(&format!(
                "  \"{}\" [label=\"{}\\n{}\", pos=\"{},{}!\"];\n",
                id,
                id,
                escape_dot(&node.label),
                node.x,
                -node.y
            ));
        }

        dot.push('\n');

        for edge in self.edges() {
            let style = if walked(&edge.from, &edge.to) {
                ", color=red, penwidth=2"
            } else {
                ""
            };
            dot.push_str(&format!(
                "  \"{}\" -- \"{}\" [label=\"{}\"{}];\n",
                escape_dot(&edge.from),
                escape_dot(&edge.to),
                edge.base_cost,
                style
            ));
        }

        dot.push_str("}\n");
        dot
    }
}

/// Quote-safe text for a DOT string literal
fn escape_dot(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
