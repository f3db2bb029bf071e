// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! A* path finder over the store graph.
//!
//! The heuristic is the straight-line distance between node coordinates.
//! It is admissible as long as no effective edge cost falls below the
//! geometric distance between its endpoints, which holds for floor plans
//! whose base costs are at least that distance and for modifiers >= 1.0.
//! Discounting modifiers void the optimality guarantee.

use crate::error::{NavError, Result};
use crate::graph::StoreGraph;
use crate::modifiers::{effective_cost, CostModifier};
use crate::types::{PathResult, PathSegment};
use petgraph::graph::NodeIndex;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Frontier entry in the open set.
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    node: NodeIndex,
    /// Cost from start when this entry was pushed
    g: f64,
    /// g + heuristic
    f: f64,
    /// Push order, breaks ties on `f`
    seq: u64,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap: lowest f first, then earliest push
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find the least-cost path from `start` to `goal` under `modifiers`.
///
/// Among frontier nodes with equal `f`, the one pushed first is expanded
/// first, so repeated calls with the same inputs return the same path.
///
/// # Errors
///
/// * [`NavError::NodeNotFound`] if `start` or `goal` is not in the graph
/// * [`NavError::NoPath`] if every route to `goal` is disconnected or blocked
pub fn find_path(
    graph: &StoreGraph,
    start: &str,
    goal: &str,
    modifiers: &[CostModifier],
) -> Result<PathResult> {
    let start_idx = graph
        .index_of(start)
        .ok_or_else(|| NavError::NodeNotFound(start.to_string()))?;
    let goal_idx = graph
        .index_of(goal)
        .ok_or_else(|| NavError::NodeNotFound(goal.to_string()))?;
    if start_idx == goal_idx {
        return Ok(PathResult::stationary(start));
    }

    let goal_node = graph.node_at(goal_idx);
    let heuristic = |idx: NodeIndex| graph.node_at(idx).distance_to(goal_node);

    let n = graph.node_count();
    let mut g_score = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<NodeIndex>> = vec![None; n];
    let mut closed = vec![false; n];

    let mut open = BinaryHeap::new();
    let mut seq = 0_u64;
    g_score[start_idx.index()] = 0.0;
    open.push(OpenEntry {
        node: start_idx,
        g: 0.0,
        f: heuristic(start_idx),
        seq,
    });

    let mut expanded = 0_usize;

    while let Some(current) = open.pop() {
        let idx = current.node;
        if closed[idx.index()] || current.g > g_score[idx.index()] {
            // Superseded by a cheaper entry
            continue;
        }

        if idx == goal_idx {
            let result = reconstruct(graph, &parent, goal_idx, current.g, modifiers);
            tracing::debug!(
                "Path {} -> {}: {} hops, cost {:.2}, {} nodes expanded",
                start,
                goal,
                result.hop_count(),
                result.total_cost,
                expanded
            );
            return Ok(result);
        }

        closed[idx.index()] = true;
        expanded += 1;
        let current_id = graph.node_at(idx).id.as_str();

        for (neighbor, base_cost) in graph.incident(idx) {
            if closed[neighbor.index()] {
                continue;
            }

            let neighbor_id = graph.node_at(neighbor).id.as_str();
            let edge_cost = effective_cost(base_cost, modifiers, current_id, neighbor_id);
            if edge_cost.is_infinite() {
                // Blocked
                continue;
            }

            let tentative_g = current.g + edge_cost;
            if tentative_g < g_score[neighbor.index()] {
                g_score[neighbor.index()] = tentative_g;
                parent[neighbor.index()] = Some(idx);
                seq += 1;
                open.push(OpenEntry {
                    node: neighbor,
                    g: tentative_g,
                    f: tentative_g + heuristic(neighbor),
                    seq,
                });
            }
        }
    }

    tracing::debug!("No path {} -> {} ({} nodes expanded)", start, goal, expanded);
    Err(NavError::NoPath {
        from: start.to_string(),
        to: goal.to_string(),
    })
}

/// Walk parent pointers back from the goal
fn reconstruct(
    graph: &StoreGraph,
    parent: &[Option<NodeIndex>],
    goal: NodeIndex,
    total_cost: f64,
    modifiers: &[CostModifier],
) -> PathResult {
    let mut path = vec![graph.node_at(goal).id.clone()];
    let mut segments = Vec::new();
    let mut node = goal;

    while let Some(prev) = parent[node.index()] {
        let from = &graph.node_at(prev).id;
        let to = &graph.node_at(node).id;
        let base_cost = graph.base_cost(from, to).unwrap_or(f64::INFINITY);
        segments.push(PathSegment {
            from: from.clone(),
            to: to.clone(),
            cost: effective_cost(base_cost, modifiers, from, to),
        });
        path.push(from.clone());
        node = prev;
    }

    path.reverse();
    segments.reverse();

    PathResult {
        path,
        segments,
        total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor_plan::FloorPlan;
    use crate::modifiers::{create_blocked_modifier, create_congestion_modifier};
    use crate::types::{GraphEdge, GraphNode};

    /// A - B - C - D in a line, unit costs
    fn line_graph() -> StoreGraph {
        StoreGraph::from_floor_plan(FloorPlan {
            nodes: ["A", "B", "C", "D"]
                .iter()
                .zip(0_i32..)
                .map(|(id, x)| GraphNode::new(*id, f64::from(x), 0.0, *id))
                .collect(),
            edges: vec![
                GraphEdge::new("A", "B", 1.0),
                GraphEdge::new("B", "C", 1.0),
                GraphEdge::new("C", "D", 1.0),
            ],
            ..FloorPlan::default()
        })
        .unwrap()
    }

    /// A cheap top route and a slightly dearer bottom route
    ///
    /// ```text
    /// A --1-- B --2-- D
    ///  \             /
    ///   2-----C-----2
    /// ```
    fn diamond_graph() -> StoreGraph {
        StoreGraph::from_floor_plan(FloorPlan {
            nodes: vec![
                GraphNode::new("A", 0.0, 0.0, "A"),
                GraphNode::new("B", 1.0, 0.0, "B"),
                GraphNode::new("C", 1.0, 1.0, "C"),
                GraphNode::new("D", 2.0, 0.0, "D"),
            ],
            edges: vec![
                GraphEdge::new("A", "B", 1.0),
                GraphEdge::new("B", "D", 2.0),
                GraphEdge::new("A", "C", 2.0),
                GraphEdge::new("C", "D", 2.0),
            ],
            ..FloorPlan::default()
        })
        .unwrap()
    }

    #[test]
    fn test_line_path() {
        let graph = line_graph();
        let result = find_path(&graph, "A", "D", &[]).unwrap();

        assert_eq!(result.path, vec!["A", "B", "C", "D"]);
        assert_eq!(result.segments.len(), 3);
        assert!((result.total_cost - 3.0).abs() < 1e-12);
        assert_eq!(result.segments[1].from, "B");
        assert_eq!(result.segments[1].to, "C");
    }

    #[test]
    fn test_reverse_direction() {
        let graph = line_graph();
        let result = find_path(&graph, "D", "A", &[]).unwrap();

        assert_eq!(result.path, vec!["D", "C", "B", "A"]);
    }

    #[test]
    fn test_path_to_self() {
        let graph = line_graph();
        let result = find_path(&graph, "C", "C", &[]).unwrap();

        assert_eq!(result.path, vec!["C"]);
        assert!(result.segments.is_empty());
        assert!(result.total_cost.abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_nodes() {
        let graph = line_graph();

        assert_eq!(
            find_path(&graph, "Z", "A", &[]).unwrap_err(),
            NavError::NodeNotFound("Z".into())
        );
        assert_eq!(
            find_path(&graph, "A", "Z", &[]).unwrap_err(),
            NavError::NodeNotFound("Z".into())
        );
    }

    #[test]
    fn test_blocked_edge_means_no_path() {
        let graph = line_graph();
        let modifiers = vec![create_blocked_modifier("C", "B")];

        let err = find_path(&graph, "A", "D", &modifiers).unwrap_err();

        assert_eq!(
            err,
            NavError::NoPath {
                from: "A".into(),
                to: "D".into()
            }
        );
    }

    #[test]
    fn test_congestion_without_alternative_raises_cost() {
        let graph = line_graph();
        let modifiers = vec![create_congestion_modifier("B", "C")];

        let result = find_path(&graph, "A", "D", &modifiers).unwrap();

        assert_eq!(result.path, vec!["A", "B", "C", "D"]);
        assert!((result.total_cost - 4.5).abs() < 1e-12);
        assert!((result.segments[1].cost - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_congestion_reroutes_when_cheaper() {
        let graph = diamond_graph();
        let plain = find_path(&graph, "A", "D", &[]).unwrap();
        assert_eq!(plain.path, vec!["A", "B", "D"]);
        assert!((plain.total_cost - 3.0).abs() < 1e-12);

        // B-D now costs 5, so the top route costs 6 against 4 below
        let modifiers = vec![create_congestion_modifier("D", "B")];
        let rerouted = find_path(&graph, "A", "D", &modifiers).unwrap();

        assert_eq!(rerouted.path, vec!["A", "C", "D"]);
        assert!((rerouted.total_cost - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_segments_sum_to_total() {
        let graph = StoreGraph::demo();
        let modifiers = vec![create_congestion_modifier("B1", "B2")];

        let result = find_path(&graph, "entrance", "E1", &modifiers).unwrap();
        let sum: f64 = result.segments.iter().map(|s| s.cost).sum();

        assert!((sum - result.total_cost).abs() < 1e-9);
        assert_eq!(result.start(), Some("entrance"));
        assert_eq!(result.goal(), Some("E1"));
    }

    #[test]
    fn test_deterministic() {
        let graph = StoreGraph::demo();
        let modifiers = vec![create_congestion_modifier("C2", "D1")];

        let first = find_path(&graph, "entrance", "D2", &modifiers).unwrap();
        for _ in 0..10 {
            assert_eq!(find_path(&graph, "entrance", "D2", &modifiers).unwrap(), first);
        }
    }
}
