// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for the navigation engine

use thiserror::Error;

/// Navigation engine error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavError {
    /// A node id that is not part of the floor plan
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Both nodes exist but no unblocked path connects them
    #[error("No path from {from} to {to}")]
    NoPath {
        /// Start node id
        from: String,
        /// Goal node id
        to: String,
    },

    /// A leg of a multi-stop route has no path
    #[error("Route leg {from} -> {to} is unreachable")]
    UnreachableLeg {
        /// Leg start node id
        from: String,
        /// Leg end node id
        to: String,
    },

    /// Structural problem in authored floor-plan data
    #[error("Invalid floor plan: {0}")]
    InvalidFloorPlan(String),

    /// A modifier whose multiplier cannot be applied
    #[error("Invalid modifier for edge {edge}: {reason}")]
    InvalidModifier {
        /// Edge the modifier targets
        edge: String,
        /// What is wrong with it
        reason: String,
    },

    /// Text that does not describe an edge
    #[error("Invalid edge key: {0} (expected FROM:TO)")]
    InvalidEdgeKey(String),
}

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, NavError>;
