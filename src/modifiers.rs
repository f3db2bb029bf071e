// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Transient edge-cost modifiers
//!
//! Modifiers represent real-world events such as congestion or an aisle
//! blocked by a stockout. They are owned by the caller and handed to every
//! search as an immutable slice; nothing here holds global state.

use crate::error::{NavError, Result};
use std::fmt;
use std::str::FromStr;

/// Multiplier applied by [`create_congestion_modifier`]
pub const CONGESTION_MULTIPLIER: f64 = 2.5;

/// Reason attached to congestion modifiers
pub const CONGESTION_REASON: &str = "Heavy congestion";

/// Reason attached to blocked-aisle modifiers
pub const BLOCKED_REASON: &str = "Aisle blocked - out of stock";

// =========================================================================
// Edge Identity
// =========================================================================

/// Identity of an undirected edge.
///
/// The pair keeps the orientation it was created with for display, but
/// equality and [`EdgeKey::matches`] ignore direction.
#[derive(Debug, Clone, Eq)]
pub struct EdgeKey {
    /// First endpoint, as given
    pub from: String,
    /// Second endpoint, as given
    pub to: String,
}

impl EdgeKey {
    /// Create a key for the edge between `from` and `to`
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Whether this key names the edge between `a` and `b`, in either direction
    #[must_use]
    pub fn matches(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

impl PartialEq for EdgeKey {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.from, &other.to)
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl FromStr for EdgeKey {
    type Err = NavError;

    /// Parse `FROM:TO`, falling back to `FROM-TO` when there is no colon
    fn from_str(s: &str) -> Result<Self> {
        let (from, to) = s
            .split_once(':')
            .or_else(|| s.split_once('-'))
            .ok_or_else(|| NavError::InvalidEdgeKey(s.to_string()))?;
        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() || to.is_empty() {
            return Err(NavError::InvalidEdgeKey(s.to_string()));
        }
        Ok(Self::new(from, to))
    }
}

// =========================================================================
// Modifiers
// =========================================================================

/// A multiplicative adjustment to one edge's cost
#[derive(Debug, Clone, PartialEq)]
pub struct CostModifier {
    /// Edge this modifier applies to
    pub edge: EdgeKey,
    /// 1.0 = no change, > 1.0 = more expensive, infinity = blocked
    pub multiplier: f64,
    /// Human-readable cause
    pub reason: String,
}

impl CostModifier {
    /// Create a modifier with a custom multiplier.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::InvalidModifier`] if the multiplier is NaN or
    /// negative.
    pub fn new(edge: EdgeKey, multiplier: f64, reason: impl Into<String>) -> Result<Self> {
        if multiplier.is_nan() || multiplier < 0.0 {
            return Err(NavError::InvalidModifier {
                edge: edge.to_string(),
                reason: format!("multiplier must be >= 0, got {multiplier}"),
            });
        }
        if multiplier < 1.0 {
            // Discounts can push costs below straight-line distance.
            tracing::warn!(
                "Modifier on {} discounts the edge ({}x); shortest paths are no longer guaranteed",
                edge,
                multiplier
            );
        }
        Ok(Self {
            edge,
            multiplier,
            reason: reason.into(),
        })
    }

    /// Whether this modifier makes its edge impassable
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.multiplier.is_infinite()
    }
}

/// Modifier for an edge under heavy foot traffic
#[must_use]
pub fn create_congestion_modifier(from: &str, to: &str) -> CostModifier {
    CostModifier {
        edge: EdgeKey::new(from, to),
        multiplier: CONGESTION_MULTIPLIER,
        reason: CONGESTION_REASON.to_string(),
    }
}

/// Modifier for an edge that cannot be walked at all
#[must_use]
pub fn create_blocked_modifier(from: &str, to: &str) -> CostModifier {
    CostModifier {
        edge: EdgeKey::new(from, to),
        multiplier: f64::INFINITY,
        reason: BLOCKED_REASON.to_string(),
    }
}

/// Copy of `modifiers` without any entry for `edge` (either direction)
#[must_use]
pub fn remove_modifier(modifiers: &[CostModifier], edge: &EdgeKey) -> Vec<CostModifier> {
    modifiers
        .iter()
        .filter(|m| m.edge != *edge)
        .cloned()
        .collect()
}

/// One `"<edge>: <reason>"` line per modifier, in registration order
#[must_use]
pub fn active_modifiers(modifiers: &[CostModifier]) -> Vec<String> {
    modifiers
        .iter()
        .map(|m| format!("{}: {}", m.edge, m.reason))
        .collect()
}

/// Combined multiplier of every modifier matching the edge `from`-`to`.
///
/// Returns 1.0 when nothing matches and infinity when any match is a block.
#[must_use]
pub fn effective_multiplier(modifiers: &[CostModifier], from: &str, to: &str) -> f64 {
    let mut product = 1.0;
    for modifier in modifiers.iter().filter(|m| m.edge.matches(from, to)) {
        if modifier.is_blocked() {
            return f64::INFINITY;
        }
        product *= modifier.multiplier;
    }
    product
}

/// Base cost with modifiers applied; infinite means the edge is absent
#[must_use]
pub fn effective_cost(base_cost: f64, modifiers: &[CostModifier], from: &str, to: &str) -> f64 {
    let multiplier = effective_multiplier(modifiers, from, to);
    if multiplier.is_infinite() {
        return f64::INFINITY;
    }
    base_cost * multiplier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_congestion_modifier() {
        let m = create_congestion_modifier("A", "B");

        assert_eq!(m.edge, EdgeKey::new("A", "B"));
        assert!((m.multiplier - 2.5).abs() < f64::EPSILON);
        assert_eq!(m.reason, "Heavy congestion");
        assert!(!m.is_blocked());
    }

    #[test]
    fn test_blocked_modifier() {
        let m = create_blocked_modifier("A", "B");

        assert!(m.is_blocked());
        assert_eq!(m.reason, "Aisle blocked - out of stock");
    }

    #[test]
    fn test_edge_key_is_direction_insensitive() {
        let key = EdgeKey::new("A", "B");

        assert!(key.matches("A", "B"));
        assert!(key.matches("B", "A"));
        assert!(!key.matches("A", "C"));
        assert_eq!(key, EdgeKey::new("B", "A"));
    }

    #[test]
    fn test_edge_key_parse() {
        assert_eq!("A1:B1".parse::<EdgeKey>().unwrap(), EdgeKey::new("A1", "B1"));
        assert_eq!("A1-B1".parse::<EdgeKey>().unwrap(), EdgeKey::new("A1", "B1"));
        // The colon wins so ids may contain dashes
        let key: EdgeKey = "north-door:A1".parse().unwrap();
        assert_eq!(key.from, "north-door");
        assert!("A1".parse::<EdgeKey>().is_err());
        assert!(":B1".parse::<EdgeKey>().is_err());
    }

    #[test]
    fn test_remove_modifier_is_pure_filter() {
        let modifiers = vec![
            create_congestion_modifier("A", "B"),
            create_blocked_modifier("B", "C"),
            create_congestion_modifier("B", "A"),
        ];

        let remaining = remove_modifier(&modifiers, &EdgeKey::new("A", "B"));

        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].edge, EdgeKey::new("B", "C"));
        // Input untouched
        assert_eq!(modifiers.len(), 3);
    }

    #[test]
    fn test_active_modifiers_summary() {
        let modifiers = vec![
            create_congestion_modifier("A", "B"),
            create_blocked_modifier("C", "D"),
        ];

        assert_eq!(
            active_modifiers(&modifiers),
            vec![
                "A-B: Heavy congestion".to_string(),
                "C-D: Aisle blocked - out of stock".to_string(),
            ]
        );
    }

    #[test]
    fn test_multipliers_compose() {
        let modifiers = vec![
            create_congestion_modifier("A", "B"),
            create_congestion_modifier("B", "A"),
            create_congestion_modifier("C", "D"),
        ];

        assert!((effective_multiplier(&modifiers, "A", "B") - 6.25).abs() < 1e-12);
        assert!((effective_multiplier(&modifiers, "B", "C") - 1.0).abs() < f64::EPSILON);
        assert!((effective_cost(2.0, &modifiers, "B", "A") - 12.5).abs() < 1e-12);
    }

    #[test]
    fn test_block_wins_over_zero() {
        let modifiers = vec![
            CostModifier::new(EdgeKey::new("A", "B"), 0.0, "free").unwrap(),
            create_blocked_modifier("A", "B"),
        ];

        assert!(effective_cost(0.0, &modifiers, "A", "B").is_infinite());
    }

    #[test]
    fn test_invalid_multiplier_rejected() {
        assert!(CostModifier::new(EdgeKey::new("A", "B"), -1.0, "bad").is_err());
        assert!(CostModifier::new(EdgeKey::new("A", "B"), f64::NAN, "bad").is_err());
        assert!(CostModifier::new(EdgeKey::new("A", "B"), 1.2, "busy").is_ok());
    }
}
