// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Modifiers command - show which edge adjustments are in effect

use super::{EdgeEvents, Output};
use crate::modifiers::{active_modifiers, remove_modifier, EdgeKey};
use anyhow::{Context, Result};

/// Run the modifiers command: apply the events, drop the cleared edges,
/// and list what remains
pub fn run(events: &EdgeEvents, clear: &[EdgeKey], output: Output) -> Result<()> {
    let modifiers = clear
        .iter()
        .fold(events.to_modifiers(), |acc, edge| remove_modifier(&acc, edge));
    let summary = active_modifiers(&modifiers);

    if output.json {
        let json = serde_json::to_string_pretty(&summary).context("Failed to serialize modifiers")?;
        println!("{json}");
    } else if summary.is_empty() {
        println!("No active modifiers");
    } else {
        for line in &summary {
            println!("{line}");
        }
    }

    Ok(())
}
