// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
#![no_main]

use aislenav::{find_path, FloorPlan, StoreGraph};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(plan) = FloorPlan::from_json_str(text) else {
        return;
    };
    let Ok(graph) = StoreGraph::from_floor_plan(plan) else {
        return;
    };

    let ids: Vec<String> = graph.nodes().map(|n| n.id.clone()).collect();
    if let (Some(first), Some(last)) = (ids.first(), ids.last()) {
        if let Ok(path) = find_path(&graph, first, last, &[]) {
            assert_eq!(path.path.first(), Some(first));
            assert_eq!(path.path.last(), Some(last));
        }
    }
});
