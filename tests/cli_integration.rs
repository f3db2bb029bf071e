// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Integration tests for the aislenav CLI commands

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// An empty config file, so a developer's own configuration never leaks in
fn empty_config(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("aislenav.toml");
    fs::write(&path, "").unwrap();
    path
}

/// aislenav with an isolated configuration and plain output
fn aislenav(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("aislenav").unwrap();
    cmd.env_remove("AISLENAV_FLOOR_PLAN")
        .env_remove("AISLENAV_ENTRANCE")
        .env_remove("AISLENAV_CHECKOUT")
        .env_remove("RUST_LOG")
        .env_remove("NO_COLOR")
        .arg("--config")
        .arg(empty_config(dir))
        .arg("--no-color");
    cmd
}

fn small_plan(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("store.json");
    fs::write(
        &path,
        r#"{
            "nodes": [
                { "id": "door", "x": 0, "y": 0, "label": "Door" },
                { "id": "milk", "x": 3, "y": 0, "label": "Milk" },
                { "id": "till", "x": 3, "y": 4 }
            ],
            "edges": [
                { "from": "door", "to": "milk", "baseCost": 3 },
                { "from": "milk", "to": "till", "baseCost": 4 },
                { "from": "door", "to": "till", "baseCost": 9 }
            ],
            "aisleMapping": { "dairy": "milk" }
        }"#,
    )
    .unwrap();
    path
}

// =============================================================================
// path
// =============================================================================

#[test]
fn test_path_on_demo_store() {
    let dir = TempDir::new().unwrap();

    aislenav(&dir)
        .args(["path", "entrance", "C1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("total cost 5.00"))
        .stdout(predicate::str::contains("C1 (Canned Goods)"));
}

#[test]
fn test_path_json_output() {
    let dir = TempDir::new().unwrap();

    let output = aislenav(&dir)
        .args(["--json", "path", "entrance", "A2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["path"], serde_json::json!(["entrance", "A1", "A2"]));
    assert_eq!(json["total_cost"], serde_json::json!(4.0));
    assert_eq!(json["segments"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_path_accepts_aisle_names() {
    let dir = TempDir::new().unwrap();

    aislenav(&dir)
        .args(["path", "entrance", "dairy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A2 (Dairy)"));
}

#[test]
fn test_path_blocked_entrance_fails() {
    let dir = TempDir::new().unwrap();

    aislenav(&dir)
        .args(["path", "entrance", "E1", "--block", "entrance:A1", "--block", "B1-entrance"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No route available"));
}

#[test]
fn test_path_unknown_location() {
    let dir = TempDir::new().unwrap();

    aislenav(&dir)
        .args(["path", "entrance", "garden-centre"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown location: garden-centre"));
}

#[test]
fn test_path_congestion_detours() {
    let dir = TempDir::new().unwrap();
    let plan = small_plan(&dir);

    let output = aislenav(&dir)
        .arg("--floor-plan")
        .arg(&plan)
        .args(["--json", "path", "door", "till", "--congest", "milk:till"])
        .output()
        .unwrap();
    assert!(output.status.success());

    // door-milk-till costs 3 + 4 * 2.5 = 13, the direct edge 9
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["path"], serde_json::json!(["door", "till"]));
    assert_eq!(json["total_cost"], serde_json::json!(9.0));
}

// =============================================================================
// route
// =============================================================================

#[test]
fn test_route_through_aisles() {
    let dir = TempDir::new().unwrap();

    aislenav(&dir)
        .args(["route", "bakery", "produce", "snacks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Order: entrance ->"))
        .stdout(predicate::str::contains("-> E1"));
}

#[test]
fn test_route_with_floor_plan_file() {
    let dir = TempDir::new().unwrap();
    let plan = small_plan(&dir);

    aislenav(&dir)
        .arg("--floor-plan")
        .arg(&plan)
        .args(["route", "dairy", "--start", "door", "--end", "till"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Order: door -> milk -> till"))
        .stdout(predicate::str::contains("total cost 7.00"));
}

#[test]
fn test_route_unreachable_leg_fails() {
    let dir = TempDir::new().unwrap();

    aislenav(&dir)
        .args(["route", "D1", "--block", "C1:D1", "--block", "C2:D1", "--block", "D1:D2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No route available"));
}

// =============================================================================
// modifiers
// =============================================================================

#[test]
fn test_modifiers_listing() {
    let dir = TempDir::new().unwrap();

    aislenav(&dir)
        .args(["modifiers", "--congest", "A1:A2", "--block", "B1:B2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A1-A2: Heavy congestion"))
        .stdout(predicate::str::contains("B1-B2: Aisle blocked - out of stock"));
}

#[test]
fn test_modifiers_clear() {
    let dir = TempDir::new().unwrap();

    aislenav(&dir)
        .args(["modifiers", "--block", "B1:B2", "--clear", "B2:B1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active modifiers"));
}

#[test]
fn test_modifiers_rejects_bad_edge() {
    let dir = TempDir::new().unwrap();

    aislenav(&dir)
        .args(["modifiers", "--block", "B1"])
        .assert()
        .failure();
}

// =============================================================================
// export
// =============================================================================

#[test]
fn test_export_dot() {
    let dir = TempDir::new().unwrap();

    aislenav(&dir)
        .args(["export", "--format", "dot"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("graph store {"))
        .stdout(predicate::str::contains("\"entrance\" -- \"A1\""));
}

#[test]
fn test_export_dot_highlight() {
    let dir = TempDir::new().unwrap();

    aislenav(&dir)
        .args(["export", "--highlight", "dairy,deli"])
        .assert()
        .success()
        .stdout(predicate::str::contains("color=red"));
}

#[test]
fn test_export_json_to_file_round_trips() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("plan.json");

    aislenav(&dir)
        .args(["export", "--format", "json", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    // The exported plan loads back as a floor plan
    aislenav(&dir)
        .arg("--floor-plan")
        .arg(&out)
        .args(["path", "entrance", "E1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("total cost 9.00"));
}

#[test]
fn test_export_unknown_format() {
    let dir = TempDir::new().unwrap();

    aislenav(&dir)
        .args(["export", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown export format"));
}

// =============================================================================
// config
// =============================================================================

#[test]
fn test_config_key() {
    let dir = TempDir::new().unwrap();

    aislenav(&dir)
        .args(["config", "checkout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("E1"));
}

#[test]
fn test_config_env_override() {
    let dir = TempDir::new().unwrap();

    aislenav(&dir)
        .env("AISLENAV_ENTRANCE", "north-door")
        .args(["config", "entrance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("north-door"));
}

#[test]
fn test_config_unknown_key() {
    let dir = TempDir::new().unwrap();

    aislenav(&dir)
        .args(["config", "colour"])
        .assert()
        .failure();
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();

    aislenav(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("aislenav"));
}
