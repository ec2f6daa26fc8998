//! End-to-end tests for the `tdma` binary.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// TEST FIXTURES
// =============================================================================

/// Runs `tdma` with an isolated settings file and colors off.
fn tdma(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tdma").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env("TDMA_CONFIG", config_dir.path().join("config.toml"));
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Three-node rod: 500 and 300 at the ends through the boundary terms.
const ROD_JSON: &str = r#"{
    "a": [600, 400, 600],
    "b": [200, 200, 0],
    "c": [0, 200, 200],
    "d": [200000, 0, 120000]
}"#;

const SINGULAR_JSON: &str = r#"{"a": [0, 1], "b": [1, 0], "c": [0, 1], "d": [1, 1]}"#;

// =============================================================================
// SOLVE
// =============================================================================

#[test]
fn solve_inline_reference_values() {
    let dir = TempDir::new().unwrap();
    tdma(&dir)
        .args([
            "--format", "minimal", "solve", "--a", "300,200,300", "--b", "200,200,0", "--c",
            "0,200,200", "--d", "200000,0,120000",
        ])
        .assert()
        .success()
        .stdout("-1466.666667\n-3200.000000\n-1733.333333\n");
}

#[test]
fn solve_file_json_report() {
    let dir = TempDir::new().unwrap();
    let rod = write(dir.path(), "rod.json", ROD_JSON);

    let output = tdma(&dir)
        .args(["--format", "json", "solve"])
        .arg(&rod)
        .args(["--verify", "--cross-check"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let solution: Vec<f64> = report["solution"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_f64().unwrap())
        .collect();
    let expected = [1400.0 / 3.0, 400.0, 1000.0 / 3.0];
    for (got, want) in solution.iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "{got} != {want}");
    }
    assert_eq!(report["n"], 3);
    assert_eq!(report["diagonally_dominant"], true);
    assert!(report["dense_max_difference"].as_f64().unwrap() < 1e-12);
}

#[test]
fn solve_table_output_has_summary() {
    let dir = TempDir::new().unwrap();
    let rod = write(dir.path(), "rod.csv", "a,b,c,d\n600,200,0,200000\n400,200,200,0\n600,0,200,120000\n");

    tdma(&dir)
        .arg("solve")
        .arg(&rod)
        .assert()
        .success()
        .stdout(predicate::str::contains("Solution"))
        .stdout(predicate::str::contains("400.000000"))
        .stdout(predicate::str::contains("Max relative residual"));
}

#[test]
fn solve_length_mismatch_fails() {
    let dir = TempDir::new().unwrap();
    tdma(&dir)
        .args(["solve", "--a", "1,1", "--b", "0,0", "--c", "0,0", "--d", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Dimension mismatch"));
}

#[test]
fn solve_zero_pivot_fails() {
    let dir = TempDir::new().unwrap();
    tdma(&dir)
        .args(["solve", "--a", "0", "--b", "0", "--c", "0", "--d", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Singular system"));
}

#[test]
fn solve_without_input_fails() {
    let dir = TempDir::new().unwrap();
    tdma(&dir)
        .arg("solve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required argument"));
}

#[test]
fn solve_rejects_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "rod.dat", ROD_JSON);
    tdma(&dir)
        .arg("solve")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported input format"));
}

// =============================================================================
// RESIDUAL
// =============================================================================

#[test]
fn residual_check_accepts_exact_solution() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "diag.toml", "a = [2.0, 4.0]\nb = [0.0, 0.0]\nc = [0.0, 0.0]\nd = [2.0, 8.0]\n");

    tdma(&dir)
        .args(["--format", "minimal", "residual"])
        .arg(&path)
        .args(["--solution", "1,2", "--check"])
        .assert()
        .success()
        .stdout("0.000e0\n0.000e0\n");
}

#[test]
fn residual_check_rejects_wrong_solution() {
    let dir = TempDir::new().unwrap();
    let rod = write(dir.path(), "rod.json", ROD_JSON);

    tdma(&dir)
        .arg("residual")
        .arg(&rod)
        .args(["--solution", "500,400,300", "--check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds tolerance"));
}

// =============================================================================
// BATCH
// =============================================================================

#[test]
fn batch_solves_every_file() {
    let dir = TempDir::new().unwrap();
    let rod = write(dir.path(), "rod.json", ROD_JSON);
    let diag = write(dir.path(), "diag.toml", "a = [1.0]\nb = [0.0]\nc = [0.0]\nd = [5.0]\n");

    tdma(&dir)
        .args(["--format", "minimal", "batch"])
        .arg(&rod)
        .arg(&diag)
        .assert()
        .success()
        .stdout(predicate::str::contains("rod.json ok"))
        .stdout(predicate::str::contains("diag.toml ok"));
}

#[test]
fn batch_reports_failures_per_file() {
    let dir = TempDir::new().unwrap();
    let rod = write(dir.path(), "rod.json", ROD_JSON);
    let bad = write(dir.path(), "bad.json", SINGULAR_JSON);

    tdma(&dir)
        .args(["--format", "csv", "batch"])
        .arg(&rod)
        .arg(&bad)
        .assert()
        .failure()
        .stdout(predicate::str::contains("ok"))
        .stdout(predicate::str::contains("Singular system"));
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn config_set_then_get() {
    let dir = TempDir::new().unwrap();

    tdma(&dir)
        .args(["config", "set", "precision", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set precision = 2"));

    tdma(&dir)
        .args(["--format", "minimal", "config", "get", "precision"])
        .assert()
        .success()
        .stdout("2\n");

    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn configured_precision_applies_to_solve() {
    let dir = TempDir::new().unwrap();
    tdma(&dir)
        .args(["config", "set", "precision", "1"])
        .assert()
        .success();

    tdma(&dir)
        .args(["--format", "minimal", "solve", "--a", "4", "--b", "0", "--c", "0", "--d", "2"])
        .assert()
        .success()
        .stdout("0.5\n");
}

#[test]
fn config_rejects_bad_values() {
    let dir = TempDir::new().unwrap();
    tdma(&dir)
        .args(["config", "set", "epsilon", "-1"])
        .assert()
        .failure();
    tdma(&dir)
        .args(["config", "get", "currency"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn config_path_honours_override() {
    let dir = TempDir::new().unwrap();
    tdma(&dir)
        .args(["--format", "minimal", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
