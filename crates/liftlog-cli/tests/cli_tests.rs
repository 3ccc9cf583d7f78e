use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Command with plain output and a store inside `dir`.
fn liftlog_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("liftlog").expect("Failed to find liftlog binary");
    cmd.arg("--no-color")
        .arg("--data-dir")
        .arg(dir.join("store"))
        .args(["--base-delay-ms", "1", "--max-delay-ms", "5"]);
    cmd
}

fn write_plan(dir: &Path, id: &str, name: &str, user_id: &str) -> String {
    let plan = serde_json::json!({
        "id": id,
        "name": name,
        "description": "Three full-body sessions a week",
        "userId": user_id,
        "createdAt": "2024-03-01T08:00:00Z",
        "updatedAt": "2024-03-01T08:00:00Z",
        "difficulty": "beginner",
        "type": "strength",
        "tags": ["barbell"],
        "days": [{
            "dayNumber": 1,
            "name": "Day A",
            "exercises": [{ "exerciseId": "squat", "name": "Squat", "sets": 3, "reps": 5 }]
        }]
    });
    let path = dir.join(format!("{id}.json"));
    std::fs::write(&path, plan.to_string()).expect("Failed to write plan file");
    path.to_str().unwrap().to_string()
}

#[test]
fn test_cli_list_empty_plans() {
    let temp_dir = create_cli_test_environment();

    liftlog_cmd(temp_dir.path())
        .args(["plan", "list", "u1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));
}

#[test]
fn test_cli_save_show_and_remove_plan() {
    let temp_dir = create_cli_test_environment();
    let dir = temp_dir.path();
    let file = write_plan(dir, "p1", "Starting Strength", "u1");

    liftlog_cmd(dir)
        .args(["plan", "save", "u1", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved new plan p1"));

    liftlog_cmd(dir)
        .args(["plan", "save", "u1", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated plan p1"));

    liftlog_cmd(dir)
        .args(["plan", "show", "u1", "p1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Starting Strength (p1)"))
        .stdout(predicate::str::contains("- **Squat**: 3x5"));

    liftlog_cmd(dir)
        .args(["plan", "list", "u1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Starting Strength (ID: p1)"));

    liftlog_cmd(dir)
        .args(["plan", "remove", "u1", "p1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed plan p1"));

    liftlog_cmd(dir)
        .args(["plan", "remove", "u1", "p1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plan with ID p1 to remove"));
}

#[test]
fn test_cli_show_missing_plan_fails() {
    let temp_dir = create_cli_test_environment();

    liftlog_cmd(temp_dir.path())
        .args(["plan", "show", "u1", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plan nope not found"));
}

#[test]
fn test_cli_save_rejects_foreign_plan() {
    let temp_dir = create_cli_test_environment();
    let file = write_plan(temp_dir.path(), "p1", "Theirs", "u2");

    liftlog_cmd(temp_dir.path())
        .args(["plan", "save", "u1", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("userId"));
}

#[test]
fn test_cli_search_and_stats() {
    let temp_dir = create_cli_test_environment();
    let dir = temp_dir.path();
    let file = write_plan(dir, "p1", "Starting Strength", "u1");
    liftlog_cmd(dir)
        .args(["plan", "save", "u1", &file])
        .assert()
        .success();

    liftlog_cmd(dir)
        .args(["plan", "search", "u1", "--difficulty", "beginner", "--tag", "BARBELL"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting Strength"));

    liftlog_cmd(dir)
        .args(["plan", "search", "u1", "--type", "cardio"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));

    liftlog_cmd(dir)
        .args(["plan", "stats", "u1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Plans: 1"))
        .stdout(predicate::str::contains("| strength | 1 |"));
}

#[test]
fn test_cli_storage_scan_reports_corruption() {
    let temp_dir = create_cli_test_environment();
    let dir = temp_dir.path();
    let file = write_plan(dir, "p1", "Fine", "u1");
    liftlog_cmd(dir)
        .args(["plan", "save", "u1", &file])
        .assert()
        .success();
    std::fs::write(dir.join("store").join("plans%3Au2.json"), "{broken").unwrap();

    liftlog_cmd(dir)
        .args(["storage", "scan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scanned 2 collection(s) of 2 user(s)"))
        .stdout(predicate::str::contains("u2: corrupted plans data"));

    liftlog_cmd(dir)
        .args(["storage", "report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Storage report"))
        .stdout(predicate::str::contains("plans:u1"));
}

#[test]
fn test_cli_clear_all_requires_confirmation() {
    let temp_dir = create_cli_test_environment();
    let dir = temp_dir.path();
    let file = write_plan(dir, "p1", "Keep me", "u1");
    liftlog_cmd(dir)
        .args(["plan", "save", "u1", &file])
        .assert()
        .success();

    liftlog_cmd(dir)
        .args(["storage", "clear-all"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("--confirm"));

    liftlog_cmd(dir)
        .args(["plan", "list", "u1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Keep me"));

    liftlog_cmd(dir)
        .args(["storage", "clear-all", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 key(s)"));

    liftlog_cmd(dir)
        .args(["storage", "usage"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 key(s)"));
}

#[test]
fn test_cli_rejects_invalid_retry_options() {
    let temp_dir = create_cli_test_environment();

    liftlog_cmd(temp_dir.path())
        .args(["--backoff-factor", "0.5", "plan", "list", "u1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("backoff factor"));
}
