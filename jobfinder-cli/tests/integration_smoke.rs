//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn jobfinder() -> Command {
    let mut cmd = Command::cargo_bin("jobfinder").unwrap();
    // Keep the developer's environment out of the run
    cmd.env_remove("DATABASE_PATH")
        .env_remove("JOBFINDER_CONFIG")
        .env_remove("PORT")
        .env_remove("HOST");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    jobfinder()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("seed"))
        .stdout(predicate::str::contains("scrape"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_serve_help() {
    jobfinder()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--static-dir"))
        .stdout(predicate::str::contains("--db-path"));
}

#[test]
fn test_seed_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("nested").join("jobs.db");

    jobfinder()
        .current_dir(dir.path())
        .arg("seed")
        .arg("--db-path")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded 20 sample postings"));

    assert!(db.exists());
}

#[test]
fn test_init_reports_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("jobs.db");

    jobfinder()
        .current_dir(dir.path())
        .args(["seed", "--db-path"])
        .arg(&db)
        .assert()
        .success();

    jobfinder()
        .current_dir(dir.path())
        .args(["init", "--db-path"])
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("(20 postings)"));
}

#[test]
fn test_missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    jobfinder()
        .current_dir(dir.path())
        .args(["--config", "does-not-exist.toml", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_unknown_subcommand() {
    jobfinder().arg("frobnicate").assert().failure();
}
