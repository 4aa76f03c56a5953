//! CLI integration tests for course-audit.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

const MISSING_TOOL: &str = "course-audit-test-missing-tool";

fn course_audit_cmd() -> Command {
    cargo_bin_cmd!("course-audit")
}

fn lesson(root: &Path, rel: &str, captions: usize, lessons: usize) {
    let dir = root.join(rel);
    fs::create_dir_all(&dir).unwrap();
    for i in 0..captions {
        fs::write(dir.join(format!("{i}.vtt")), "WEBVTT\n").unwrap();
    }
    for i in 0..lessons {
        fs::write(dir.join(format!("{i}.md")), "# Lesson\n").unwrap();
    }
}

#[test]
fn test_cli_help() {
    let mut cmd = course_audit_cmd();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("missing captions"));
}

#[test]
fn test_cli_unknown_flag() {
    let mut cmd = course_audit_cmd();
    cmd.arg("--no-such-flag");
    cmd.assert().failure();
}

#[test]
fn test_cli_rejects_bad_threshold() {
    let mut cmd = course_audit_cmd();
    cmd.args(["--min-captions", "many"]);
    cmd.assert().failure();
}

#[test]
fn test_cli_default_course_list() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut cmd = course_audit_cmd();
    cmd.current_dir(tmp.path());
    cmd.args(["--tool", MISSING_TOOL]);
    cmd.assert().success();

    let report = fs::read_to_string(tmp.path().join("audit.txt")).unwrap();
    let headers: Vec<_> = report
        .lines()
        .filter(|l| !l.starts_with("No missing"))
        .collect();
    assert_eq!(
        headers,
        vec![
            "ADVANCED-FOUNDRY",
            "BLOCKCHAIN-BASICS",
            "FOUNDRY",
            "SOLIDITY",
            "UNISWAP-V2",
            "SECURITY",
            "FORMAL-VERIFICATION",
        ]
    );
}

#[test]
fn test_cli_missing_tool_does_not_fail_the_audit() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut cmd = course_audit_cmd();
    cmd.current_dir(tmp.path());
    cmd.args(["--tool", MISSING_TOOL, "solidity"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No missing captions or lessons found."))
        .stdout(predicate::str::contains("\nNo missing descriptions found.\n\n"));

    assert_eq!(
        fs::read_to_string(tmp.path().join("audit.txt")).unwrap(),
        "SOLIDITY\nNo missing captions or lessons found.\n"
    );
}

#[test]
fn test_cli_reports_deficient_lessons() {
    let tmp = tempfile::TempDir::new().unwrap();
    let root = tmp.path();
    lesson(root, "courses/foundry/1-basics/1-intro", 13, 1);
    lesson(root, "courses/foundry/1-basics/2-setup", 12, 0);
    fs::write(root.join("foundry.txt"), "Lesson 3 missing description\n").unwrap();

    let mut cmd = course_audit_cmd();
    cmd.current_dir(root);
    cmd.args(["--skip-sync", "foundry"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "courses/foundry/1-basics/2-setup Captions: 12",
        ))
        .stdout(predicate::str::contains("Lesson 3 missing description"));

    let report = fs::read_to_string(root.join("audit.txt")).unwrap();
    assert_eq!(
        report,
        "FOUNDRY\n\
         courses/foundry/1-basics/2-setup Captions: 12\n\
         courses/foundry/1-basics/2-setup Lessons: 0\n\
         \nMISSING DESCRIPTIONS:\nLesson 3 missing description\n\n\n"
    );
}

#[test]
fn test_cli_custom_layout_and_thresholds() {
    let tmp = tempfile::TempDir::new().unwrap();
    let root = tmp.path();
    lesson(root, "content/security/lesson-1", 1, 1);

    let mut cmd = course_audit_cmd();
    cmd.current_dir(root);
    cmd.args([
        "--skip-sync",
        "--courses-dir",
        "content",
        "--report",
        "out/report.txt",
        "--lesson-depth",
        "1",
        "--min-captions",
        "2",
        "security",
    ]);
    cmd.assert().success();

    let report = fs::read_to_string(root.join("out/report.txt")).unwrap();
    assert_eq!(report, "SECURITY\ncontent/security/lesson-1 Captions: 1\n");
}

#[test]
fn test_cli_skip_course_on_sync_failure() {
    let tmp = tempfile::TempDir::new().unwrap();
    let root = tmp.path();
    lesson(root, "courses/solidity/1-basics/1-intro", 0, 0);

    let mut cmd = course_audit_cmd();
    cmd.current_dir(root);
    cmd.args([
        "--tool",
        MISSING_TOOL,
        "--on-sync-failure",
        "skip-course",
        "solidity",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Sync failed (sync); audit skipped."));

    assert_eq!(
        fs::read_to_string(root.join("audit.txt")).unwrap(),
        "SOLIDITY\nSync failed (sync); audit skipped.\n"
    );
}

#[test]
fn test_cli_appends_across_runs() {
    let tmp = tempfile::TempDir::new().unwrap();
    for _ in 0..2 {
        let mut cmd = course_audit_cmd();
        cmd.current_dir(tmp.path());
        cmd.args(["--skip-sync", "uniswap-v2"]);
        cmd.assert().success();
    }
    assert_eq!(
        fs::read_to_string(tmp.path().join("audit.txt")).unwrap(),
        "UNISWAP-V2\nNo missing captions or lessons found.\n".repeat(2)
    );
}

#[test]
fn test_cli_unwritable_report_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("audit.txt")).unwrap();

    let mut cmd = course_audit_cmd();
    cmd.current_dir(tmp.path());
    cmd.args(["--skip-sync", "solidity"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to open report"));
}

#[test]
fn test_cli_logs_run_summary_to_stderr() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut cmd = course_audit_cmd();
    cmd.current_dir(tmp.path());
    cmd.env_remove("RUST_LOG");
    cmd.args(["--skip-sync", "solidity"]);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("course audited"))
        .stderr(predicate::str::contains("audit complete"))
        .stdout(predicate::str::contains("audit complete").not());
}
