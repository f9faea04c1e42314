//! End-to-end tests for the `rulesets` validator.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

#[allow(deprecated)]
fn repoguard_cmd() -> Command {
    Command::cargo_bin("repoguard").expect("repoguard binary not found")
}

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, contents).expect("write file");
}

const MAIN_PROTECTION: &str = r#"{"name":"main-protection","target":"branch","enforcement":"active","rules":[{"type":"pull_request","parameters":{"required_approving_review_count":1}}]}"#;

#[test]
fn incomplete_main_protection_fails_with_findings() {
    let tmp = TempDir::new().expect("temp dir");
    write_file(
        &tmp.path().join(".github/rulesets/main-protection.json"),
        MAIN_PROTECTION,
    );

    repoguard_cmd()
        .arg("--repo-root")
        .arg(tmp.path())
        .arg("rulesets")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Critical protection missing for main-protection: deletion, non_fast_forward",
        ))
        .stdout(predicate::str::contains(
            "Main branch should require at least 2 approving reviews",
        ))
        .stdout(predicate::str::contains(
            "Branch protection should include status checks",
        ))
        .stdout(predicate::str::contains(
            "WARN main-protection.json: 3 issue(s)",
        ));
}

#[test]
fn empty_rulesets_directory_warns_and_passes() {
    let tmp = TempDir::new().expect("temp dir");
    std::fs::create_dir_all(tmp.path().join(".github/rulesets")).expect("mkdir");

    repoguard_cmd()
        .arg("--repo-root")
        .arg(tmp.path())
        .arg("rulesets")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Warning: no ruleset JSON files found",
        ));
}

#[test]
fn missing_rulesets_directory_fails() {
    let tmp = TempDir::new().expect("temp dir");

    repoguard_cmd()
        .arg("--repo-root")
        .arg(tmp.path())
        .arg("rulesets")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("directory not found"));
}

#[test]
fn invalid_json_is_reported_without_stopping_other_files() {
    let tmp = TempDir::new().expect("temp dir");
    write_file(&tmp.path().join(".github/rulesets/broken.json"), "{ nope");
    write_file(
        &tmp.path().join(".github/rulesets/tags.json"),
        r#"{"name":"version-tags","target":"tag","enforcement":"active","rules":[{"type":"deletion"}]}"#,
    );

    repoguard_cmd()
        .arg("--repo-root")
        .arg(tmp.path())
        .arg("rulesets")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Invalid JSON:"))
        .stdout(predicate::str::contains("Checking tags.json"))
        .stdout(predicate::str::contains("ok   tags.json: 0 issue(s)"));
}

#[test]
fn clean_tag_ruleset_passes() {
    let tmp = TempDir::new().expect("temp dir");
    write_file(
        &tmp.path().join(".github/rulesets/tags.json"),
        r#"{"name":"version-tags","target":"tag","enforcement":"active","rules":[{"type":"deletion"}]}"#,
    );

    repoguard_cmd()
        .arg("--repo-root")
        .arg(tmp.path())
        .arg("rulesets")
        .assert()
        .success()
        .stdout(predicate::str::contains("ok: no issues found"))
        .stdout(predicate::str::contains("Total: 0 issue(s) across 1 file(s)"));
}

#[test]
fn report_artifact_carries_schema_and_verdict() {
    let tmp = TempDir::new().expect("temp dir");
    write_file(
        &tmp.path().join(".github/rulesets/main-protection.json"),
        MAIN_PROTECTION,
    );
    let report_path = tmp.path().join("artifacts/report.json");

    repoguard_cmd()
        .arg("--repo-root")
        .arg(tmp.path())
        .arg("rulesets")
        .arg("--report-out")
        .arg(&report_path)
        .assert()
        .code(1);

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("read report"))
            .expect("parse report");
    assert_eq!(report["schema"], "repoguard.report.v1");
    assert_eq!(report["verdict"], "fail");
    assert_eq!(report["data"]["validator"], "rulesets");
    assert_eq!(report["data"]["documents_scanned"], 1);
    assert!(report["findings"].as_array().is_some_and(|f| !f.is_empty()));
}

#[test]
fn custom_dir_overrides_the_default() {
    let tmp = TempDir::new().expect("temp dir");
    write_file(
        &tmp.path().join("policies/tags.json"),
        r#"{"name":"version-tags","target":"tag","enforcement":"active","rules":[{"type":"deletion"}]}"#,
    );

    repoguard_cmd()
        .arg("--repo-root")
        .arg(tmp.path())
        .arg("rulesets")
        .arg("--dir")
        .arg("policies")
        .assert()
        .success();
}
