//! Integration tests for the archsec CLI
//!
//! These drive the built binary on diagram files written to a temp
//! directory. Nothing here reaches a language model.

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DIAGRAM: &str = "@startdiagram
aws-ec2 web -> aws-rds db
aws-ec2 web --> aws-s3 assets
@enddiagram
";

const CORRECTED: &str = "@startdiagram
aws-cloudfront cdn -> aws-ec2 web
aws-ec2 web -> aws-rds db
aws-ec2 web --> aws-s3 assets
@enddiagram
";

/// Helper function to create an archsec command isolated from user config
fn archsec(dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("archsec"));
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("NO_COLOR", "1")
        .env_remove("OPENAI_API_KEY")
        .env_remove("ARCHSEC_RULES")
        .env_remove("RUST_LOG");
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// VALIDATE
// =============================================================================

#[test]
fn validate_accepts_well_formed_diagram() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "app.diagram", DIAGRAM);

    archsec(temp.path())
        .args(["validate", "app.diagram"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid diagram: 2 connection(s), 3 service(s)"));
}

#[test]
fn validate_rejects_missing_end_marker() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "broken.diagram",
        "@startdiagram\naws-ec2 web -> aws-rds db\naws-ec2 web -> aws-s3 b\n",
    );

    archsec(temp.path())
        .args(["validate", "broken.diagram"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("last line must start with @enddiagram"));
}

#[test]
fn validate_reads_stdin() {
    let temp = TempDir::new().unwrap();

    archsec(temp.path())
        .args(["--json", "validate", "-"])
        .write_stdin(DIAGRAM)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": true"))
        .stdout(predicate::str::contains("\"success\": true"));
}

#[test]
fn validate_flags_services_outside_catalog() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "odd.diagram",
        "@startdiagram\naws-ec2 web -> oracle-db db\n@enddiagram\n",
    );

    archsec(temp.path())
        .args(["validate", "odd.diagram"])
        .assert()
        .success()
        .stdout(predicate::str::contains("oracle-db (not in catalog)"));
}

#[test]
fn validate_missing_file_fails() {
    let temp = TempDir::new().unwrap();

    archsec(temp.path())
        .args(["validate", "nope.diagram"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.diagram"));
}

// =============================================================================
// DIFF
// =============================================================================

#[test]
fn diff_lists_changes() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "before.diagram", DIAGRAM);
    write(temp.path(), "after.diagram", CORRECTED);

    archsec(temp.path())
        .args(["diff", "before.diagram", "after.diagram"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Added connection: aws-cloudfront cdn -> aws-ec2 web",
        ))
        .stdout(predicate::str::contains("Added service: aws-cloudfront"));
}

#[test]
fn diff_json_output() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "before.diagram", DIAGRAM);
    write(temp.path(), "after.diagram", CORRECTED);

    let output = archsec(temp.path())
        .args(["--json", "diff", "before.diagram", "after.diagram"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["changes"][0]["type"], "added");
    assert_eq!(json["data"]["changes"][1]["type"], "service_added");
}

#[test]
fn diff_rejects_malformed_input() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "before.diagram", DIAGRAM);
    write(temp.path(), "after.diagram", "aws-ec2 web -> aws-rds db\n");

    archsec(temp.path())
        .args(["--json", "diff", "before.diagram", "after.diagram"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("BAD_REQUEST"));
}

// =============================================================================
// CATALOG, RULES AND CONFIG
// =============================================================================

#[test]
fn services_lists_catalog() {
    let temp = TempDir::new().unwrap();

    archsec(temp.path())
        .arg("services")
        .assert()
        .success()
        .stdout(predicate::str::contains("aws-ec2"))
        .stdout(predicate::str::contains("gcp-pubsub"));
}

#[test]
fn services_follow_local_config() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "archsec.toml",
        "[[services]]\nid = \"oci-compute\"\nname = \"Compute\"\ncategory = \"Compute\"\nprovider = \"OCI\"\n",
    );

    archsec(temp.path())
        .arg("services")
        .assert()
        .success()
        .stdout(predicate::str::contains("oci-compute"))
        .stdout(predicate::str::contains("aws-ec2").not());
}

#[test]
fn rules_by_service() {
    let temp = TempDir::new().unwrap();

    archsec(temp.path())
        .args(["rules", "--service", "aws-rds"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RDS Encryption at Rest"));
}

#[test]
fn rules_unknown_service_fails() {
    let temp = TempDir::new().unwrap();

    archsec(temp.path())
        .args(["rules", "--service", "oracle-db"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Service 'oracle-db' not found"));
}

#[test]
fn rules_query_uses_configured_limit() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "archsec.toml", "[rules]\ngeneral_query_limit = 2\n");

    let output = archsec(temp.path())
        .args(["--json", "rules", "--query", "encryption"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["data"]["rules"].as_array().unwrap().len(), 2);
}

#[test]
fn explicit_missing_config_fails() {
    let temp = TempDir::new().unwrap();

    archsec(temp.path())
        .args(["--config", "missing.toml", "services"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.toml"));
}

// =============================================================================
// MISC
// =============================================================================

#[test]
fn version_command() {
    let temp = TempDir::new().unwrap();

    archsec(temp.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("archsec v{}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn analyze_rejects_malformed_diagram() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "bad.diagram", "@startdiagram\n@enddiagram\n");

    archsec(temp.path())
        .args(["--json", "analyze", "bad.diagram", "--no-verify"])
        .env("ARCHSEC_BASE_URL", "http://127.0.0.1:9")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid diagram format"));
}
