//! Tests for settings loading

use std::fs;
use std::path::PathBuf;

use archsec::config::{ENV_MODEL, Settings};
use serial_test::serial;
use tempfile::TempDir;

#[test]
#[serial(env)]
fn explicit_config_file_is_used() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(
        &path,
        r#"
[llm]
base_url = "http://localhost:11434/v1"
max_tokens = 1000

[rules]
general_query_limit = 5

[[services]]
id = "aws-ec2"
name = "EC2"
category = "Compute"
provider = "AWS"
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(&path), dir.path()).unwrap();
    assert_eq!(settings.llm.max_tokens, 1000);
    assert_eq!(settings.rules.general_query_limit, 5);
    assert_eq!(settings.analysis_options().general_query_limit, 5);
    assert_eq!(settings.services.len(), 1);
    assert!(settings.services.contains("aws-ec2"));
}

#[test]
#[serial(env)]
fn missing_explicit_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = Settings::load(Some(&dir.path().join("absent.toml")), dir.path()).unwrap_err();
    assert!(format!("{err:#}").contains("absent.toml"));
}

#[test]
#[serial(env)]
fn local_config_is_discovered() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("archsec.toml"), "[scoring]\nlow = 1\n").unwrap();

    let settings = Settings::load(None, dir.path()).unwrap();
    assert_eq!(settings.scoring.low, 1);
    assert_eq!(settings.scoring.critical, 25);
}

#[test]
#[serial(env)]
fn invalid_config_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("archsec.toml");
    fs::write(&path, "[llm\nmodel = ").unwrap();

    let err = Settings::load(None, dir.path()).unwrap_err();
    assert!(format!("{err:#}").contains("archsec.toml"));
}

#[test]
#[serial(env)]
fn environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("archsec.toml"), "[llm]\nmodel = \"from-file\"\n").unwrap();

    // SAFETY: serialized with every other test touching the environment
    unsafe { std::env::set_var(ENV_MODEL, "from-env") };
    let settings = Settings::load(None, dir.path());
    unsafe { std::env::remove_var(ENV_MODEL) };

    assert_eq!(settings.unwrap().llm.model, "from-env");
}

#[test]
fn rule_store_follows_rules_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.toml");
    fs::write(
        &path,
        "[[rules]]\nid = \"own-1\"\ntitle = \"Own\"\ndescription = \"Custom rule\"\n",
    )
    .unwrap();

    let mut settings = Settings::default();
    assert_eq!(settings.rule_store().unwrap().rules().len(), 36);

    settings.rules.path = Some(path);
    let store = settings.rule_store().unwrap();
    assert_eq!(store.rules().len(), 1);
    assert_eq!(store.rules()[0].id, "own-1");

    settings.rules.path = Some(PathBuf::from("/nonexistent/rules.toml"));
    assert!(settings.rule_store().is_err());
}
