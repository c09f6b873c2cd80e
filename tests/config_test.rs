//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Merge Semantics:
//! - Defaults → Global: REPLACE (global defines the real baseline)
//! - Global → Local: UNION with negation support
//! - Any → Env vars: REPLACE (explicit user override)
//!
//! The environment layer is injected so these tests do not depend on, or
//! modify, the process environment.

use std::collections::HashMap;
use std::fs;

use tempfile::TempDir;

use xsheel::application::ApplicationError;
use xsheel::config::{DiscoverySettings, Settings, DEFAULT_DENYLIST};

fn no_env() -> Option<HashMap<String, String>> {
    Some(HashMap::new())
}

fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
    Some(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

#[test]
fn given_no_config_when_load_then_defaults() {
    let root = TempDir::new().unwrap();

    let settings = Settings::load_with(root.path(), None, no_env()).expect("load settings");

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.discovery.scripts_dir, "scripts");
    assert_eq!(settings.discovery.root_excludes, vec!["bin", "tools"]);
    for name in DEFAULT_DENYLIST {
        assert!(settings.discovery.denylist.iter().any(|d| d == name));
    }
    assert_eq!(settings.manifest.file, "package.json");
    assert_eq!(settings.manifest.field, "bin");
}

#[test]
fn given_local_config_when_load_then_arrays_union_with_negation() {
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join(".xsheel.toml"),
        r#"
[discovery]
denylist = ["Makefile", "!AGENTS.md"]
"#,
    )
    .unwrap();

    let settings = Settings::load_with(root.path(), None, no_env()).expect("load settings");

    let denylist = &settings.discovery.denylist;
    assert!(denylist.contains(&"Makefile".to_string()));
    assert!(denylist.contains(&"README.md".to_string()));
    assert!(!denylist.contains(&"AGENTS.md".to_string()));
}

#[test]
fn given_global_config_when_load_then_arrays_replace_defaults() {
    let root = TempDir::new().unwrap();
    let global_dir = TempDir::new().unwrap();
    let global = global_dir.path().join("xsheel.toml");
    fs::write(
        &global,
        r#"
[discovery]
denylist = ["Cargo.toml"]

[manifest]
command_name = "launch"
"#,
    )
    .unwrap();

    let settings = Settings::load_with(root.path(), Some(global.as_path()), no_env()).expect("load");

    assert_eq!(settings.discovery.denylist, vec!["Cargo.toml"]);
    assert_eq!(settings.manifest.command_name, "launch");
    assert_eq!(settings.manifest.command_path, "bin/xsheel");
}

#[test]
fn given_global_and_local_config_when_load_then_local_unions_with_global() {
    let root = TempDir::new().unwrap();
    let global_dir = TempDir::new().unwrap();
    let global = global_dir.path().join("xsheel.toml");
    fs::write(&global, "[discovery]\ndenylist = [\"Cargo.toml\"]\n").unwrap();
    fs::write(
        root.path().join(".xsheel.toml"),
        "[discovery]\ndenylist = [\"Cargo.lock\"]\nscripts_dir = \"tasks\"\n",
    )
    .unwrap();

    let settings = Settings::load_with(root.path(), Some(global.as_path()), no_env()).expect("load");

    assert_eq!(settings.discovery.denylist, vec!["Cargo.lock", "Cargo.toml"]);
    assert_eq!(settings.discovery.scripts_dir, "tasks");
}

#[test]
fn given_missing_global_path_when_load_then_ignored() {
    let root = TempDir::new().unwrap();
    let global_dir = TempDir::new().unwrap();
    let global = global_dir.path().join("absent.toml");

    let settings = Settings::load_with(root.path(), Some(global.as_path()), no_env()).expect("load");

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_env_overrides_when_load_then_replace_all_layers() {
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join(".xsheel.toml"),
        "[discovery]\ndenylist = [\"Makefile\"]\n",
    )
    .unwrap();

    let settings = Settings::load_with(
        root.path(),
        None,
        env(&[
            ("XSHEEL_DISCOVERY__DENYLIST", "a.txt,b.txt"),
            ("XSHEEL_DISCOVERY__SCRIPTS_DIR", "tasks"),
            ("XSHEEL_MANIFEST__COMMAND_NAME", "tool"),
        ]),
    )
    .expect("load settings");

    assert_eq!(settings.discovery.denylist, vec!["a.txt", "b.txt"]);
    assert_eq!(settings.discovery.scripts_dir, "tasks");
    assert_eq!(settings.manifest.command_name, "tool");
    assert_eq!(settings.discovery.root_excludes, vec!["bin", "tools"]);
}

#[test]
fn given_malformed_local_config_when_load_then_config_error() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join(".xsheel.toml"), "[discovery\nbroken").unwrap();

    let err = Settings::load_with(root.path(), None, no_env()).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains(".xsheel.toml"));
}

#[test]
fn given_merge_array_with_negation_when_merging_then_sorted_union() {
    let base = vec!["a".to_string(), "b".to_string()];
    let overlay = vec!["!a".to_string(), "c".to_string(), "b".to_string()];

    assert_eq!(
        DiscoverySettings::merge_array(&base, &overlay),
        vec!["b", "c"]
    );
}
