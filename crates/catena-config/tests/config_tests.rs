// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Catena configuration system.

use std::io::Write;
use std::time::Duration;

use catena_config::diagnostic::ConfigError;
use catena_config::model::CatenaConfig;
use catena_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};
use serial_test::serial;

#[test]
fn valid_toml_deserializes_into_catena_config() {
    let toml = r#"
[engine]
task_timeout_ms = 250

[log]
level = "debug"

[plugins]
disabled = ["sha1", "gz"]
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.engine.task_timeout(), Duration::from_millis(250));
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.plugins.disabled, vec!["sha1", "gz"]);
}

#[test]
fn empty_toml_yields_defaults() {
    let config = load_and_validate_str("").expect("defaults are valid");
    assert_eq!(config, CatenaConfig::default());
    assert_eq!(config.engine.task_timeout_ms, 30_000);
    assert_eq!(config.log.level, "info");
    assert!(config.plugins.disabled.is_empty());
}

#[test]
fn unknown_key_is_reported_with_suggestion() {
    let toml = "[engine]\ntask_timout_ms = 10\n";
    let errors = load_and_validate_str(toml).expect_err("unknown key must fail");

    match &errors[0] {
        ConfigError::UnknownKey {
            key,
            suggestion,
            span,
            ..
        } => {
            assert_eq!(key, "task_timout_ms");
            assert_eq!(suggestion.as_deref(), Some("task_timeout_ms"));
            assert!(span.is_some(), "inline source should yield a span");
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_section_is_rejected() {
    let errors = load_and_validate_str("[engin]\ntask_timeout_ms = 1\n").unwrap_err();
    assert!(matches!(
        &errors[0],
        ConfigError::UnknownKey { suggestion: Some(s), .. } if s == "engine"
    ));
}

#[test]
fn wrong_type_is_reported() {
    let errors = load_and_validate_str("[engine]\ntask_timeout_ms = \"soon\"\n").unwrap_err();
    assert!(
        matches!(&errors[0], ConfigError::InvalidType { key, .. } if key.contains("task_timeout_ms")),
        "got {:?}",
        errors
    );
}

#[test]
fn validation_errors_are_collected() {
    let toml = r#"
[engine]
task_timeout_ms = 0

[log]
level = "chatty"
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|e| matches!(e, ConfigError::Validation { .. })));
}

#[test]
#[serial]
fn explicit_path_is_loaded() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[log]\nlevel = \"warn\"").unwrap();

    let config = load_and_validate_path(file.path()).expect("file should load");
    assert_eq!(config.log.level, "warn");
}

#[test]
#[serial]
fn env_overrides_file_values() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[engine]\ntask_timeout_ms = 100").unwrap();

    figment::Jail::expect_with(|jail| {
        jail.set_env("CATENA_ENGINE_TASK_TIMEOUT_MS", "900");
        let config = load_and_validate_path(file.path()).expect("file should load");
        assert_eq!(config.engine.task_timeout_ms, 900);
        Ok(())
    });
}

#[test]
fn missing_explicit_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catena.tmol");

    let errors = load_and_validate_path(&path).expect_err("missing file must not load defaults");
    assert_eq!(errors.len(), 1);
    assert!(matches!(&errors[0], ConfigError::MissingFile { path: p } if *p == path));
}
