//! Tests for layered configuration loading.

use super::*;
use crate::{DEFAULT_SUBMIT_DELAY_MS, DEFAULT_TICK_MS};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write JSON5 contents to a path, creating parent directories if needed.
fn write_json5(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("dir");
    }
    fs::write(path, contents).expect("write");
}

/// Options that never touch the real home directory.
fn isolated_options(cwd: &Path) -> LayeredConfigOptions {
    let mut options = LayeredConfigOptions::new(cwd);
    options.user_config_path = None;
    options
}

#[test]
fn empty_config_uses_defaults() {
    let config = HolaConfig::load_from_str("{}").expect("config");
    assert_eq!(config.board.submit_delay_ms, DEFAULT_SUBMIT_DELAY_MS);
    assert!(config.board.seed);
    assert_eq!(config.board.time_format, "%H:%M");
    assert_eq!(config.ui.tick_ms, DEFAULT_TICK_MS);
    assert_eq!(config.ui.author, None);
}

#[test]
fn parses_json5_syntax() {
    let json5 = r#"
    {
      // comments and trailing commas are fine
      board: { submit_delay_ms: 250, seed: false, },
      ui: { author: 'Ana', },
    }"#;
    let config = HolaConfig::load_from_str(json5).expect("config");
    assert_eq!(config.board.submit_delay_ms, 250);
    assert!(!config.board.seed);
    assert_eq!(config.ui.author.as_deref(), Some("Ana"));
}

#[test]
fn rejects_unknown_key() {
    let err = HolaConfig::load_from_str("{ board: { persist: true } }").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("board.persist"), "{msg}");
    assert!(msg.contains("unknown key"), "{msg}");
}

#[test]
fn rejects_mistyped_value() {
    let err = HolaConfig::load_from_str("{ board: { seed: 'yes' } }").unwrap_err();
    assert!(err.to_string().contains("expected bool"));

    let err = HolaConfig::load_from_str("{ board: { submit_delay_ms: -1 } }").unwrap_err();
    assert!(err.to_string().contains("board.submit_delay_ms"));
}

#[test]
fn rejects_out_of_range_values() {
    let err = HolaConfig::load_from_str("{ board: { submit_delay_ms: 600000 } }").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidField { .. }));

    let err = HolaConfig::load_from_str("{ ui: { tick_ms: 0 } }").unwrap_err();
    match err {
        ConfigError::InvalidField { path, .. } => assert_eq!(path, "ui.tick_ms"),
        other => panic!("unexpected error: {other}"),
    }

    let err = HolaConfig::load_from_str("{ board: { time_format: '%Q' } }").unwrap_err();
    assert!(err.to_string().contains("time_format"));
}

#[test]
fn rejects_parse_only_time_format() {
    let err = HolaConfig::load_from_str("{ board: { time_format: '%#z' } }").unwrap_err();
    match err {
        ConfigError::InvalidField { path, message } => {
            assert_eq!(path, "board.time_format");
            assert!(message.contains("format"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }

    let config = HolaConfig::load_from_str("{ board: { time_format: '%I:%M %p' } }")
        .expect("formattable time format");
    assert_eq!(config.board.time_format, "%I:%M %p");
}

#[test]
fn layered_runtime_overrides_cwd_overrides_user() {
    let temp = TempDir::new().expect("tmp");
    let root = temp.path();
    let cwd = root.join("work");
    fs::create_dir_all(&cwd).expect("cwd");

    let user = root.join("home").join(".hola").join("hola.json5");
    write_json5(&user, "{ ui: { title: 'user', author: 'Ana' }, board: { seed: false } }");
    write_json5(&cwd.join(DEFAULT_CONFIG_FILE), "{ ui: { title: 'cwd' } }");
    let runtime = root.join("runtime.json5");
    write_json5(&runtime, "{ board: { submit_delay_ms: 10 } }");

    let mut options = LayeredConfigOptions::new(&cwd).with_runtime_path(&runtime);
    options.user_config_path = Some(user.clone());

    let layered = HolaConfig::load_layered_with_options(options).expect("layered");
    assert_eq!(layered.config.ui.title, "cwd");
    assert_eq!(layered.config.ui.author.as_deref(), Some("Ana"));
    assert!(!layered.config.board.seed);
    assert_eq!(layered.config.board.submit_delay_ms, 10);

    let sources: Vec<_> = layered.layers.iter().map(|layer| layer.source).collect();
    assert_eq!(
        sources,
        vec![
            ConfigLayerSource::User,
            ConfigLayerSource::Cwd,
            ConfigLayerSource::Runtime
        ]
    );
}

#[test]
fn missing_optional_layers_are_skipped() {
    let temp = TempDir::new().expect("tmp");
    let layered =
        HolaConfig::load_layered_with_options(isolated_options(temp.path())).expect("layered");
    assert!(layered.layers.is_empty());
    assert_eq!(layered.config, HolaConfig::default());
}

#[test]
fn missing_runtime_layer_is_an_error() {
    let temp = TempDir::new().expect("tmp");
    let options = isolated_options(temp.path()).with_runtime_path(temp.path().join("nope.json5"));
    let err = HolaConfig::load_layered_with_options(options).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFailed(_)));
}

#[test]
fn duplicate_layer_paths_load_once() {
    let temp = TempDir::new().expect("tmp");
    let cwd_config = temp.path().join(DEFAULT_CONFIG_FILE);
    write_json5(&cwd_config, "{ ui: { title: 'once' } }");
    let options = isolated_options(temp.path()).with_runtime_path(&cwd_config);

    let layered = HolaConfig::load_layered_with_options(options).expect("layered");
    assert_eq!(layered.layers.len(), 1);
    assert_eq!(layered.config.ui.title, "once");
}

#[test]
fn schema_errors_name_the_layer() {
    let temp = TempDir::new().expect("tmp");
    write_json5(
        &temp.path().join(DEFAULT_CONFIG_FILE),
        "{ ui: { tick_ms: 'fast' } }",
    );
    let err = HolaConfig::load_layered_with_options(isolated_options(temp.path())).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("cwd("), "{msg}");
    assert!(msg.contains("ui.tick_ms"), "{msg}");
}
