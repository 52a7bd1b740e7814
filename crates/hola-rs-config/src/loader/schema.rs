//! Schema checks for `hola.json5` layers.
//!
//! Serde would silently ignore unknown keys; these checks reject them and
//! report mistyped values with a `layer:path` location.

use crate::ConfigError;
use serde_json::{Map, Value};

/// Validate a single layer (or the merged result) against the schema.
pub(super) fn validate_layer_schema(value: &Value, layer: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, "")?;
    ensure_allowed_keys(map, &["$schema", "board", "ui"], layer, "")?;

    if let Some(value) = map.get("$schema") {
        expect_string(value, layer, "$schema")?;
    }
    if let Some(value) = map.get("board") {
        validate_board(value, layer, "board")?;
    }
    if let Some(value) = map.get("ui") {
        validate_ui(value, layer, "ui")?;
    }
    Ok(())
}

/// Validate the "board" block.
fn validate_board(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(map, &["submit_delay_ms", "seed", "time_format"], layer, path)?;
    if let Some(value) = map.get("submit_delay_ms") {
        expect_u64(value, layer, &join_path(path, "submit_delay_ms"))?;
    }
    if let Some(value) = map.get("seed") {
        expect_bool(value, layer, &join_path(path, "seed"))?;
    }
    if let Some(value) = map.get("time_format") {
        expect_string(value, layer, &join_path(path, "time_format"))?;
    }
    Ok(())
}

/// Validate the "ui" block.
fn validate_ui(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(map, &["title", "author", "tick_ms"], layer, path)?;
    if let Some(value) = map.get("title") {
        expect_string(value, layer, &join_path(path, "title"))?;
    }
    if let Some(value) = map.get("author")
        && !value.is_null()
    {
        expect_string(value, layer, &join_path(path, "author"))?;
    }
    if let Some(value) = map.get("tick_ms") {
        expect_u64(value, layer, &join_path(path, "tick_ms"))?;
    }
    Ok(())
}

fn expect_object<'a>(
    value: &'a Value,
    layer: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, ConfigError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(invalid_field(layer, path, "expected object")),
    }
}

fn expect_string(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    match value {
        Value::String(_) => Ok(()),
        _ => Err(invalid_field(layer, path, "expected string")),
    }
}

fn expect_bool(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    match value {
        Value::Bool(_) => Ok(()),
        _ => Err(invalid_field(layer, path, "expected bool")),
    }
}

/// Only non-negative integers pass.
fn expect_u64(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_u64() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected non-negative integer"))
    }
}

fn ensure_allowed_keys(
    map: &Map<String, Value>,
    allowed: &[&str],
    layer: &str,
    path: &str,
) -> Result<(), ConfigError> {
    match map.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(invalid_field(layer, &join_path(path, key), "unknown key")),
        None => Ok(()),
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn invalid_field(layer: &str, path: &str, message: &str) -> ConfigError {
    let path = if path.is_empty() { "root" } else { path };
    ConfigError::InvalidField {
        path: format!("{layer}:{path}"),
        message: message.to_string(),
    }
}
