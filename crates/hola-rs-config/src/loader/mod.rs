//! Layered configuration loader.
//!
//! Discovers the user, cwd and runtime layers, validates each against the
//! schema, merges them in order and produces the effective `HolaConfig`.

mod layer_io;
mod merge;
mod schema;

#[cfg(test)]
mod tests;

use crate::{ConfigError, HolaConfig, MAX_SUBMIT_DELAY_MS};
use chrono::Local;
use chrono::format::{Item, StrftimeItems};
use log::{debug, info};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Default config filename.
const DEFAULT_CONFIG_FILE: &str = "hola.json5";
/// Default config directory under the home directory.
const DEFAULT_CONFIG_DIR: &str = ".hola";

/// Effective config plus metadata about which layers were loaded.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// The merged, validated config.
    pub config: HolaConfig,
    /// Layers that contributed, lowest precedence first.
    pub layers: Vec<ConfigLayer>,
}

/// Origin of a config layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayerSource {
    /// `~/.hola/hola.json5`.
    User,
    /// `hola.json5` in the working directory.
    Cwd,
    /// Explicit `--config` paths (highest precedence).
    Runtime,
}

/// Metadata about a loaded layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLayer {
    pub source: ConfigLayerSource,
    pub path: PathBuf,
}

/// Options controlling layer discovery.
#[derive(Debug, Clone)]
pub struct LayeredConfigOptions {
    /// Directory searched for the cwd layer.
    pub cwd: PathBuf,
    /// User config path; `None` skips the user layer.
    pub user_config_path: Option<PathBuf>,
    /// Runtime override paths, applied last in order.
    pub runtime_paths: Vec<PathBuf>,
}

impl LayeredConfigOptions {
    /// Options with the default user layer for the provided cwd.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            user_config_path: layer_io::default_user_config_path(),
            runtime_paths: Vec::new(),
        }
    }

    /// Add a runtime override config path that is applied last.
    pub fn with_runtime_path(mut self, path: impl AsRef<Path>) -> Self {
        self.runtime_paths.push(path.as_ref().to_path_buf());
        self
    }
}

impl HolaConfig {
    /// Load a single config from JSON5 contents (no layering).
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value: Value = json5::from_str(contents)?;
        config_from_value(value, "config")
    }

    /// Load the layered config from explicit locations.
    ///
    /// Precedence (low -> high): user, cwd, runtime overrides. Missing user
    /// and cwd files are skipped; missing runtime files are an error.
    pub fn load_layered_with_options(
        options: LayeredConfigOptions,
    ) -> Result<LayeredConfig, ConfigError> {
        let mut layers = Vec::new();
        let mut merged = Value::Object(serde_json::Map::new());
        let mut seen = HashSet::new();

        let mut candidates = Vec::new();
        if let Some(path) = options.user_config_path {
            candidates.push((ConfigLayerSource::User, path, false));
        }
        candidates.push((
            ConfigLayerSource::Cwd,
            options.cwd.join(DEFAULT_CONFIG_FILE),
            false,
        ));
        for path in options.runtime_paths {
            candidates.push((ConfigLayerSource::Runtime, path, true));
        }

        for (source, path, required) in candidates {
            if !required && !path.exists() {
                debug!(
                    "skipping missing layer (source={:?}, path={})",
                    source,
                    path.display()
                );
                continue;
            }
            let unique = path.canonicalize().unwrap_or_else(|_| path.clone());
            if !seen.insert(unique) {
                debug!(
                    "skipping duplicate layer (source={:?}, path={})",
                    source,
                    path.display()
                );
                continue;
            }
            let value = layer_io::load_layer(source, &path)?;
            merge::merge_json_values(&mut merged, &value);
            layers.push(ConfigLayer { source, path });
        }

        let config = config_from_value(merged, "effective")?;
        info!("layered config loaded (layers={})", layers.len());
        Ok(LayeredConfig { config, layers })
    }

    /// Validate invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.submit_delay_ms > MAX_SUBMIT_DELAY_MS {
            return Err(ConfigError::InvalidField {
                path: "board.submit_delay_ms".to_string(),
                message: format!("must be at most {MAX_SUBMIT_DELAY_MS}"),
            });
        }
        if self.board.time_format.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                path: "board.time_format".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if StrftimeItems::new(&self.board.time_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidField {
                path: "board.time_format".to_string(),
                message: "invalid strftime specifier".to_string(),
            });
        }
        // Some specifiers parse but are only meaningful when parsing, not formatting.
        let mut sample = String::new();
        if write!(sample, "{}", Local::now().format(&self.board.time_format)).is_err() {
            return Err(ConfigError::InvalidField {
                path: "board.time_format".to_string(),
                message: "cannot be used to format a time".to_string(),
            });
        }
        if self.ui.tick_ms == 0 {
            return Err(ConfigError::InvalidField {
                path: "ui.tick_ms".to_string(),
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

fn config_from_value(value: Value, label: &str) -> Result<HolaConfig, ConfigError> {
    schema::validate_layer_schema(&value, label)?;
    let config: HolaConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}
