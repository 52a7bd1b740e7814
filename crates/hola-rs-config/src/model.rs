//! Configuration schema for the Hola board.

use serde::{Deserialize, Serialize};

/// Default simulated submit latency in milliseconds.
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 800;
/// Upper bound accepted for the simulated latency.
pub const MAX_SUBMIT_DELAY_MS: u64 = 60_000;
/// Default refresh tick used for the pending spinner.
pub const DEFAULT_TICK_MS: u64 = 120;

/// Root config.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HolaConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Board behavior: latency, seeding and timestamp rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardConfig {
    /// Artificial delay before a submission lands in the list.
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
    /// Start with the two seed greetings.
    #[serde(default = "default_seed")]
    pub seed: bool,
    /// chrono format string for the time-of-day column.
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
            seed: default_seed(),
            time_format: default_time_format(),
        }
    }
}

/// Terminal front-end settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    /// Title shown in the header.
    #[serde(default = "default_title")]
    pub title: String,
    /// Name pre-filled in the author field.
    #[serde(default)]
    pub author: Option<String>,
    /// Redraw tick in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            author: None,
            tick_ms: default_tick_ms(),
        }
    }
}

fn default_submit_delay_ms() -> u64 {
    DEFAULT_SUBMIT_DELAY_MS
}

fn default_seed() -> bool {
    true
}

fn default_time_format() -> String {
    "%H:%M".to_string()
}

fn default_title() -> String {
    "Hello World".to_string()
}

fn default_tick_ms() -> u64 {
    DEFAULT_TICK_MS
}
