//! Pure projection of the store into display rows.

use crate::store::GreetingStore;
use chrono::{DateTime, Local, Utc};
use std::fmt::Write as _;

/// Default time-of-day format for list entries.
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";

/// Message shown when the store is empty.
pub const EMPTY_PLACEHOLDER: &str = "No messages in memory.";

/// One list row, ready to be styled by a front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingView {
    pub initial: String,
    pub author: String,
    pub time: String,
    pub body: String,
}

/// Project the store, newest first, formatting timestamps in local time.
pub fn project(store: &GreetingStore, time_format: &str) -> Vec<GreetingView> {
    store
        .iter()
        .map(|greeting| GreetingView {
            initial: initial_of(greeting.author()),
            author: greeting.author().to_string(),
            time: format_time(greeting.created_at(), time_format),
            body: greeting.body().to_string(),
        })
        .collect()
}

/// Local time of day; falls back to [`DEFAULT_TIME_FORMAT`] when
/// `time_format` cannot be used for formatting.
fn format_time(created_at: DateTime<Utc>, time_format: &str) -> String {
    let local = created_at.with_timezone(&Local);
    let mut time = String::new();
    if write!(time, "{}", local.format(time_format)).is_err() {
        time.clear();
        let _ = write!(time, "{}", local.format(DEFAULT_TIME_FORMAT));
    }
    time
}

/// Uppercased first character of an author name, or `?` when blank.
pub fn initial_of(author: &str) -> String {
    author
        .trim_start()
        .chars()
        .next()
        .map(|ch| ch.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}
