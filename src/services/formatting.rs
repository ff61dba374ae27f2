//! Display helpers for rendering insights as text.
//!
//! Helpers are pure functions collected in a [`FormatterRegistry`] that the
//! caller builds once and hands to the renderer. There is no global registry.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

/// A display helper: formats one JSON value as text.
pub type Helper = fn(&JsonValue) -> String;

/// Mapping from helper name to helper function.
#[derive(Debug, Clone, Default)]
pub struct FormatterRegistry {
    helpers: HashMap<&'static str, Helper>,
}

impl FormatterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in helpers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register("formatDuration", format_duration)
            .register("formatRate", format_rate)
            .register("formatChange", format_change)
            .register("escapeMarkdown", escape_markdown)
            .register("toTitleCase", to_title_case)
            .register("formatTimestamp", format_timestamp);
        registry
    }

    /// Add or replace a helper.
    pub fn register(&mut self, name: &'static str, helper: Helper) -> &mut Self {
        self.helpers.insert(name, helper);
        self
    }

    pub fn get(&self, name: &str) -> Option<Helper> {
        self.helpers.get(name).copied()
    }

    /// Apply a helper by name; `None` when no such helper is registered.
    pub fn format(&self, name: &str, value: &JsonValue) -> Option<String> {
        self.get(name).map(|helper| helper(value))
    }

    /// Apply a helper by name, falling back to the raw value.
    pub fn format_or_raw(&self, name: &str, value: &JsonValue) -> String {
        self.format(name, value).unwrap_or_else(|| raw(value))
    }
}

fn raw(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Milliseconds as `450ms`, `1.25s`, `2m 5s` or `1h 2m 3s`.
pub fn format_duration(value: &JsonValue) -> String {
    let Some(ms) = value.as_f64() else {
        return raw(value);
    };
    if ms < 1000.0 {
        return format!("{}ms", ms.round() as i64);
    }
    if ms < 60_000.0 {
        return format!("{:.2}s", ms / 1000.0);
    }

    let total_secs = (ms / 1000.0).round() as i64;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else {
        format!("{}m {}s", minutes, seconds)
    }
}

/// Percentage with two decimals, e.g. `12.50%`.
pub fn format_rate(value: &JsonValue) -> String {
    match value.as_f64() {
        Some(rate) => format!("{:.2}%", rate),
        None => raw(value),
    }
}

/// Signed change with a trend arrow, e.g. `↑ +1.20`.
pub fn format_change(value: &JsonValue) -> String {
    match value.as_f64() {
        Some(change) if change > 0.0 => format!("↑ +{:.2}", change),
        Some(change) if change < 0.0 => format!("↓ {:.2}", change),
        Some(_) => "→ 0.00".to_string(),
        None => raw(value),
    }
}

const MARKDOWN_SPECIAL: [char; 16] = [
    '\\', '`', '*', '_', '{', '}', '[', ']', '(', ')', '#', '+', '!', '|', '<', '>',
];

/// Escape characters with a meaning in Markdown tables and inline text.
pub fn escape_markdown(value: &JsonValue) -> String {
    let text = raw(value);
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        if MARKDOWN_SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

/// Capitalize the first letter of every whitespace-separated word.
pub fn to_title_case(value: &JsonValue) -> String {
    raw(value)
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Epoch milliseconds or an RFC 3339 string as `YYYY-MM-DD HH:MM UTC`.
pub fn format_timestamp(value: &JsonValue) -> String {
    let parsed: Option<DateTime<Utc>> = match value {
        JsonValue::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        JsonValue::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    };

    match parsed {
        Some(dt) => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => raw(value),
    }
}
