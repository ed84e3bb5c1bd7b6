//! Output formatting for the CLI
//!
//! Structured output in JSON, YAML and TOML for machine processing, and a
//! colored key/value table for people.

use anyhow::Context;
use clap::ValueEnum;
use cloud_config_core::{RawSettings, ResolverHealth, SettingKey, SettingKind};
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write;

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
    /// TOML format
    Toml,
}

/// One catalogue entry as printed by `keys`
#[derive(Debug, Clone, Serialize)]
pub struct KeyOutput {
    pub name: &'static str,
    pub kind: SettingKind,
    pub default: &'static str,
    pub secret: bool,
    /// Whether any source supplies a non-blank value
    pub configured: bool,
}

/// The setting catalogue, wrapped so every format has a top-level table
#[derive(Debug, Clone, Serialize)]
pub struct KeysOutput {
    pub settings: Vec<KeyOutput>,
}

impl KeysOutput {
    pub fn from_catalogue(catalogue: &[SettingKey], settings: &RawSettings) -> Self {
        let settings = catalogue
            .iter()
            .map(|key| KeyOutput {
                name: key.name,
                kind: key.kind,
                default: key.default,
                secret: key.secret,
                configured: settings.is_set(key),
            })
            .collect();
        Self { settings }
    }
}

/// Render any serializable value in the requested format
///
/// `Table` flattens nested records into dotted keys under `title`.
pub fn render<T: Serialize>(title: &str, value: &T, format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(value).context("failed to render JSON")?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => serde_yaml::to_string(value).context("failed to render YAML")?,
        OutputFormat::Toml => toml::to_string_pretty(value).context("failed to render TOML")?,
        OutputFormat::Table => {
            let value = serde_json::to_value(value).context("failed to convert output")?;
            let mut rows = Vec::new();
            flatten("", &value, &mut rows);
            key_value_table(title, &rows)
        }
    };
    Ok(rendered)
}

/// Flatten nested objects into `(dotted.key, text)` rows
///
/// Arrays of scalars are joined on one row; arrays of records get indexed keys.
pub fn flatten(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                let key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&key, child, rows);
            }
        }
        Value::Array(items) if items.iter().any(|i| i.is_object() || i.is_array()) => {
            for (index, item) in items.iter().enumerate() {
                flatten(&format!("{prefix}[{index}]"), item, rows);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            let joined = items.iter().map(scalar_text).collect::<Vec<_>>().join(", ");
            rows.push((prefix.to_string(), joined));
        }
        Value::Object(_) | Value::Array(_) => rows.push((prefix.to_string(), "(none)".to_string())),
        scalar => rows.push((prefix.to_string(), scalar_text(scalar))),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) if s.is_empty() => "(empty)".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn header(out: &mut String, title: &str) {
    writeln!(out).ok();
    writeln!(out, "{}", title.cyan().bold()).ok();
    writeln!(out, "{}", "=".repeat(60)).ok();
}

fn key_value_table(title: &str, rows: &[(String, String)]) -> String {
    let mut out = String::new();
    header(&mut out, title);

    if rows.is_empty() {
        writeln!(out, "  {}", "(none)".dimmed()).ok();
    }

    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, value) in rows {
        writeln!(out, "  {key:<width$}  {value}").ok();
    }
    writeln!(out).ok();
    out
}

/// Render a health report as a table
pub fn health_table(health: &ResolverHealth) -> String {
    let mut out = String::new();
    header(&mut out, "Configuration Health");

    writeln!(out, "  Provider:    {}", health.provider).ok();
    writeln!(out, "  Environment: {}", health.environment).ok();
    writeln!(out).ok();

    for entry in &health.capabilities {
        let capability = entry.capability.as_str();
        if entry.healthy {
            writeln!(out, "  {} {capability:<10} resolved", "+".green()).ok();
        } else {
            let message = entry.message.as_deref().unwrap_or("failed");
            writeln!(out, "  {} {capability:<10} {message}", "x".red()).ok();
        }
    }

    writeln!(out, "{}", "-".repeat(60)).ok();
    let total = health.capabilities.len();
    if health.all_healthy() {
        writeln!(out, "{} All {total} capabilities resolved", "+".green()).ok();
    } else {
        let failed = health.unhealthy_count();
        writeln!(out, "{} {failed} of {total} capabilities failed", "x".red()).ok();
    }
    writeln!(out).ok();
    out
}

/// Render the setting catalogue as a table
pub fn keys_table(catalogue: &KeysOutput) -> String {
    let mut out = String::new();
    header(&mut out, "Settings");

    let width = catalogue
        .settings
        .iter()
        .map(|entry| entry.name.len())
        .max()
        .unwrap_or(0);

    for entry in &catalogue.settings {
        let marker = if entry.configured { "*".green() } else { " ".normal() };
        let kind = match entry.kind {
            SettingKind::Text if entry.secret => "secret",
            SettingKind::Text => "text",
            SettingKind::Flag => "flag",
            SettingKind::Port => "port",
            SettingKind::List => "list",
        };
        let default = if entry.default.is_empty() {
            "(empty)".dimmed().to_string()
        } else {
            entry.default.to_string()
        };
        writeln!(out, "{marker} {:<width$}  {kind:<6}  {default}", entry.name).ok();
    }

    writeln!(out).ok();
    writeln!(out, "{}", "* set in the current environment".dimmed()).ok();
    out
}
