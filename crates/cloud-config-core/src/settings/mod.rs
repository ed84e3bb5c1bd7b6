//! Raw settings
//!
//! [`RawSettings`] is a priority-ordered chain of [`SettingSource`]s. Sources
//! added first win. A blank value counts as unset, so it falls through to the
//! next source and finally to the key's documented default.
//!
//! # Example
//!
//! ```rust
//! use cloud_config_core::settings::{keys, MapSource, RawSettings};
//!
//! let settings = RawSettings::new()
//!     .with_source(MapSource::new("overrides").with("USE_POSTGRES", "yes"));
//!
//! assert!(settings.flag(&keys::USE_POSTGRES));
//! assert_eq!(settings.port(&keys::RDS_PORT), 5432);
//! ```

pub mod keys;
pub mod source;

pub use keys::{SettingKey, SettingKind};
pub use source::{DotEnvSource, EnvSource, MapSource, SettingSource};

use crate::error::Result;
use std::path::Path;
use std::sync::Arc;

/// A chain of setting sources with typed, total accessors
#[derive(Clone, Default)]
pub struct RawSettings {
    sources: Vec<Arc<dyn SettingSource>>,
}

impl std::fmt::Debug for RawSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawSettings")
            .field("sources", &self.source_names())
            .finish()
    }
}

impl RawSettings {
    /// Create an empty chain; every lookup resolves to its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings backed by the process environment only
    pub fn from_env() -> Self {
        Self::new().with_source(EnvSource::new())
    }

    /// Process environment first, then the given `.env` file
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_env().with_env_file(path)
    }

    /// Append a `.env` file below every existing source
    pub fn with_env_file(self, path: impl AsRef<Path>) -> Result<Self> {
        Ok(self.with_source(DotEnvSource::from_file(path)?))
    }

    /// Add a lower-priority source (builder pattern)
    pub fn with_source<S: SettingSource + 'static>(mut self, source: S) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    /// Add a source that takes priority over every existing source
    pub fn with_override<S: SettingSource + 'static>(mut self, source: S) -> Self {
        self.sources.insert(0, Arc::new(source));
        self
    }

    /// Source names in priority order
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// First non-blank raw value for a variable name
    pub fn get(&self, name: &str) -> Option<String> {
        self.sources
            .iter()
            .filter_map(|source| source.get(name))
            .find(|value| !value.trim().is_empty())
    }

    /// Whether any source carries a non-blank value for the key
    pub fn is_set(&self, key: &SettingKey) -> bool {
        self.get(key.name).is_some()
    }

    /// String value, or the key's default when unset
    pub fn string(&self, key: &SettingKey) -> String {
        self.get(key.name)
            .unwrap_or_else(|| key.default.to_string())
    }

    /// String value, or `None` when neither a value nor a non-empty default exists
    pub fn optional(&self, key: &SettingKey) -> Option<String> {
        let value = self.string(key);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Boolean flag; malformed values fall back to the default
    pub fn flag(&self, key: &SettingKey) -> bool {
        let fallback = parse_flag(key.default).unwrap_or(false);
        match self.get(key.name) {
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                tracing::warn!(key = key.name, value = %raw, "invalid boolean setting, using default");
                fallback
            }),
            None => fallback,
        }
    }

    /// Port number; malformed values fall back to the default
    pub fn port(&self, key: &SettingKey) -> u16 {
        let fallback = key.default.parse().unwrap_or(0);
        match self.get(key.name) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(key = key.name, value = %raw, "invalid port setting, using default");
                fallback
            }),
            None => fallback,
        }
    }

    /// Comma-separated list, trimmed, blanks dropped
    pub fn list(&self, key: &SettingKey) -> Vec<String> {
        split_list(&self.string(key))
    }
}

/// Parse a boolean flag the way operators usually write them
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

/// Split a comma-separated value into trimmed, non-empty entries
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
