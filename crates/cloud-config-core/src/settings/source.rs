//! Setting sources
//!
//! A [`SettingSource`] answers "what is the raw value of this variable?".
//! Sources are read-only and lightweight; they are composed into a priority
//! chain by [`RawSettings`](super::RawSettings).
//!
//! - [`EnvSource`]: the process environment, read at lookup time
//! - [`DotEnvSource`]: a `.env` file, parsed once when the source is built
//! - [`MapSource`]: explicit in-memory values (overrides, tests)

use crate::error::{ConfigError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A read-only source of raw setting values
pub trait SettingSource: Send + Sync + fmt::Debug {
    /// Returns the name of this source, used in diagnostics
    fn name(&self) -> &str;

    /// Get the raw value of a variable, or `None` if this source lacks it
    fn get(&self, key: &str) -> Option<String>;
}

/// Source backed by the process environment
///
/// Values are read on every lookup, so changes to the environment are
/// visible immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSource;

impl EnvSource {
    pub fn new() -> Self {
        Self
    }
}

impl SettingSource for EnvSource {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        match std::env::var(key) {
            Ok(value) => Some(value),
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                tracing::warn!(key, "environment variable is not valid UTF-8, ignoring");
                None
            }
        }
    }
}

/// Source backed by an in-memory map
#[derive(Debug, Default, Clone)]
pub struct MapSource {
    name: String,
    values: BTreeMap<String, String>,
}

impl MapSource {
    /// Create an empty map source
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    /// Add a value (builder pattern)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut source = MapSource::new("map");
        for (key, value) in iter {
            source.insert(key, value);
        }
        source
    }
}

impl SettingSource for MapSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Source backed by a `.env` file
///
/// The file is parsed once with `dotenvy` when the source is created; the
/// process environment is not modified.
///
/// # File Format
///
/// ```text
/// # Comment
/// CLOUD_PROVIDER=aws
/// export RDS_HOSTNAME=db.internal
/// CORS_ALLOWED_ORIGINS="https://app.example.com, https://admin.example.com"
/// ```
#[derive(Debug, Clone)]
pub struct DotEnvSource {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl DotEnvSource {
    /// Parse a `.env` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let env_file_error = |source| ConfigError::EnvFile {
            path: path.clone(),
            source,
        };

        let mut values = BTreeMap::new();
        for item in dotenvy::from_path_iter(&path).map_err(env_file_error)? {
            let (key, value) = item.map_err(env_file_error)?;
            values.insert(key, value);
        }

        tracing::debug!(path = %path.display(), entries = values.len(), "loaded env file");
        Ok(Self { path, values })
    }

    /// Path the values were loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingSource for DotEnvSource {
    fn name(&self) -> &str {
        "dotenv"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
