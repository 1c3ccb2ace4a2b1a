//! TOML configuration loading.
//!
//! ```toml
//! title = "demo"
//! value = 42
//!
//! [[pluginA]]
//! file = "a.so"
//! number = 1
//!
//! [[pluginB]]
//! file = "b.so"
//! ```
//!
//! Every top-level array of tables is a plugin group, whatever its name.
//! Missing keys fall back to their defaults.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

const DEFAULT_TITLE: &str = "title";
const DEFAULT_VALUE: u64 = 10;

/// A single entry of a plugin group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PluginConfig {
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub number: u64,
}

/// Loaded configuration. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRecord {
    pub title: String,
    pub value: u64,
    /// Plugin groups keyed by their table-array name, e.g. `pluginA`.
    pub plugins: BTreeMap<String, Vec<PluginConfig>>,
}

impl Default for ConfigRecord {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            value: DEFAULT_VALUE,
            plugins: BTreeMap::new(),
        }
    }
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(default = "default_title")]
    title: String,
    #[serde(default = "default_value")]
    value: u64,
    #[serde(flatten)]
    rest: toml::Table,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_value() -> u64 {
    DEFAULT_VALUE
}

impl ConfigRecord {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let raw: RawConfig = toml::from_str(text)?;

        let mut plugins = BTreeMap::new();
        for (group, value) in raw.rest {
            let toml::Value::Array(items) = value else {
                continue;
            };
            let mut entries = Vec::new();
            for item in items {
                if item.is_table() {
                    let entry: PluginConfig = item.try_into()?;
                    entries.push(entry);
                }
            }
            if !entries.is_empty() {
                plugins.insert(group, entries);
            }
        }

        Ok(Self {
            title: raw.title,
            value: raw.value,
            plugins,
        })
    }

    /// Total number of plugin entries across all groups.
    pub fn plugin_count(&self) -> usize {
        self.plugins.values().map(Vec::len).sum()
    }

    /// Every plugin paired with its group name, groups in name order.
    pub fn plugin_entries(&self) -> impl Iterator<Item = (&str, &PluginConfig)> {
        self.plugins
            .iter()
            .flat_map(|(group, entries)| entries.iter().map(move |p| (group.as_str(), p)))
    }
}

/// Load configuration from `path`.
///
/// `None` or an empty path yields [`ConfigRecord::default`] without touching
/// the filesystem.
pub fn load_config(path: Option<&Path>) -> Result<ConfigRecord, ConfigError> {
    let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
        debug!("no config file given, using defaults");
        return Ok(ConfigRecord::default());
    };

    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let config = ConfigRecord::from_toml_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        groups = config.plugins.len(),
        plugins = config.plugin_count(),
        "config loaded"
    );
    Ok(config)
}
