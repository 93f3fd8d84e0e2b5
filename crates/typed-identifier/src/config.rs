//! Process plugin configuration.
//!
//! A migration maps destination fields to process plugins:
//!
//! ```toml
//! [process.field_work_typed_ids]
//! plugin = "to_typed_identifier"
//! source = "ids"
//! is_nested = false
//! exclude_keys = ["mag"]
//! check_field_settings = true
//! use_generic_fallback = true
//! destination_field = "field_work_typed_ids"
//!
//! [process.field_authors_typed_ids]
//! plugin = "to_typed_identifier"
//! source = "authorships"
//! is_nested = true
//! exclude_keys = ["display_name", "author_position"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Process plugin id of the typed identifier transform
pub const PLUGIN_ID: &str = "to_typed_identifier";

/// Settings for one transform invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypedIdentifierConfig {
    /// Input is a sequence of maps rather than a single map
    #[serde(rename = "is_nested", alias = "nested")]
    pub nested: bool,
    /// Keys dropped regardless of policy
    pub exclude_keys: Vec<String>,
    /// Validate item types against the destination field's allow-list
    #[serde(rename = "check_field_settings", alias = "check_allow_list")]
    pub check_allow_list: bool,
    /// Rewrite disallowed types to `generic:<type>` when the field allows it
    pub use_generic_fallback: bool,
    /// Field whose settings hold the allow-list
    pub destination_field: String,
}

impl TypedIdentifierConfig {
    /// Mark the input as a sequence of maps.
    pub fn nested(mut self) -> Self {
        self.nested = true;
        self
    }

    /// Add keys to drop.
    pub fn excluding<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Validate against the allow-list of `destination_field`.
    pub fn checking_field(mut self, destination_field: impl Into<String>) -> Self {
        self.check_allow_list = true;
        self.destination_field = destination_field.into();
        self
    }

    /// Enable the `generic:` fallback.
    pub fn with_generic_fallback(mut self) -> Self {
        self.use_generic_fallback = true;
        self
    }

    /// Whether `key` is excluded (exact match).
    pub fn is_excluded(&self, key: &str) -> bool {
        self.exclude_keys.iter().any(|k| k == key)
    }
}

/// One destination field's process mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMapping {
    pub plugin: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(flatten)]
    pub config: TypedIdentifierConfig,
}

/// A set of process mappings keyed by destination field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationConfig {
    #[serde(default)]
    pub process: BTreeMap<String, ProcessMapping>,
}

impl MigrationConfig {
    /// Load configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validated()
    }

    /// Load configuration from a JSON string
    pub fn from_json_str(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validated()
    }

    /// Load configuration from a file; `.json` files are read as JSON,
    /// anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Reject foreign plugins and sourceless mappings.
    ///
    /// `destination_field` is taken as written. A checked mapping without
    /// one has an empty allow-list and emits nothing.
    fn validated(self) -> Result<Self, ConfigError> {
        for (field, mapping) in &self.process {
            if mapping.plugin != PLUGIN_ID {
                return Err(ConfigError::UnknownPlugin {
                    field: field.clone(),
                    plugin: mapping.plugin.clone(),
                });
            }
            if mapping.source.as_deref().map_or(true, str::is_empty) {
                return Err(ConfigError::MissingSource(field.clone()));
            }
        }
        Ok(self)
    }
}
