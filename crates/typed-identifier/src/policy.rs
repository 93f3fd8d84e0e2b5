//! Allow-list policy resolution from destination field settings.
//!
//! Field configurations are addressed as `<entity_type>.<bundle>.<field>`
//! (e.g. `node.scholarly_work.field_work_typed_ids`) and carry an
//! `allowed_identifier_types` setting. A store may hold them in memory or
//! load them from TOML/JSON:
//!
//! ```toml
//! [fields."node.scholarly_work.field_work_typed_ids".settings]
//! allowed_identifier_types = ["openalex", "doi", "generic"]
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, LookupError};
use crate::item::GENERIC_TYPE;

/// Setting holding the permitted item types of a typed identifier field
pub const ALLOWED_IDENTIFIER_TYPES: &str = "allowed_identifier_types";

/// The entity type and bundle that own a destination field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BundleContext {
    pub entity_type: String,
    pub bundle: String,
}

impl BundleContext {
    pub fn new(entity_type: impl Into<String>, bundle: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            bundle: bundle.into(),
        }
    }

    /// The scholarly work content type, owner of all typed identifier fields.
    pub fn scholarly_work() -> Self {
        Self::new("node", "scholarly_work")
    }

    /// Config id of `field_name` within this bundle.
    pub fn field_config_id(&self, field_name: &str) -> String {
        format!("{}.{}.{}", self.entity_type, self.bundle, field_name)
    }
}

impl Default for BundleContext {
    fn default() -> Self {
        Self::scholarly_work()
    }
}

/// Stored configuration of one field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    #[serde(default)]
    pub settings: Map<String, Value>,
}

impl FieldConfig {
    /// Field config with the given allowed identifier types.
    pub fn with_allowed_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let types = types.into_iter().map(|t| Value::String(t.into())).collect();
        let mut settings = Map::new();
        settings.insert(ALLOWED_IDENTIFIER_TYPES.to_string(), Value::Array(types));
        Self { settings }
    }

    /// The `allowed_identifier_types` setting.
    ///
    /// A missing or null setting is an empty list and a single string is a
    /// one-element list. A map contributes its values, which is how
    /// checkbox settings store the selected options (`{"doi": "doi", "pmid": 0}`).
    /// Non-string entries can never match an item type and are skipped.
    pub fn allowed_identifier_types(&self, id: &str) -> Result<Vec<String>, LookupError> {
        match self.settings.get(ALLOWED_IDENTIFIER_TYPES) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::String(s)) => Ok(vec![s.clone()]),
            Some(Value::Array(types)) => Ok(string_entries(types.iter())),
            Some(Value::Object(types)) => Ok(string_entries(types.values())),
            Some(other) => Err(LookupError::Malformed {
                id: id.to_string(),
                reason: format!("{} must be a list, got {}", ALLOWED_IDENTIFIER_TYPES, other),
            }),
        }
    }
}

fn string_entries<'a>(values: impl Iterator<Item = &'a Value>) -> Vec<String> {
    values
        .filter_map(|t| t.as_str().map(str::to_string))
        .collect()
}

/// Source of destination field configurations.
pub trait FieldSettingsStore: Send + Sync {
    /// Load the configuration of `field_name` owned by `context`.
    fn load(
        &self,
        context: &BundleContext,
        field_name: &str,
    ) -> Result<Option<FieldConfig>, LookupError>;
}

/// In-memory field configurations keyed by config id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConfigRegistry {
    #[serde(default)]
    fields: BTreeMap<String, FieldConfig>,
}

impl FieldConfigRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `config` under a full config id.
    pub fn insert(&mut self, id: impl Into<String>, config: FieldConfig) {
        self.fields.insert(id.into(), config);
    }

    /// Register the allowed types of `field_name` in `context`.
    pub fn with_allowed_types<I, S>(
        mut self,
        context: &BundleContext,
        field_name: &str,
        types: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(
            context.field_config_id(field_name),
            FieldConfig::with_allowed_types(types),
        );
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Load configurations from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load configurations from a JSON string
    pub fn from_json_str(json_str: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Load configurations from a file; `.json` files are read as JSON,
    /// anything else as TOML.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
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
}

impl FieldSettingsStore for FieldConfigRegistry {
    fn load(
        &self,
        context: &BundleContext,
        field_name: &str,
    ) -> Result<Option<FieldConfig>, LookupError> {
        Ok(self.fields.get(&context.field_config_id(field_name)).cloned())
    }
}

/// The item types a destination field permits.
///
/// An empty policy permits nothing; whether it is enforced at all is
/// decided by the transform configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowListPolicy {
    allowed: HashSet<String>,
    generic_allowed: bool,
}

impl AllowListPolicy {
    /// The empty policy: nothing allowed, no generic fallback.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed: HashSet<String> = types.into_iter().map(Into::into).collect();
        let generic_allowed = allowed.contains(GENERIC_TYPE);
        Self {
            allowed,
            generic_allowed,
        }
    }

    /// Whether `itemtype` is on the allow-list.
    pub fn allows(&self, itemtype: &str) -> bool {
        self.allowed.contains(itemtype)
    }

    /// Whether the allow-list contains `generic`.
    pub fn generic_allowed(&self) -> bool {
        self.generic_allowed
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}

/// Resolve the allow-list of `destination_field`.
///
/// Returns the empty policy without querying the store when checking is
/// off or no field is named. A missing store, a missing field config, or
/// any lookup error also yields the empty policy, so every checked type is
/// dropped.
pub fn resolve_allow_list(
    store: Option<&dyn FieldSettingsStore>,
    context: &BundleContext,
    destination_field: &str,
    check_allow_list: bool,
) -> AllowListPolicy {
    if !check_allow_list || destination_field.is_empty() {
        return AllowListPolicy::empty();
    }

    let Some(store) = store else {
        tracing::debug!(
            field = destination_field,
            "No field settings store configured, nothing allowed"
        );
        return AllowListPolicy::empty();
    };

    let id = context.field_config_id(destination_field);
    let types = match store.load(context, destination_field) {
        Ok(Some(config)) => config.allowed_identifier_types(&id),
        Ok(None) => {
            tracing::debug!(field_config = %id, "Field config not found, nothing allowed");
            return AllowListPolicy::empty();
        }
        Err(e) => Err(e),
    };

    match types {
        Ok(types) => {
            let policy = AllowListPolicy::from_types(types);
            tracing::trace!(
                field_config = %id,
                allowed = policy.allowed.len(),
                generic = policy.generic_allowed,
                "Resolved allow-list"
            );
            policy
        }
        Err(e) => {
            tracing::warn!(field_config = %id, "Failed to load field settings: {}", e);
            AllowListPolicy::empty()
        }
    }
}
