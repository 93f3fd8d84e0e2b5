//! Applying process mappings to source records.

use serde_json::{json, Map, Value};

use crate::config::MigrationConfig;
use crate::transform::TypedIdentifierTransformer;

/// Runs every process mapping of a migration over source records.
#[derive(Debug, Clone)]
pub struct MigrationRunner {
    migration: MigrationConfig,
    transformer: TypedIdentifierTransformer,
}

impl MigrationRunner {
    pub fn new(migration: MigrationConfig, transformer: TypedIdentifierTransformer) -> Self {
        Self {
            migration,
            transformer,
        }
    }

    pub fn migration(&self) -> &MigrationConfig {
        &self.migration
    }

    /// Transform one source record into destination field values.
    ///
    /// Each mapping reads its `source` property (missing properties are
    /// empty) and writes the typed identifier items under its destination
    /// field, in destination field order.
    pub fn process_record(&self, record: &Value) -> Map<String, Value> {
        let mut row = Map::new();

        for (destination, mapping) in &self.migration.process {
            let source = mapping
                .source
                .as_deref()
                .and_then(|key| record.get(key))
                .unwrap_or(&Value::Null);

            let items = self.transformer.transform(source, &mapping.config);
            let values = items
                .into_iter()
                .map(|item| json!({"itemtype": item.itemtype, "itemvalue": item.itemvalue}))
                .collect();

            row.insert(destination.clone(), Value::Array(values));
        }

        row
    }
}
