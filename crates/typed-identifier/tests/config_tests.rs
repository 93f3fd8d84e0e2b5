//! Configuration file loading tests

use std::io::Write;
use std::sync::Arc;

use serde_json::json;
use tempfile::NamedTempFile;
use typed_identifier::{
    ConfigError, FieldConfigRegistry, MigrationConfig, MigrationRunner, TypedIdentifierTransformer,
};

const MIGRATION_TOML: &str = r#"
[process.field_work_typed_ids]
plugin = "to_typed_identifier"
source = "ids"
is_nested = false
exclude_keys = ["mag"]
check_field_settings = true
use_generic_fallback = true
destination_field = "field_work_typed_ids"

[process.field_authors_typed_ids]
plugin = "to_typed_identifier"
source = "authorships"
is_nested = true
exclude_keys = ["display_name", "author_position"]
check_field_settings = true
use_generic_fallback = true
destination_field = "field_authors_typed_ids"
"#;

const FIELDS_TOML: &str = r#"
[fields."node.scholarly_work.field_work_typed_ids".settings]
allowed_identifier_types = ["openalex", "doi", "pmid", "generic"]

[fields."node.scholarly_work.field_authors_typed_ids".settings]
allowed_identifier_types = ["openalex", "orcid"]
"#;

fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[cfg(feature = "parser")]
#[test]
fn test_load_migration_and_fields_from_files() {
    let migration_file = write_temp(".toml", MIGRATION_TOML);
    let fields_file = write_temp(".toml", FIELDS_TOML);

    let migration = MigrationConfig::load(migration_file.path()).unwrap();
    let fields = FieldConfigRegistry::load_file(fields_file.path()).unwrap();
    assert_eq!(fields.len(), 2);

    let runner = MigrationRunner::new(
        migration,
        TypedIdentifierTransformer::new()
            .with_field_settings(Arc::new(fields))
            .with_default_detector(),
    );

    let record = json!({
        "ids": {
            "openalex": "https://openalex.org/W2741809807",
            "doi": "https://doi.org/10.7717/peerj.4375",
            "mag": "2741809807",
            "pmid": "https://pubmed.ncbi.nlm.nih.gov/29456894",
            "pmcid": "https://www.ncbi.nlm.nih.gov/pmc/articles/5815332",
        },
        "authorships": [
            {
                "author_position": "first",
                "display_name": "Heather Piwowar",
                "id": "https://openalex.org/A5048491430",
                "orcid": "https://orcid.org/0000-0003-1613-5981",
                "wosid": "A-1234-2020",
            }
        ]
    });

    let row = runner.process_record(&record);

    assert_eq!(
        row["field_work_typed_ids"],
        json!([
            {"itemtype": "openalex", "itemvalue": "https://openalex.org/W2741809807"},
            {"itemtype": "doi", "itemvalue": "https://doi.org/10.7717/peerj.4375"},
            {"itemtype": "pmid", "itemvalue": "https://pubmed.ncbi.nlm.nih.gov/29456894"},
            {"itemtype": "generic:pmcid", "itemvalue": "https://www.ncbi.nlm.nih.gov/pmc/articles/5815332"},
        ])
    );
    // Author field has no generic type: unknown keys are dropped
    assert_eq!(
        row["field_authors_typed_ids"],
        json!([
            {"itemtype": "openalex", "itemvalue": "A5048491430"},
            {"itemtype": "orcid", "itemvalue": "https://orcid.org/0000-0003-1613-5981"},
        ])
    );
}

#[test]
fn test_load_json_files() {
    let migration_file = write_temp(
        ".json",
        r#"{"process": {"field_ids": {"plugin": "to_typed_identifier", "source": "ids"}}}"#,
    );
    let fields_file = write_temp(
        ".json",
        r#"{"fields": {"node.scholarly_work.field_ids": {"settings": {"allowed_identifier_types": ["doi"]}}}}"#,
    );

    let migration = MigrationConfig::load(migration_file.path()).unwrap();
    assert!(migration.process["field_ids"]
        .config
        .destination_field
        .is_empty());
    assert_eq!(FieldConfigRegistry::load_file(fields_file.path()).unwrap().len(), 1);
}

#[test]
fn test_missing_file_reports_path() {
    let err = MigrationConfig::load("/nonexistent/migration.toml").unwrap_err();
    match err {
        ConfigError::Io { path, .. } => assert!(path.ends_with("migration.toml")),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let file = write_temp(".toml", "[process.field_ids\nplugin = ");
    assert!(matches!(
        MigrationConfig::load(file.path()),
        Err(ConfigError::Toml(_))
    ));
}
