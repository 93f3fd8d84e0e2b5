//! typed-identifier: classify identifier maps into typed identifier items.
//!
//! Source records carry identifiers as loosely-typed key/value maps, either
//! one flat map per entity (a work's `ids`) or a list of maps (one per
//! author). This crate turns both shapes into a flat, ordered list of
//! `{itemtype, itemvalue}` items, optionally validated against the
//! identifier types a destination field allows.
//!
//! # Rules
//!
//! For every entry of every candidate map, in input order:
//! - excluded keys and empty values are dropped
//! - the reserved key `id` is auto-detected from its value when a detector
//!   is configured; a detected type replaces the key
//! - with allow-list checking on, a type outside the allow-list becomes
//!   `generic:<type>` when the field allows `generic` and fallback is
//!   enabled, and is dropped otherwise
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use typed_identifier::{TypedIdentifierConfig, TypedIdentifierTransformer};
//!
//! let config = TypedIdentifierConfig::default().excluding(["mag"]);
//! let items = TypedIdentifierTransformer::new()
//!     .transform(&json!({"doi": "10.1234/test", "mag": "12345"}), &config);
//!
//! assert_eq!(items.len(), 1);
//! assert_eq!(items[0].itemtype, "doi");
//! ```

pub mod classify;
pub mod config;
pub mod detect;
pub mod error;
pub mod item;
pub mod migrate;
pub mod policy;
pub mod shape;
pub mod transform;
pub mod value;

pub use classify::{Classifier, Decision, DropReason, AUTO_DETECT_KEY};
pub use config::{MigrationConfig, ProcessMapping, TypedIdentifierConfig, PLUGIN_ID};
pub use detect::{DetectedIdentifier, IdentifierDetector};
pub use error::{ConfigError, Error, LookupError, Result};
pub use item::{generic_itemtype, TypedIdentifierItem, GENERIC_PREFIX, GENERIC_TYPE};
pub use migrate::MigrationRunner;
pub use policy::{
    resolve_allow_list, AllowListPolicy, BundleContext, FieldConfig, FieldConfigRegistry,
    FieldSettingsStore, ALLOWED_IDENTIFIER_TYPES,
};
pub use shape::{normalize, InputShape};
pub use transform::TypedIdentifierTransformer;
pub use value::{coerce_to_string, is_empty_value, CandidateMap};
