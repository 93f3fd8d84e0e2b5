//! Typed identifier output items.

use serde::{Deserialize, Serialize};

/// Allow-list entry permitting the catch-all fallback type.
pub const GENERIC_TYPE: &str = "generic";

/// Prefix of fallback item types (`generic:<key>`).
pub const GENERIC_PREFIX: &str = "generic:";

/// The fallback item type for a key or detected type outside the allow-list.
pub fn generic_itemtype(itemtype: &str) -> String {
    format!("{}{}", GENERIC_PREFIX, itemtype)
}

/// One `{itemtype, itemvalue}` pair written to a typed identifier field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypedIdentifierItem {
    pub itemtype: String,
    pub itemvalue: String,
}

impl TypedIdentifierItem {
    pub fn new(itemtype: impl Into<String>, itemvalue: impl Into<String>) -> Self {
        Self {
            itemtype: itemtype.into(),
            itemvalue: itemvalue.into(),
        }
    }

    /// Whether this item was produced by the generic fallback.
    pub fn is_generic(&self) -> bool {
        self.itemtype.starts_with(GENERIC_PREFIX)
    }

    /// The original key or detected type, with any `generic:` prefix removed.
    pub fn base_type(&self) -> &str {
        self.itemtype
            .strip_prefix(GENERIC_PREFIX)
            .unwrap_or(&self.itemtype)
    }
}
