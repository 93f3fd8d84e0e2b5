//! Per-entry classification of candidate identifier maps.

use serde_json::Value;

use crate::config::TypedIdentifierConfig;
use crate::detect::IdentifierDetector;
use crate::item::{generic_itemtype, TypedIdentifierItem};
use crate::policy::AllowListPolicy;
use crate::value::{coerce_to_string, is_empty_value};

/// Key whose value is auto-detected instead of classified by name
pub const AUTO_DETECT_KEY: &str = "id";

/// Why an entry produced no item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Key is in `exclude_keys`
    Excluded,
    /// Value is empty
    EmptyValue,
    /// Value has no scalar string form
    NotScalar,
    /// Key is not allowed and no fallback applies
    NotAllowed,
    /// Auto-detected type is not allowed and no fallback applies
    DetectedNotAllowed,
}

/// Outcome of classifying one `(key, value)` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Keep(TypedIdentifierItem),
    Drop(DropReason),
}

impl Decision {
    pub fn into_item(self) -> Option<TypedIdentifierItem> {
        match self {
            Decision::Keep(item) => Some(item),
            Decision::Drop(_) => None,
        }
    }
}

/// Applies exclusion, emptiness, auto-detection and allow-list rules.
///
/// The policy must already be resolved; the classifier performs no lookups.
pub struct Classifier<'a> {
    config: &'a TypedIdentifierConfig,
    policy: &'a AllowListPolicy,
    detector: Option<&'a dyn IdentifierDetector>,
}

impl<'a> Classifier<'a> {
    pub fn new(
        config: &'a TypedIdentifierConfig,
        policy: &'a AllowListPolicy,
        detector: Option<&'a dyn IdentifierDetector>,
    ) -> Self {
        Self {
            config,
            policy,
            detector,
        }
    }

    /// Classify every entry of every candidate map, in order.
    ///
    /// Candidates that are not maps are skipped.
    pub fn classify(&self, candidates: &[&Value]) -> Vec<TypedIdentifierItem> {
        let mut items = Vec::new();

        for candidate in candidates {
            let Some(map) = candidate.as_object() else {
                tracing::trace!("Skipping non-map candidate: {}", candidate);
                continue;
            };

            items.extend(
                map.iter()
                    .filter_map(|(key, value)| self.decide(key, value).into_item()),
            );
        }

        items
    }

    /// Decide the fate of one entry.
    pub fn decide(&self, key: &str, value: &Value) -> Decision {
        if self.config.is_excluded(key) {
            return Decision::Drop(DropReason::Excluded);
        }
        if is_empty_value(value) {
            return Decision::Drop(DropReason::EmptyValue);
        }
        let Some(itemvalue) = coerce_to_string(value) else {
            tracing::debug!(key, "Dropping identifier with non-scalar value");
            return Decision::Drop(DropReason::NotScalar);
        };

        if key == AUTO_DETECT_KEY {
            if let Some(decision) = self.decide_detected(&itemvalue) {
                return decision;
            }
        }

        match self.admit(key) {
            Some(itemtype) => Decision::Keep(TypedIdentifierItem::new(itemtype, itemvalue)),
            None => {
                tracing::debug!(key, "Dropping identifier type not allowed by field");
                Decision::Drop(DropReason::NotAllowed)
            }
        }
    }

    /// Classify by detected type; `None` when there is no detector or it
    /// finds no match, so the entry falls back to its key.
    fn decide_detected(&self, value: &str) -> Option<Decision> {
        let detected = self.detector?.detect(value)?;
        if detected.itemvalue.is_empty() {
            return None;
        }

        let decision = match self.admit(&detected.itemtype) {
            Some(itemtype) => {
                Decision::Keep(TypedIdentifierItem::new(itemtype, detected.itemvalue))
            }
            None => {
                tracing::debug!(
                    itemtype = %detected.itemtype,
                    "Dropping detected identifier type not allowed by field"
                );
                Decision::Drop(DropReason::DetectedNotAllowed)
            }
        };
        Some(decision)
    }

    /// The item type to store for `itemtype`, or `None` to drop it.
    ///
    /// Unchecked configurations keep every type. Checked ones keep allowed
    /// types and rewrite the rest to `generic:<type>` only when the field
    /// allows `generic` and the fallback is enabled.
    pub fn admit(&self, itemtype: &str) -> Option<String> {
        if !self.config.check_allow_list || self.policy.allows(itemtype) {
            Some(itemtype.to_string())
        } else if self.policy.generic_allowed() && self.config.use_generic_fallback {
            Some(generic_itemtype(itemtype))
        } else {
            None
        }
    }
}
