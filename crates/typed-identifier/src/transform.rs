//! The typed identifier transform.

use std::sync::Arc;

use serde_json::Value;

use crate::classify::Classifier;
use crate::config::TypedIdentifierConfig;
use crate::detect::IdentifierDetector;
use crate::item::TypedIdentifierItem;
use crate::policy::{resolve_allow_list, AllowListPolicy, BundleContext, FieldSettingsStore};
use crate::shape::normalize;
use crate::value::is_empty_value;

/// Turns raw identifier values into typed identifier items.
///
/// Collaborators are fixed at construction: without a detector the `id` key
/// is classified by name, and without a field settings store every checked
/// field resolves to an empty allow-list. The transformer holds no mutable
/// state and can be shared across threads.
#[derive(Clone, Default)]
pub struct TypedIdentifierTransformer {
    detector: Option<Arc<dyn IdentifierDetector>>,
    field_settings: Option<Arc<dyn FieldSettingsStore>>,
    context: BundleContext,
}

impl std::fmt::Debug for TypedIdentifierTransformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedIdentifierTransformer")
            .field("detector", &self.detector.is_some())
            .field("field_settings", &self.field_settings.is_some())
            .field("context", &self.context)
            .finish()
    }
}

impl TypedIdentifierTransformer {
    /// Transformer with no detector and no field settings store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Auto-detect the `id` key with `detector`.
    pub fn with_detector(mut self, detector: Arc<dyn IdentifierDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Auto-detect the `id` key with the bundled identifier parser.
    #[cfg(feature = "parser")]
    pub fn with_default_detector(self) -> Self {
        self.with_detector(Arc::new(typed_identifier_parser::IdentifierTypeParser::new()))
    }

    /// Look up destination field allow-lists in `store`.
    pub fn with_field_settings(mut self, store: Arc<dyn FieldSettingsStore>) -> Self {
        self.field_settings = Some(store);
        self
    }

    /// The bundle whose field configs hold allow-lists.
    pub fn context(&self) -> &BundleContext {
        &self.context
    }

    /// Resolve the allow-list `config` is checked against.
    pub fn resolve_policy(&self, config: &TypedIdentifierConfig) -> AllowListPolicy {
        resolve_allow_list(
            self.field_settings.as_deref(),
            &self.context,
            &config.destination_field,
            config.check_allow_list,
        )
    }

    /// Transform one raw source value.
    ///
    /// An empty value yields no items without touching the field settings
    /// store. Otherwise the allow-list is resolved once and applied to every
    /// candidate map. The result may be empty but is never absent.
    pub fn transform(
        &self,
        value: &Value,
        config: &TypedIdentifierConfig,
    ) -> Vec<TypedIdentifierItem> {
        if is_empty_value(value) {
            return Vec::new();
        }

        let policy = self.resolve_policy(config);
        let candidates = normalize(value, config.nested);
        let classifier = Classifier::new(config, &policy, self.detector.as_deref());
        let items = classifier.classify(&candidates);

        tracing::trace!(
            field = %config.destination_field,
            candidates = candidates.len(),
            items = items.len(),
            "Transformed typed identifiers"
        );
        items
    }
}
