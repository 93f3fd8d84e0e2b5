//! Shared test collaborators

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use typed_identifier::{
    BundleContext, FieldConfig, FieldConfigRegistry, FieldSettingsStore, LookupError,
    TypedIdentifierTransformer,
};

/// Field settings store that counts lookups
#[derive(Default)]
pub struct CountingStore {
    inner: FieldConfigRegistry,
    lookups: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: FieldConfigRegistry) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl FieldSettingsStore for CountingStore {
    fn load(
        &self,
        context: &BundleContext,
        field_name: &str,
    ) -> Result<Option<FieldConfig>, LookupError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.load(context, field_name)
    }
}

/// Registry holding one field's allowed types in the scholarly work bundle
pub fn registry(field_name: &str, allowed: &[&str]) -> FieldConfigRegistry {
    FieldConfigRegistry::new().with_allowed_types(
        &BundleContext::scholarly_work(),
        field_name,
        allowed.iter().copied(),
    )
}

/// Transformer checking `field_name` against `allowed`
#[allow(dead_code)]
pub fn transformer_allowing(field_name: &str, allowed: &[&str]) -> TypedIdentifierTransformer {
    TypedIdentifierTransformer::new().with_field_settings(Arc::new(registry(field_name, allowed)))
}
