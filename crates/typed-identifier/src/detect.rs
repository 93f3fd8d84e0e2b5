//! Auto-detection of identifier types for the reserved `id` key.

/// An identifier type and value inferred from a bare string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedIdentifier {
    pub itemtype: String,
    pub itemvalue: String,
}

impl DetectedIdentifier {
    pub fn new(itemtype: impl Into<String>, itemvalue: impl Into<String>) -> Self {
        Self {
            itemtype: itemtype.into(),
            itemvalue: itemvalue.into(),
        }
    }
}

/// Infers an identifier's type from its value.
///
/// Returning `None` means "no match"; the entry is then classified by its key.
pub trait IdentifierDetector: Send + Sync {
    fn detect(&self, value: &str) -> Option<DetectedIdentifier>;
}

impl<F> IdentifierDetector for F
where
    F: Fn(&str) -> Option<DetectedIdentifier> + Send + Sync,
{
    fn detect(&self, value: &str) -> Option<DetectedIdentifier> {
        self(value)
    }
}

#[cfg(feature = "parser")]
impl IdentifierDetector for typed_identifier_parser::IdentifierTypeParser {
    fn detect(&self, value: &str) -> Option<DetectedIdentifier> {
        self.parse(value)
            .map(|parsed| DetectedIdentifier::new(parsed.itemtype(), parsed.itemvalue))
    }
}
