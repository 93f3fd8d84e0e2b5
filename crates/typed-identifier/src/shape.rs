//! Input shape normalization.

use serde_json::Value;

/// How a raw source value holds its identifier maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputShape {
    /// The value itself is one identifier map (a work's `ids`)
    #[default]
    Flat,
    /// The value is a sequence of identifier maps (one per author)
    Nested,
}

impl InputShape {
    pub fn from_nested(nested: bool) -> Self {
        if nested {
            Self::Nested
        } else {
            Self::Flat
        }
    }

    /// Split `value` into its candidate maps, in order.
    ///
    /// A nested shape over a non-sequence yields nothing. Elements are not
    /// checked for being maps here; the classifier skips anything else.
    pub fn candidates<'a>(&self, value: &'a Value) -> Vec<&'a Value> {
        match self {
            Self::Flat => vec![value],
            Self::Nested => match value {
                Value::Array(items) => items.iter().collect(),
                _ => Vec::new(),
            },
        }
    }
}

/// Split `value` into candidate maps according to the `nested` flag.
pub fn normalize(value: &Value, nested: bool) -> Vec<&Value> {
    InputShape::from_nested(nested).candidates(value)
}
