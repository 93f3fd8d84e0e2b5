//! Emptiness and string coercion for raw source values.
//!
//! Source values arrive as decoded JSON. A candidate map is a JSON object;
//! its entries are classified in insertion order.

use serde_json::{Map, Number, Value};

/// One identifier set (one work's or one author's identifiers).
pub type CandidateMap = Map<String, Value>;

/// Whether a source value counts as empty.
///
/// Empty values are null, `false`, numeric zero, `""`, `"0"`, and empty
/// sequences or maps. Falsy scalars are deliberately treated as empty so a
/// zero-valued identifier is dropped like a missing one.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => is_zero(n),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn is_zero(n: &Number) -> bool {
    if let Some(i) = n.as_i64() {
        i == 0
    } else if let Some(u) = n.as_u64() {
        u == 0
    } else {
        n.as_f64().is_some_and(|f| f == 0.0)
    }
}

/// Render a scalar as the string stored in `itemvalue`.
///
/// Integers use their decimal form and floats their shortest round-trip
/// form (`0.95` → `"0.95"`, `2021.0` → `"2021"`). Floats never use
/// exponent notation: `1e300` renders as `1` followed by 300 zeros.
/// `true` renders as `"1"`.
/// Returns `None` for values with no scalar string form (null, `false`,
/// sequences, maps).
pub fn coerce_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_to_string(n)),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn number_to_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_values() {
        for value in [
            json!(null),
            json!(false),
            json!(0),
            json!(0.0),
            json!(""),
            json!("0"),
            json!([]),
            json!({}),
        ] {
            assert!(is_empty_value(&value), "{} should be empty", value);
        }
    }

    #[test]
    fn non_empty_values() {
        for value in [
            json!(true),
            json!(1),
            json!(-3),
            json!(0.95),
            json!(" "),
            json!("00"),
            json!(["a"]),
            json!({"doi": "x"}),
        ] {
            assert!(!is_empty_value(&value), "{} should not be empty", value);
        }
    }

    #[test]
    fn coerce_numbers() {
        assert_eq!(coerce_to_string(&json!(2021)).as_deref(), Some("2021"));
        assert_eq!(coerce_to_string(&json!(0.95)).as_deref(), Some("0.95"));
        assert_eq!(coerce_to_string(&json!(2021.0)).as_deref(), Some("2021"));
        assert_eq!(coerce_to_string(&json!(-7)).as_deref(), Some("-7"));
        assert_eq!(
            coerce_to_string(&json!(u64::MAX)).as_deref(),
            Some("18446744073709551615")
        );
    }

    #[test]
    fn coerce_large_floats_without_exponent() {
        let rendered = coerce_to_string(&json!(1e300)).unwrap();
        assert_eq!(rendered.len(), 301);
        assert!(rendered.starts_with('1'));
        assert!(rendered[1..].bytes().all(|b| b == b'0'));
    }

    #[test]
    fn coerce_strings_and_bools() {
        assert_eq!(
            coerce_to_string(&json!("https://openalex.org/W123")).as_deref(),
            Some("https://openalex.org/W123")
        );
        assert_eq!(coerce_to_string(&json!(true)).as_deref(), Some("1"));
        assert_eq!(coerce_to_string(&json!(false)), None);
    }

    #[test]
    fn coerce_collections_is_none() {
        assert_eq!(coerce_to_string(&json!(null)), None);
        assert_eq!(coerce_to_string(&json!(["a"])), None);
        assert_eq!(coerce_to_string(&json!({"a": 1})), None);
    }
}
