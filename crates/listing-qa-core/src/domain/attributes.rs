//! Listing attribute maps.

use std::collections::HashMap;

use serde_json::Value;

/// Caller-supplied attribute values keyed by attribute name.
pub type AttributeMap = HashMap<String, Value>;

/// Returns true if an attribute value counts as filled in.
///
/// `null`, `false`, zero, empty strings, empty arrays and empty objects
/// are treated as absent.
#[must_use]
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Returns the required keys that are absent or empty, in the given order.
#[must_use]
pub fn missing_keys(required: &[&str], attributes: &AttributeMap) -> Vec<String> {
    required
        .iter()
        .filter(|key| !attributes.get(**key).is_some_and(is_present))
        .map(|key| (*key).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_falsy_values_are_absent() {
        for value in [
            json!(null),
            json!(false),
            json!(0),
            json!(0.0),
            json!(""),
            json!([]),
            json!({}),
        ] {
            assert!(!is_present(&value), "{value} should be absent");
        }
    }

    #[test]
    fn test_truthy_values_are_present() {
        for value in [
            json!(true),
            json!(7),
            json!(-1.5),
            json!("M"),
            json!(" "),
            json!(["cotton"]),
            json!({"cm": 550}),
        ] {
            assert!(is_present(&value), "{value} should be present");
        }
    }

    #[test]
    fn test_missing_keys_preserves_schema_order() {
        let mut attrs = AttributeMap::new();
        attrs.insert("color".into(), json!("red"));
        attrs.insert("brand".into(), json!(""));

        let missing = missing_keys(&["brand", "size", "color", "material"], &attrs);
        assert_eq!(missing, ["brand", "size", "material"]);
    }

    #[test]
    fn test_extra_keys_ignored() {
        let mut attrs = AttributeMap::new();
        attrs.insert("brand".into(), json!("Acme"));
        attrs.insert("sleeve".into(), json!("short"));

        assert!(missing_keys(&["brand"], &attrs).is_empty());
        assert!(missing_keys(&[], &attrs).is_empty());
    }
}
