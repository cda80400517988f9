//! Canonical text for JSON scalars.
//!
//! Strings render raw, numbers in serde_json's shortest form, booleans as
//! `true`/`false` and null as `null`.

use std::borrow::Cow;

use serde_json::Value;

/// Render a scalar value as display text.
///
/// Containers fall back to their compact JSON encoding.
pub fn render_scalar(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::Null => Cow::Borrowed("null"),
        Value::Array(_) | Value::Object(_) => Cow::Owned(value.to_string()),
    }
}

/// Label of a scalar leaf: `<key> : "<value>"`.
pub fn leaf_label(key: &str, value: &Value) -> String {
    format!("{key} : \"{}\"", render_scalar(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_scalars() {
        assert_eq!(render_scalar(&json!("text")), "text");
        assert_eq!(render_scalar(&json!(10)), "10");
        assert_eq!(render_scalar(&json!(-2.5)), "-2.5");
        assert_eq!(render_scalar(&json!(true)), "true");
        assert_eq!(render_scalar(&Value::Null), "null");
    }

    #[test]
    fn test_strings_are_not_escaped() {
        assert_eq!(render_scalar(&json!("say \"hi\"")), "say \"hi\"");
    }

    #[test]
    fn test_leaf_label() {
        assert_eq!(leaf_label("1", &json!(10)), "1 : \"10\"");
        assert_eq!(leaf_label("name", &json!("Ada")), "name : \"Ada\"");
        assert_eq!(leaf_label("gone", &Value::Null), "gone : \"null\"");
    }
}
