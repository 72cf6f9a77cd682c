// src/deutils.rs
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Integer from a number or a numeric string, None for anything else.
///
/// Never fails, so a garbled field does not sink the whole record.
pub fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(v
        .as_i64()
        .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok())))
}

/// String from a string, a number, or null (empty).
pub fn deserialize_string_from_anything<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Parse a `%d` formatted integer field, trimming stray whitespace
pub fn parse_i64_field(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "deserialize_lenient_i64")]
        n: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_string_from_anything")]
        s: String,
    }

    #[test]
    fn test_lenient_i64() {
        let p: Probe = serde_json::from_str(r#"{"n":"42","s":"x"}"#).unwrap();
        assert_eq!(p.n, Some(42));
        let p: Probe = serde_json::from_str(r#"{"n":7}"#).unwrap();
        assert_eq!(p.n, Some(7));
        let p: Probe = serde_json::from_str(r#"{"n":"\u0001garbage"}"#).unwrap();
        assert_eq!(p.n, None);
        let p: Probe = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(p.n, None);
    }

    #[test]
    fn test_string_from_anything() {
        let p: Probe = serde_json::from_str(r#"{"s":100}"#).unwrap();
        assert_eq!(p.s, "100");
        let p: Probe = serde_json::from_str(r#"{"s":null}"#).unwrap();
        assert_eq!(p.s, "");
        let p: Probe = serde_json::from_str(r#"{"s":"add"}"#).unwrap();
        assert_eq!(p.s, "add");
    }

    #[test]
    fn test_parse_i64_field() {
        assert_eq!(parse_i64_field(" -12 "), Some(-12));
        assert_eq!(parse_i64_field("x"), None);
    }
}
