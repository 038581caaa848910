//! Field-level decoders for rows coming back from the record store
//!
//! The store hands back loosely typed JSON (numbers stored as text, nullable
//! columns, free-form status strings). These helpers settle each field once,
//! at the boundary, so aggregation never has to second-guess a value.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a numeric column that may arrive as a number, a numeric string, or null.
///
/// Anything that does not yield a finite number decodes as `None`.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(numeric))
}

/// Coerce a JSON value to a finite number
pub(crate) fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Decode a nullable status column into a status enum built from its raw text
pub(crate) fn status<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String> + Default,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(T::from).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_accepts_numbers_and_numeric_strings() {
        assert_eq!(numeric(&json!(1000)), Some(1000.0));
        assert_eq!(numeric(&json!(12.5)), Some(12.5));
        assert_eq!(numeric(&json!("1000")), Some(1000.0));
        assert_eq!(numeric(&json!("  250.75 ")), Some(250.75));
    }

    #[test]
    fn numeric_rejects_garbage() {
        assert_eq!(numeric(&json!(null)), None);
        assert_eq!(numeric(&json!("")), None);
        assert_eq!(numeric(&json!("1,000")), None);
        assert_eq!(numeric(&json!("abc")), None);
        assert_eq!(numeric(&json!(true)), None);
        assert_eq!(numeric(&json!(["1"])), None);
    }

    #[test]
    fn numeric_rejects_non_finite_text() {
        assert_eq!(numeric(&json!("inf")), None);
        assert_eq!(numeric(&json!("NaN")), None);
    }

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "lenient_number")]
        budget: Option<f64>,
    }

    #[test]
    fn lenient_number_handles_missing_and_null() {
        let row: Row = serde_json::from_value(json!({})).unwrap();
        assert_eq!(row.budget, None);
        let row: Row = serde_json::from_value(json!({ "budget": null })).unwrap();
        assert_eq!(row.budget, None);
        let row: Row = serde_json::from_value(json!({ "budget": "42" })).unwrap();
        assert_eq!(row.budget, Some(42.0));
    }
}
