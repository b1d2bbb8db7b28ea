use chrono::DateTime;
use serde_json::Value;

/// Normalize a date-like JSON value to unix-epoch seconds.
///
/// Hosts hand dates over either as RFC 3339 strings or as numbers that are
/// already epoch-based; fractional seconds are truncated. Anything else is
/// not a date and yields `None`.
pub fn to_unix_seconds(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.timestamp()),
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_rfc3339_strings() {
        let value = json!("2009-02-13T23:31:30.000Z");
        assert_eq!(to_unix_seconds(&value), Some(1234567890));
    }

    #[test]
    fn keeps_integer_seconds() {
        assert_eq!(to_unix_seconds(&json!(1234567890)), Some(1234567890));
    }

    #[test]
    fn truncates_fractional_seconds() {
        assert_eq!(to_unix_seconds(&json!(1234567890.75)), Some(1234567890));
    }

    #[test]
    fn rejects_non_dates() {
        assert_eq!(to_unix_seconds(&json!(true)), None);
        assert_eq!(to_unix_seconds(&json!("not a date")), None);
        assert_eq!(to_unix_seconds(&json!({"at": 1})), None);
    }
}
