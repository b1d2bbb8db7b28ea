use crate::settings::CustomLink;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User traits supplied by the host's identify call.
///
/// Only `email`, `name` and `company` have a widget mapping; anything else the
/// host sends lands in `extra` and is accepted but not forwarded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentifyTraits {
    pub email: Option<String>,
    pub name: Option<String>,
    pub company: Option<CompanyTraits>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Company traits, either nested under identify or carried by a group call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyTraits {
    pub id: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    /// Date-like value (RFC 3339 string or epoch number); normalized to unix
    /// seconds before it reaches the widget.
    #[serde(rename = "createdAt")]
    pub created_at: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Widget-specific options carried alongside an identify call.
///
/// Recognized keys are named fields; unrecognized keys are passed through to
/// the widget verbatim so newer widget options keep working without a crate
/// release.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntegrationOptions {
    pub environment: Option<String>,
    pub auth_hash: Option<String>,
    pub auth_hash_timestamp: Option<Value>,
    pub custom_links: Option<Vec<CustomLink>>,
    #[serde(default)]
    pub user: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_unrecognized_option_keys_into_extra() {
        let options: IntegrationOptions = serde_json::from_value(json!({
            "environment": "staging",
            "unknown_future_opt": "11",
            "user": { "labels": ["use", "ramen!"] }
        }))
        .unwrap();
        assert_eq!(options.environment.as_deref(), Some("staging"));
        assert_eq!(options.extra["unknown_future_opt"], json!("11"));
        assert_eq!(options.user["labels"], json!(["use", "ramen!"]));
    }

    #[test]
    fn company_created_at_accepts_strings_and_numbers() {
        let company: CompanyTraits = serde_json::from_value(json!({
            "name": "Pied Piper",
            "createdAt": "2009-02-13T23:31:30.000Z"
        }))
        .unwrap();
        assert_eq!(company.created_at, Some(json!("2009-02-13T23:31:30.000Z")));

        let company: CompanyTraits =
            serde_json::from_value(json!({ "createdAt": 1234567890 })).unwrap();
        assert_eq!(company.created_at, Some(json!(1234567890)));
    }
}
