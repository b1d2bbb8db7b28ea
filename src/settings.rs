use crate::events::{CompanyTraits, IdentifyTraits, IntegrationOptions};
use crate::timestamp::to_unix_seconds;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Partner identifier stamped on every settings payload the widget reads.
pub const PARTNER: &str = "segment.com";

/// Entry rendered in the widget's custom link list, in the order given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomLink {
    pub href: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserSettings {
    /// Merge widget user options without clobbering the identity fields.
    fn merge(&mut self, options: &Map<String, Value>) {
        for (key, value) in options {
            if matches!(key.as_str(), "id" | "email" | "name") {
                continue;
            }
            self.extra.insert(key.clone(), value.clone());
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanySettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CompanySettings {
    fn from_traits(traits: &CompanyTraits) -> Self {
        Self {
            id: traits.id.clone(),
            name: traits.name.clone(),
            url: traits.url.clone(),
            created_at: traits.created_at.as_ref().and_then(to_unix_seconds),
            extra: traits.extra.clone(),
        }
    }
}

/// The settings structure the widget reads when it bootstraps.
///
/// Serializes to the exact shape the widget script expects, `_partner` rename
/// included; unrecognized integration options are flattened in verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RamenSettings {
    pub organization_id: String,
    #[serde(rename = "_partner")]
    pub partner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_hash: Option<String>,
    /// Unix seconds matching `auth_hash`, from the host's `auth_hash_timestamp`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_links: Vec<CustomLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanySettings>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RamenSettings {
    pub fn new(organization_id: impl Into<String>) -> Self {
        Self {
            organization_id: organization_id.into(),
            partner: PARTNER.to_string(),
            environment: None,
            auth_hash: None,
            timestamp: None,
            custom_links: Vec::new(),
            user: None,
            company: None,
            extra: Map::new(),
        }
    }

    /// Rebuild the user block from an identify call; `name` falls back to the
    /// email. Company traits, when present, rebuild the company block too.
    pub(crate) fn apply_identify(&mut self, user_id: &str, email: &str, traits: &IdentifyTraits) {
        self.user = Some(UserSettings {
            id: user_id.to_string(),
            email: email.to_string(),
            name: traits.name.clone().unwrap_or_else(|| email.to_string()),
            extra: Map::new(),
        });
        if let Some(company) = &traits.company {
            self.company = Some(CompanySettings::from_traits(company));
        }
        self.partner = PARTNER.to_string();
    }

    /// Fold widget options into the settings. Recognized keys land on their
    /// named fields, `user` entries merge into the user block, and everything
    /// else is copied through untouched.
    pub(crate) fn apply_options(&mut self, options: &IntegrationOptions) {
        if let Some(environment) = &options.environment {
            self.environment = Some(environment.clone());
        }
        if let Some(auth_hash) = &options.auth_hash {
            self.auth_hash = Some(auth_hash.clone());
        }
        if let Some(stamp) = &options.auth_hash_timestamp {
            self.timestamp = to_unix_seconds(stamp);
        }
        if let Some(links) = &options.custom_links {
            self.custom_links = links.clone();
        }
        if let Some(user) = self.user.as_mut() {
            user.merge(&options.user);
        }
        for (key, value) in &options.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }

    /// A group call always pins the company id; traits fill in the rest.
    pub(crate) fn apply_group(&mut self, group_id: &str, traits: Option<&CompanyTraits>) {
        let company = self.company.get_or_insert_with(CompanySettings::default);
        company.id = Some(group_id.to_string());
        let Some(traits) = traits else { return };
        if let Some(name) = &traits.name {
            company.name = Some(name.clone());
        }
        if let Some(url) = &traits.url {
            company.url = Some(url.clone());
        }
        if let Some(created) = &traits.created_at {
            company.created_at = to_unix_seconds(created);
        }
    }
}
