use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Canonical CDN location of the widget script.
pub const DEFAULT_SCRIPT_URL: &str = "https://cdn.ramen.is/assets/ramen.js";

const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Bridge configuration; `organization_id` is the one required option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    pub organization_id: String,
    pub script_url: Url,
    pub load_timeout: Duration,
}

impl BridgeConfig {
    pub fn new(organization_id: impl Into<String>) -> Self {
        Self {
            organization_id: organization_id.into(),
            script_url: Url::parse(DEFAULT_SCRIPT_URL).expect("default script url is valid"),
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let organization_id = std::env::var("RAMEN_ORGANIZATION_ID")
            .context("RAMEN_ORGANIZATION_ID must be set")?;
        let mut config = Self::new(organization_id);

        if let Ok(raw) = std::env::var("RAMEN_SCRIPT_URL") {
            config.script_url = raw.parse().context("failed to parse RAMEN_SCRIPT_URL")?;
        }
        if let Some(timeout) = std::env::var("RAMEN_LOAD_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
        {
            config.load_timeout = timeout;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_the_cdn_default() {
        let config = BridgeConfig::new("6389149");
        assert_eq!(config.organization_id, "6389149");
        assert_eq!(config.script_url.as_str(), DEFAULT_SCRIPT_URL);
        assert_eq!(config.load_timeout, Duration::from_secs(10));
    }
}
