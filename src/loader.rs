use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Lifecycle of the widget script: a load is issued exactly once per cycle and
/// there is no retry, so a failed fetch leaves the bridge in `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Ready,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("script request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("script fetch returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Pluggable fetch for the widget script.
#[async_trait]
pub trait ScriptLoader: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<(), LoadError>;
}

/// Fetches the script over HTTPS and discards the body; completion stands in
/// for the browser's script-tag onload signal.
#[derive(Clone)]
pub struct HttpScriptLoader {
    client: reqwest::Client,
}

impl HttpScriptLoader {
    pub fn new(timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ScriptLoader for HttpScriptLoader {
    async fn fetch(&self, url: &Url) -> Result<(), LoadError> {
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status(status));
        }
        resp.bytes().await?;
        Ok(())
    }
}

/// Loader that completes immediately, for host test suites.
#[derive(Clone, Default)]
pub struct StubScriptLoader;

#[async_trait]
impl ScriptLoader for StubScriptLoader {
    async fn fetch(&self, _url: &Url) -> Result<(), LoadError> {
        Ok(())
    }
}
