use crate::settings::RamenSettings;
use async_trait::async_trait;
use std::sync::Mutex;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("widget bootstrap rejected settings: {0}")]
    Bootstrap(String),
}

/// The widget's `go()` bootstrap entry point. Called only once the script is
/// ready; the settings snapshot is what the widget would read from its global
/// settings object in a browser embedding.
#[async_trait]
pub trait RamenRuntime: Send + Sync {
    async fn go(&self, settings: &RamenSettings) -> Result<(), WidgetError>;
}

/// Logs each bootstrap call; stands in until a real embedding is wired.
#[derive(Clone, Default)]
pub struct TracingRamenRuntime;

#[async_trait]
impl RamenRuntime for TracingRamenRuntime {
    async fn go(&self, settings: &RamenSettings) -> Result<(), WidgetError> {
        info!(
            organization_id = %settings.organization_id,
            user = settings.user.as_ref().map(|u| u.id.as_str()),
            company = settings.company.as_ref().and_then(|c| c.id.as_deref()),
            "ramen.go"
        );
        Ok(())
    }
}

/// Records every bootstrap call with its settings snapshot, for test suites.
#[derive(Default)]
pub struct RecordingRuntime {
    calls: Mutex<Vec<RamenSettings>>,
}

impl RecordingRuntime {
    pub fn calls(&self) -> Vec<RamenSettings> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl RamenRuntime for RecordingRuntime {
    async fn go(&self, settings: &RamenSettings) -> Result<(), WidgetError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(settings.clone());
        Ok(())
    }
}
