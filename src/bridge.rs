use crate::config::BridgeConfig;
use crate::events::{CompanyTraits, IdentifyTraits, IntegrationOptions};
use crate::loader::{LoadState, ScriptLoader};
use crate::runtime::RamenRuntime;
use crate::settings::RamenSettings;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

/// Bridges the host analytics dispatch layer to the Ramen widget: keeps the
/// widget settings current and invokes `go()` once the script is ready.
///
/// Inbound calls never fail; a call whose precondition does not hold (identify
/// without an email, group before any identify) declines silently.
pub struct RamenBridge {
    config: BridgeConfig,
    loader: Arc<dyn ScriptLoader>,
    runtime: Arc<dyn RamenRuntime>,
    inner: Arc<Mutex<Inner>>,
    ready_tx: watch::Sender<bool>,
}

struct Inner {
    load: LoadState,
    settings: Option<RamenSettings>,
}

impl RamenBridge {
    pub fn new(
        config: BridgeConfig,
        loader: Arc<dyn ScriptLoader>,
        runtime: Arc<dyn RamenRuntime>,
    ) -> Self {
        let (ready_tx, _) = watch::channel(false);
        Self {
            config,
            loader,
            runtime,
            inner: Arc::new(Mutex::new(Inner {
                load: LoadState::Unloaded,
                settings: None,
            })),
            ready_tx,
        }
    }

    /// Issue the script load, exactly once per cycle; repeated calls while
    /// loading or ready are no-ops. The fetch runs as a detached task and is
    /// never retried, so a failed load leaves the bridge in `Loading`.
    pub async fn initialize(&self) {
        {
            let mut inner = self.inner.lock().await;
            if inner.load != LoadState::Unloaded {
                debug!(state = ?inner.load, "initialize called again; load already issued");
                return;
            }
            inner.load = LoadState::Loading;
        }
        info!(url = %self.config.script_url, "loading widget script");
        let loader = Arc::clone(&self.loader);
        let runtime = Arc::clone(&self.runtime);
        let inner = Arc::clone(&self.inner);
        let ready_tx = self.ready_tx.clone();
        let url = self.config.script_url.clone();
        tokio::spawn(async move {
            match loader.fetch(&url).await {
                Ok(()) => mark_ready(&inner, &ready_tx, runtime.as_ref()).await,
                Err(err) => warn!(error = %err, "widget script load failed"),
            }
        });
    }

    /// Current lifecycle state.
    pub async fn load_state(&self) -> LoadState {
        self.inner.lock().await.load
    }

    /// Readiness signal; flips to true when the script finishes loading.
    pub fn ready_signal(&self) -> watch::Receiver<bool> {
        self.ready_tx.subscribe()
    }

    /// Snapshot of the settings the widget reads; `None` until the first
    /// identify that carried an email.
    pub async fn settings(&self) -> Option<RamenSettings> {
        self.inner.lock().await.settings.clone()
    }

    /// Map an identify call onto the widget settings and bootstrap the widget
    /// if its script is ready. Declines without a user id or an email.
    pub async fn identify(
        &self,
        user_id: &str,
        traits: &IdentifyTraits,
        options: Option<&IntegrationOptions>,
    ) {
        if user_id.is_empty() {
            debug!("identify without user id; skipping");
            return;
        }
        let email = match traits.email.as_deref() {
            Some(email) if !email.is_empty() => email,
            _ => {
                debug!(%user_id, "identify without email; skipping");
                return;
            }
        };
        let snapshot = {
            let mut inner = self.inner.lock().await;
            let ready = inner.load == LoadState::Ready;
            let organization_id = self.config.organization_id.clone();
            let settings = inner
                .settings
                .get_or_insert_with(|| RamenSettings::new(organization_id));
            settings.apply_identify(user_id, email, traits);
            if let Some(options) = options {
                settings.apply_options(options);
            }
            ready.then(|| settings.clone())
        };
        if let Some(settings) = snapshot {
            self.go(&settings).await;
        }
    }

    /// Map a group call onto the company block. Declines unless a prior
    /// identify already created the settings.
    pub async fn group(&self, group_id: &str, traits: Option<&CompanyTraits>) {
        if group_id.is_empty() {
            debug!("group without group id; skipping");
            return;
        }
        let snapshot = {
            let mut inner = self.inner.lock().await;
            let ready = inner.load == LoadState::Ready;
            let Some(settings) = inner.settings.as_mut() else {
                debug!(%group_id, "group before any identify; skipping");
                return;
            };
            settings.apply_group(group_id, traits);
            ready.then(|| settings.clone())
        };
        if let Some(settings) = snapshot {
            self.go(&settings).await;
        }
    }

    /// Accepted from the host for completeness; the widget has no page-view
    /// surface.
    pub async fn page(&self) {
        debug!("page event has no widget mapping");
    }

    /// Rewind the load state so a fresh initialize/load cycle can run.
    /// Settings are left intact; this is a test-isolation hook.
    pub async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        inner.load = LoadState::Unloaded;
        self.ready_tx.send_replace(false);
        info!("bridge reset");
    }

    async fn go(&self, settings: &RamenSettings) {
        if let Err(err) = self.runtime.go(settings).await {
            warn!(error = %err, "widget bootstrap call failed");
        }
    }
}

async fn mark_ready(
    inner: &Mutex<Inner>,
    ready_tx: &watch::Sender<bool>,
    runtime: &dyn RamenRuntime,
) {
    let snapshot = {
        let mut inner = inner.lock().await;
        inner.load = LoadState::Ready;
        inner.settings.clone()
    };
    ready_tx.send_replace(true);
    info!("widget script ready");
    // the widget reads whatever settings already exist when it comes up
    if let Some(settings) = snapshot {
        if let Err(err) = runtime.go(&settings).await {
            warn!(error = %err, "widget bootstrap call failed");
        }
    }
}
