//! Forwards analytics events into the Ramen customer-messaging widget.
//!
//! The bridge sits between a host analytics dispatch layer and the widget:
//! `identify` and `group` calls are remapped onto the widget's settings
//! structure (`createdAt` becomes `created_at` in unix seconds, nested
//! user/company traits are reshaped into the widget's layout), and the
//! widget's `go()` bootstrap runs once its script has loaded. Calls that
//! arrive earlier mutate settings only; the widget reads them when it comes
//! up.
//!
//! ```no_run
//! use ramen_bridge::{BridgeConfig, HttpScriptLoader, IdentifyTraits, RamenBridge,
//!     TracingRamenRuntime};
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = BridgeConfig::from_env()?;
//! let loader = Arc::new(HttpScriptLoader::new(config.load_timeout)?);
//! let bridge = Arc::new(RamenBridge::new(config, loader, Arc::new(TracingRamenRuntime)));
//! bridge.initialize().await;
//! let traits = IdentifyTraits {
//!     email: Some("ryan@ramen.is".into()),
//!     ..Default::default()
//! };
//! bridge.identify("1234", &traits, None).await;
//! # Ok(())
//! # }
//! ```

mod bridge;
mod config;
mod events;
mod loader;
mod runtime;
mod settings;
mod timestamp;

pub use bridge::RamenBridge;
pub use config::{BridgeConfig, DEFAULT_SCRIPT_URL};
pub use events::{CompanyTraits, IdentifyTraits, IntegrationOptions};
pub use loader::{HttpScriptLoader, LoadError, LoadState, ScriptLoader, StubScriptLoader};
pub use runtime::{RamenRuntime, RecordingRuntime, TracingRamenRuntime, WidgetError};
pub use settings::{CompanySettings, CustomLink, PARTNER, RamenSettings, UserSettings};
pub use timestamp::to_unix_seconds;
