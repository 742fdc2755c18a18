// ── Runtime hub configuration ──
//
// Describes *how* to reach one hub. Carries the credentials and polling
// tuning, but never touches disk: the CLI (or any other host) builds a
// `HubConfig` and hands it in.

use std::time::Duration;

use haptique_api::TransportConfig;
use secrecy::SecretString;

/// Interval between scheduled poll cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Per-request timeout for every hub call.
pub const DEFAULT_TIMEOUT: Duration = haptique_api::transport::DEFAULT_TIMEOUT;

/// Configuration for one configured hub instance.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Network address of the hub (host or `host:port`).
    pub host: String,
    /// Optional bearer token issued by the hub's `/api/token` page.
    pub token: Option<SecretString>,
    /// Display name for the device; falls back to the hub's hostname.
    pub name: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Fixed period between scheduled poll cycles.
    pub poll_interval: Duration,
}

impl HubConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            token: None,
            name: None,
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    /// Stable identifier for this instance. The host is unique per hub.
    pub fn entry_id(&self) -> &str {
        self.host.trim()
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig::with_timeout(self.timeout)
    }
}
