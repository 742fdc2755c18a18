// ── Setup validation ──
//
// One-shot probe run before an instance is configured. A single
// `GET /api/status` tells a rejected token apart from an unreachable hub.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use haptique_api::HubClient;

use crate::config::HubConfig;

/// Title used when the hub does not report a hostname.
pub const FALLBACK_TITLE: &str = "Haptique IR/RF hub";
/// Version used when the hub does not report firmware.
pub const FALLBACK_VERSION: &str = "Unknown";

/// What a successful probe learned about the hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupInfo {
    pub title: String,
    pub version: String,
}

/// Why a hub could not be configured. Every variant is recoverable:
/// the user edits the form and tries again.
#[derive(Debug, Clone, Error)]
pub enum SetupError {
    #[error("Hub at {host} rejected the token (HTTP 401)")]
    AuthenticationRequired { host: String },

    #[error("Cannot connect to hub at {host}: {reason}")]
    CannotConnect { host: String, reason: String },

    #[error("Hub at {host} is already configured")]
    AlreadyConfigured { host: String },
}

impl SetupError {
    /// Stable key a form can use to look up its error message.
    pub fn form_error_key(&self) -> &'static str {
        match self {
            Self::AuthenticationRequired { .. } => "invalid_auth",
            Self::CannotConnect { .. } => "cannot_connect",
            Self::AlreadyConfigured { .. } => "already_configured",
        }
    }
}

/// Probe the hub described by `config`.
pub async fn validate(config: &HubConfig) -> Result<SetupInfo, SetupError> {
    let host = config.entry_id().to_owned();
    debug!(host = %host, "validating hub");

    let client = HubClient::new(&host, config.token.as_ref(), &config.transport()).map_err(|e| {
        SetupError::CannotConnect {
            host: host.clone(),
            reason: e.to_string(),
        }
    })?;

    let status = client.get_status().await.map_err(|e| {
        if e.is_unauthorized() {
            SetupError::AuthenticationRequired { host: host.clone() }
        } else {
            SetupError::CannotConnect {
                host: host.clone(),
                reason: e.to_string(),
            }
        }
    })?;

    let info = SetupInfo {
        title: status
            .hostname
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| FALLBACK_TITLE.to_owned()),
        version: status
            .version
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| FALLBACK_VERSION.to_owned()),
    };
    info!(host = %host, title = %info.title, version = %info.version, "hub validated");
    Ok(info)
}

/// Reject a host that is already among the configured instances.
pub fn ensure_unique<'a>(
    host: &str,
    configured: impl IntoIterator<Item = &'a str>,
) -> Result<(), SetupError> {
    let host = host.trim();
    if configured.into_iter().any(|h| h.trim().eq_ignore_ascii_case(host)) {
        return Err(SetupError::AlreadyConfigured {
            host: host.to_owned(),
        });
    }
    Ok(())
}
