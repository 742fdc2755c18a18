// ── Core error types ──
//
// Errors surfaced by haptique-core. Routine device failures all collapse
// into `Communication`; only the setup probe distinguishes a 401, and it
// does so through `SetupError`.

use thiserror::Error;

use crate::setup::SetupError;

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    // ── Device errors ────────────────────────────────────────────────
    /// Network failure, timeout, non-2xx status, or malformed body.
    #[error("Error communicating with device at {url}: {reason}")]
    Communication {
        url: String,
        reason: String,
        timed_out: bool,
    },

    // ── Command errors ───────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },

    // ── Lifecycle errors ─────────────────────────────────────────────
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("Hub instance has been shut down")]
    Disconnected,

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub(crate) fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_owned(),
            reason: reason.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<haptique_api::Error> for CoreError {
    fn from(err: haptique_api::Error) -> Self {
        match err {
            haptique_api::Error::Communication {
                url,
                reason,
                timed_out,
                ..
            } => CoreError::Communication {
                url,
                reason,
                timed_out,
            },
            haptique_api::Error::InvalidHost { host, reason } => CoreError::Config {
                message: format!("invalid host '{host}': {reason}"),
            },
            haptique_api::Error::HttpClient(message) => CoreError::Config { message },
        }
    }
}
