use thiserror::Error;

/// Top-level error type for the `haptique-api` crate.
///
/// Routine requests only ever fail with [`Error::Communication`]: the client
/// makes no distinction between an unreachable hub, a rejected request and a
/// reply it cannot parse. The HTTP status is kept on the variant so that the
/// setup probe in `haptique-core` can still tell a 401 apart.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// Network failure, timeout, non-2xx status, or malformed body.
    #[error("Error communicating with {url}: {reason}")]
    Communication {
        url: String,
        status: Option<u16>,
        reason: String,
        /// The request hit the configured per-request timeout.
        timed_out: bool,
    },

    // ── Setup ───────────────────────────────────────────────────────
    /// The configured host does not form a valid base URL.
    #[error("Invalid host '{host}': {reason}")]
    InvalidHost { host: String, reason: String },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl Error {
    /// Build a `Communication` error from a reqwest transport failure.
    pub(crate) fn transport(url: &url::Url, err: &reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            "request timed out".to_owned()
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else {
            err.to_string()
        };
        Self::Communication {
            url: url.to_string(),
            status: err.status().map(|s| s.as_u16()),
            reason,
            timed_out: err.is_timeout(),
        }
    }

    /// The HTTP status the hub answered with, if the failure got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Communication { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns `true` if the hub rejected the request with HTTP 401.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Returns `true` if the request was abandoned at the timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Communication { timed_out: true, .. })
    }
}
