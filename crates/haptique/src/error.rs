//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use haptique_config::ConfigError;
use haptique_core::{CoreError, SetupError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not talk to the hub at {url}")]
    #[diagnostic(
        code(haptique::connection_failed),
        help(
            "Check that the hub is powered and on the same network.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to {url} timed out")]
    #[diagnostic(
        code(haptique::timeout),
        help("Increase the timeout with --timeout or check the hub's Wi-Fi signal.")
    )]
    Timeout { url: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("The hub at {host} rejected the token")]
    #[diagnostic(
        code(haptique::auth_failed),
        help(
            "Copy the token from http://{host}/api/token and pass it with --token\n\
             or set HAPTIQUE_TOKEN."
        )
    )]
    AuthFailed { host: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Hub at {host} is already configured")]
    #[diagnostic(
        code(haptique::conflict),
        help("Run: haptique config profiles to see existing profiles")
    )]
    AlreadyConfigured { host: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(haptique::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(haptique::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: haptique --host <HOST> setup --name {name}"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No hub configured")]
    #[diagnostic(
        code(haptique::no_config),
        help(
            "Pass --host (or set HAPTIQUE_HOST), or create a profile with:\n\
             haptique --host <HOST> setup\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(haptique::config))]
    Config(Box<ConfigError>),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(haptique::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(Box::new(other)),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::AlreadyConfigured { .. } => exit_code::CONFLICT,
            Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::NoConfig { .. } | Self::Config(_) | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Communication {
                url,
                timed_out: true,
                ..
            } => CliError::Timeout { url },
            CoreError::Communication { url, reason, .. } => {
                CliError::ConnectionFailed { url, reason }
            }
            CoreError::Validation { field, reason } => CliError::Validation { field, reason },
            CoreError::Setup(setup) => setup.into(),
            CoreError::Disconnected => CliError::ConnectionFailed {
                url: "(shut down)".into(),
                reason: "the hub instance was shut down".into(),
            },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

impl From<SetupError> for CliError {
    fn from(err: SetupError) -> Self {
        match err {
            SetupError::AuthenticationRequired { host } => CliError::AuthFailed { host },
            SetupError::CannotConnect { host, reason } => CliError::ConnectionFailed {
                url: format!("http://{host}/api/status"),
                reason,
            },
            SetupError::AlreadyConfigured { host } => CliError::AlreadyConfigured { host },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn communication(reason: &str, timed_out: bool) -> CoreError {
        CoreError::Communication {
            url: "http://hub1/api/status".into(),
            reason: reason.into(),
            timed_out,
        }
    }

    #[test]
    fn timeout_flag_selects_timeout_exit_code() {
        let err = CliError::from(communication("request timed out", true));
        assert!(matches!(err, CliError::Timeout { .. }));
        assert_eq!(err.exit_code(), exit_code::TIMEOUT);
    }

    #[test]
    fn timeout_wording_alone_is_a_connection_failure() {
        let err = CliError::from(communication("HTTP 504: upstream timed out", false));
        assert!(matches!(err, CliError::ConnectionFailed { .. }));
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
    }
}
