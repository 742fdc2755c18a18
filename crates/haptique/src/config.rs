//! CLI configuration: thin wrapper around `haptique_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--host, --token, --timeout).

use std::time::Duration;

use secrecy::SecretString;

use haptique_core::HubConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use haptique_config::{
    Config, Profile, config_path, load_config_or_default, profile_to_hub_config, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated sorted profile names, for help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().map(String::as_str).collect();
    names.sort_unstable();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

/// The `--token` flag as a secret, treating an empty value as absent.
pub fn token_flag(global: &GlobalOpts) -> Option<SecretString> {
    global
        .token
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(|t| SecretString::from(t.to_owned()))
}

fn timeout_flag(global: &GlobalOpts) -> Result<Option<Duration>, CliError> {
    match global.timeout {
        Some(0) => Err(CliError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        }),
        other => Ok(other.map(Duration::from_secs)),
    }
}

/// Build a `HubConfig` from the config file, profile, and CLI overrides.
///
/// Flags win over the profile. Without a matching profile, `--host`
/// alone is enough.
pub fn resolve_hub_config(global: &GlobalOpts) -> Result<HubConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let mut hub = if let Some(profile) = cfg.profiles.get(&profile_name) {
        let mut profile = profile.clone();
        if let Some(ref host) = global.host {
            profile.host.clone_from(host);
        }
        profile_to_hub_config(&profile, &cfg.defaults)?
    } else if global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(&cfg),
        });
    } else {
        let host = global
            .host
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| CliError::NoConfig {
                path: config_path().display().to_string(),
            })?;
        let mut hub = HubConfig::new(host.trim());
        hub.timeout = Duration::from_secs(cfg.defaults.timeout.max(1));
        hub.poll_interval = Duration::from_secs(cfg.defaults.poll_interval);
        hub
    };

    if let Some(token) = token_flag(global) {
        hub.token = Some(token);
    }
    if let Some(timeout) = timeout_flag(global)? {
        hub.timeout = timeout;
    }

    tracing::debug!(host = %hub.host, profile = %profile_name, "resolved hub config");
    Ok(hub)
}
