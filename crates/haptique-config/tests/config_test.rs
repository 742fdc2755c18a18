#![allow(clippy::unwrap_used)]
// Tests for config loading, saving, and profile translation.

use std::collections::HashMap;
use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::ExposeSecret;

use haptique_config::{
    Config, ConfigError, Defaults, Profile, load_config_from, profile_to_hub_config,
    resolve_token_with, save_config_to,
};

fn profile(host: &str) -> Profile {
    Profile {
        host: host.into(),
        ..Profile::default()
    }
}

fn no_env(_: &str) -> Option<String> {
    None
}

// ── Loading ─────────────────────────────────────────────────────────

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(cfg.default_profile.as_deref(), Some("default"));
    assert_eq!(cfg.defaults.output, "table");
    assert_eq!(cfg.defaults.timeout, 10);
    assert_eq!(cfg.defaults.poll_interval, 30);
    assert!(cfg.profiles.is_empty());
}

#[test]
fn test_profiles_are_read_from_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
default_profile = "living-room"

[defaults]
output = "json"

[profiles.living-room]
host = "192.168.1.100"
token_env = "LIVING_ROOM_TOKEN"
poll_interval = 15
"#,
    )
    .unwrap();

    let cfg = load_config_from(&path).unwrap();
    let (name, living_room) = cfg.profile(None).unwrap();

    assert_eq!(name, "living-room");
    assert_eq!(living_room.host, "192.168.1.100");
    assert_eq!(living_room.token_env.as_deref(), Some("LIVING_ROOM_TOKEN"));
    assert_eq!(living_room.poll_interval, Some(15));
    assert_eq!(cfg.defaults.output, "json");
    assert_eq!(cfg.defaults.timeout, 10);
}

#[test]
fn test_save_then_load_preserves_profiles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut profiles = HashMap::new();
    profiles.insert(
        "garage".to_owned(),
        Profile {
            host: "10.0.0.7".into(),
            name: Some("Garage hub".into()),
            token: Some("abc".into()),
            ..Profile::default()
        },
    );
    let cfg = Config {
        default_profile: Some("garage".into()),
        defaults: Defaults::default(),
        profiles,
    };

    save_config_to(&cfg, &path).unwrap();
    let loaded = load_config_from(&path).unwrap();

    assert_eq!(loaded, cfg);
}

#[test]
fn test_unknown_profile_is_reported() {
    let cfg = Config::default();
    let err = cfg.profile(Some("attic")).unwrap_err();
    assert!(matches!(err, ConfigError::ProfileNotFound { ref name } if name == "attic"));
}

// ── Token resolution ────────────────────────────────────────────────

#[test]
fn test_token_env_wins_over_shared_env_and_plaintext() {
    let p = Profile {
        token: Some("plain".into()),
        token_env: Some("HUB_TOKEN".into()),
        ..profile("h")
    };
    let lookup = |name: &str| match name {
        "HUB_TOKEN" => Some("from-profile-env".to_owned()),
        "HAPTIQUE_TOKEN" => Some("from-shared-env".to_owned()),
        _ => None,
    };

    let token = resolve_token_with(&p, lookup).unwrap();
    assert_eq!(token.expose_secret(), "from-profile-env");
}

#[test]
fn test_shared_env_then_plaintext() {
    let p = Profile {
        token: Some("plain".into()),
        token_env: Some("UNSET_VAR".into()),
        ..profile("h")
    };

    let shared = |name: &str| (name == "HAPTIQUE_TOKEN").then(|| "shared".to_owned());
    assert_eq!(resolve_token_with(&p, shared).unwrap().expose_secret(), "shared");
    assert_eq!(resolve_token_with(&p, no_env).unwrap().expose_secret(), "plain");
}

#[test]
fn test_empty_token_means_no_token() {
    let p = Profile {
        token: Some(String::new()),
        ..profile("h")
    };
    assert!(resolve_token_with(&p, no_env).is_none());
}

// ── HubConfig translation ───────────────────────────────────────────

#[test]
fn test_profile_to_hub_config_applies_defaults_and_overrides() {
    let defaults = Defaults::default();
    let p = Profile {
        name: Some("Lounge".into()),
        timeout: Some(4),
        ..profile(" 192.168.1.100 ")
    };

    let hub = profile_to_hub_config(&p, &defaults).unwrap();

    assert_eq!(hub.host, "192.168.1.100");
    assert_eq!(hub.name.as_deref(), Some("Lounge"));
    assert_eq!(hub.timeout, Duration::from_secs(4));
    assert_eq!(hub.poll_interval, Duration::from_secs(30));
}

#[test]
fn test_empty_host_is_rejected() {
    let err = profile_to_hub_config(&profile("  "), &Defaults::default()).unwrap_err();
    assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "host"));
}
