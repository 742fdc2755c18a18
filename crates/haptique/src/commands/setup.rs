//! `setup`: validate a hub and store it as a profile.

use serde::Serialize;

use haptique_core::HubConfig;
use haptique_core::setup;

use crate::cli::{GlobalOpts, SetupArgs};
use crate::config::{self, Profile};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct SetupReport {
    profile: String,
    host: String,
    title: String,
    version: String,
    config_path: String,
}

pub async fn handle(args: SetupArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let host = global
        .host
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| CliError::Validation {
            field: "host".into(),
            reason: "pass the hub address with --host".into(),
        })?
        .to_owned();

    let mut cfg = config::load_config_or_default();

    // Re-running setup for the same profile updates it in place.
    let others = cfg
        .profiles
        .iter()
        .filter(|(name, _)| **name != args.name)
        .map(|(_, p)| p.host.as_str());
    setup::ensure_unique(&host, others)?;

    let mut probe = HubConfig::new(host.as_str());
    probe.token = config::token_flag(global);
    if let Some(secs) = global.timeout.filter(|s| *s > 0) {
        probe.timeout = std::time::Duration::from_secs(secs);
    }
    let info = setup::validate(&probe).await?;

    let token = if args.token_env.is_some() {
        None
    } else {
        global.token.clone().filter(|t| !t.is_empty())
    };
    cfg.profiles.insert(
        args.name.clone(),
        Profile {
            host: host.clone(),
            name: Some(info.title.clone()),
            token,
            token_env: args.token_env,
            ..Profile::default()
        },
    );
    if args.set_default || cfg.profiles.len() == 1 {
        cfg.default_profile = Some(args.name.clone());
    }
    let path = config::save_config(&cfg)?;

    let report = SetupReport {
        profile: args.name,
        host,
        title: info.title,
        version: info.version,
        config_path: path.display().to_string(),
    };
    let out = output::render_single(
        &global.output,
        &report,
        |r| {
            format!(
                "✓ {} (firmware {}) saved as profile '{}'\n  {}",
                r.title, r.version, r.profile, r.config_path
            )
        },
        |r| r.profile.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
