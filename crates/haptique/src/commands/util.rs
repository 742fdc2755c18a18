//! Shared helpers for command handlers.

use std::io::IsTerminal;

use serde_json::{Map, Value};

use haptique_core::{CommandKind, CommandResult, HubConfig, HubContext};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so the operation is refused.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Parameter map builder: only supplied values are inserted so the core
/// fills in its own defaults for the rest.
#[derive(Default)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_owned(), value.into());
        self
    }

    pub fn with_opt<V: Into<Value>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    pub fn name(name: &str) -> Self {
        Self::default().with("name", name)
    }
}

/// Run one command against the hub without polling first, then print
/// the acknowledgement.
pub async fn send(
    config: HubConfig,
    kind: CommandKind,
    params: Params,
    success: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let ctx = HubContext::new(config)?;
    let result = ctx.dispatch(kind, &params.0).await?;

    let out = output::render_single(
        &global.output,
        &result,
        |_| format!("✓ {success}"),
        |r: &CommandResult| r.command.to_owned(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
