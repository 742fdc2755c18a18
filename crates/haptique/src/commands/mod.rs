//! Command dispatch: bridges CLI args -> core commands -> output formatting.

pub mod ap;
pub mod config_cmd;
pub mod ir;
pub mod rf;
pub mod saved;
pub mod setup;
pub mod status;
pub mod util;
pub mod watch;

use haptique_core::HubConfig;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a hub-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, config: HubConfig, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Status => status::handle(config, global).await,
        Command::Saved(args) => saved::handle(config, args, global).await,
        Command::Watch(args) => watch::handle(config, args, global).await,
        Command::Rf(args) => rf::handle(config, args, global).await,
        Command::Ir(args) => ir::handle(config, args, global).await,
        Command::Ap(args) => ap::handle(config, args, global).await,
        // Handled before a hub config is resolved
        Command::Setup(_) | Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
