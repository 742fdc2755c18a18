//! Access point handlers.

use haptique_core::{CommandKind, HubConfig};

use crate::cli::{ApArgs, ApCommand, GlobalOpts};
use crate::error::CliError;

use super::util::{self, Params};

pub async fn handle(config: HubConfig, args: ApArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ApCommand::Disable => {
            if !util::confirm(
                "Disable the hub's access point? It cannot be re-enabled over the API.",
                "ap disable",
                global.yes,
            )? {
                return Ok(());
            }
            util::send(
                config,
                CommandKind::DisableAp,
                Params::default(),
                "access point disabled",
                global,
            )
            .await
        }
    }
}
