//! RF command handlers.

use haptique_core::{CommandKind, HubConfig};

use crate::cli::{GlobalOpts, RfArgs, RfCommand};
use crate::error::CliError;

use super::util::{self, Params};

pub async fn handle(config: HubConfig, args: RfArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        RfCommand::SendCode {
            code,
            bits,
            protocol,
            repeat,
        } => {
            let params = Params::default()
                .with("code", code)
                .with_opt("bits", bits)
                .with_opt("protocol", protocol)
                .with_opt("repeat", repeat);
            let msg = format!("RF code {code} sent");
            util::send(config, CommandKind::SendRfCode, params, &msg, global).await
        }

        RfCommand::Send { name } => {
            let msg = format!("RF command '{name}' sent");
            util::send(config, CommandKind::SendRfSaved, Params::name(&name), &msg, global).await
        }

        RfCommand::Save { name } => {
            let msg = format!("last RF signal saved as '{name}'");
            util::send(config, CommandKind::SaveRfLast, Params::name(&name), &msg, global).await
        }

        RfCommand::Delete { name } => {
            if !util::confirm(
                &format!("Delete saved RF command '{name}'?"),
                "rf delete",
                global.yes,
            )? {
                return Ok(());
            }
            let msg = format!("RF command '{name}' deleted");
            util::send(config, CommandKind::DeleteRfCommand, Params::name(&name), &msg, global)
                .await
        }
    }
}
