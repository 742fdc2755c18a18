//! IR command handlers.

use haptique_core::{CommandKind, HubConfig};

use crate::cli::{GlobalOpts, IrArgs, IrCommand};
use crate::error::CliError;

use super::util::{self, Params};

pub async fn handle(config: HubConfig, args: IrArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        IrCommand::SendCode {
            raw,
            frequency,
            duty,
        } => {
            let pulses = raw.len();
            let params = Params::default()
                .with("raw_data", raw)
                .with_opt("frequency", frequency)
                .with_opt("duty", duty);
            let msg = format!("IR pulse train sent ({pulses} timings)");
            util::send(config, CommandKind::SendIrCode, params, &msg, global).await
        }

        IrCommand::Send { name } => {
            let msg = format!("IR command '{name}' sent");
            util::send(config, CommandKind::SendIrSaved, Params::name(&name), &msg, global).await
        }

        IrCommand::Save { name } => {
            let msg = format!("last IR signal saved as '{name}'");
            util::send(config, CommandKind::SaveIrLast, Params::name(&name), &msg, global).await
        }

        IrCommand::Delete { name } => {
            if !util::confirm(
                &format!("Delete saved IR command '{name}'?"),
                "ir delete",
                global.yes,
            )? {
                return Ok(());
            }
            let msg = format!("IR command '{name}' deleted");
            util::send(config, CommandKind::DeleteIrCommand, Params::name(&name), &msg, global)
                .await
        }
    }
}
