// ── Command dispatcher ──
//
// Routes each `Command` to the matching `HubClient` write. Failures are
// logged and returned as values; they never poison later commands, and
// commands stay attemptable whatever state the coordinator is in.

use serde_json::{Map, Value};
use tracing::{debug, error};

use haptique_api::HubClient;

use crate::command::{Command, CommandKind, CommandResult};
use crate::coordinator::Coordinator;
use crate::error::CoreError;

#[derive(Clone)]
pub struct Dispatcher {
    client: HubClient,
    coordinator: Coordinator,
}

impl Dispatcher {
    pub fn new(client: HubClient, coordinator: Coordinator) -> Self {
        Self { client, coordinator }
    }

    /// Validate an untyped parameter map and execute the resulting command.
    pub async fn dispatch(
        &self,
        kind: CommandKind,
        params: &Map<String, Value>,
    ) -> Result<CommandResult, CoreError> {
        let cmd = Command::from_params(kind, params).inspect_err(|e| {
            error!(command = %kind, error = %e, "rejected command parameters");
        })?;
        self.execute(cmd).await
    }

    /// Execute a typed command against the hub.
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        let kind = cmd.kind();
        debug!(command = %kind, "executing command");

        let ack = match self.route(&cmd).await {
            Ok(ack) => ack,
            Err(e) => {
                let e = CoreError::from(e);
                error!(command = %kind, error = %e, "command failed");
                return Err(e);
            }
        };

        let refresh_requested = cmd.requests_refresh();
        if refresh_requested {
            self.coordinator.request_refresh();
        }

        Ok(CommandResult {
            command: kind.into(),
            ack,
            refresh_requested,
        })
    }

    async fn route(&self, cmd: &Command) -> Result<Value, haptique_api::Error> {
        let client = &self.client;
        match cmd {
            Command::SendRfCode(req) => client.send_rf_code(req).await,
            Command::SendRfSaved { name } => client.send_rf_saved(name).await,
            Command::SaveRfLast { name } => client.save_rf_command(name).await,
            Command::DeleteRfCommand { name } => client.delete_rf_command(name).await,
            Command::SendIrCode(req) => client.send_ir_code(req).await,
            Command::SendIrSaved { name } => client.send_ir_saved(name).await,
            Command::SaveIrLast { name } => client.save_ir_command(name).await,
            Command::DeleteIrCommand { name } => client.delete_ir_command(name).await,
            Command::DisableAp => client.disable_ap().await,
        }
    }
}
