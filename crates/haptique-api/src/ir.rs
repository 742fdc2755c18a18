// IR endpoints

use tracing::debug;

use crate::client::HubClient;
use crate::error::Error;
use crate::models::{IrCodeRequest, NameRequest, SavedCommand, SavedList};

impl HubClient {
    /// List saved IR commands. Empty if the hub omits `commands` or sends `null`.
    ///
    /// `GET /api/ir/saved`
    pub async fn get_ir_saved(&self) -> Result<Vec<SavedCommand>, Error> {
        let list: Option<SavedList> = self.get("api/ir/saved").await?;
        Ok(SavedList::into_commands(list))
    }

    /// Transmit a raw IR waveform.
    ///
    /// `POST /api/ir/send` with `{"freq", "duty", "raw"}`
    pub async fn send_ir_code(&self, request: &IrCodeRequest) -> Result<serde_json::Value, Error> {
        debug!(
            frequency = request.frequency,
            duty = request.duty_percent,
            pulses = request.raw.len(),
            "sending IR code"
        );
        self.post("api/ir/send", request).await
    }

    /// `POST /api/ir/send/name` with `{"name"}`
    pub async fn send_ir_saved(&self, name: &str) -> Result<serde_json::Value, Error> {
        debug!(name, "sending saved IR command");
        self.post("api/ir/send/name", &NameRequest { name }).await
    }

    /// `POST /api/ir/save` with `{"name"}`
    pub async fn save_ir_command(&self, name: &str) -> Result<serde_json::Value, Error> {
        debug!(name, "saving last IR signal");
        self.post("api/ir/save", &NameRequest { name }).await
    }

    /// `DELETE /api/ir/delete` with `{"name"}`
    pub async fn delete_ir_command(&self, name: &str) -> Result<serde_json::Value, Error> {
        debug!(name, "deleting saved IR command");
        self.delete("api/ir/delete", &NameRequest { name }).await
    }
}
