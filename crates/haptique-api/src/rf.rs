// RF endpoints
//
// Receiver status, the saved-command store, and raw/named transmission
// on the 433 MHz side of the hub.

use tracing::debug;

use crate::client::HubClient;
use crate::error::Error;
use crate::models::{NameRequest, RfCodeRequest, RfStatusRecord, SavedCommand, SavedList};

impl HubClient {
    /// Get RF receiver status and the last decoded signal.
    ///
    /// `GET /api/rf/status`
    pub async fn get_rf_status(&self) -> Result<RfStatusRecord, Error> {
        self.get("api/rf/status").await
    }

    /// List saved RF commands. Empty if the hub omits `commands` or sends `null`.
    ///
    /// `GET /api/rf/saved`
    pub async fn get_rf_saved(&self) -> Result<Vec<SavedCommand>, Error> {
        let list: Option<SavedList> = self.get("api/rf/saved").await?;
        Ok(SavedList::into_commands(list))
    }

    /// Transmit a raw RF code.
    ///
    /// `POST /api/rf/send` with `{"code", "bits", "protocol", "repeat"}`
    pub async fn send_rf_code(&self, request: &RfCodeRequest) -> Result<serde_json::Value, Error> {
        debug!(
            code = request.code,
            bits = request.bits,
            protocol = request.protocol,
            repeat = request.repeat,
            "sending RF code"
        );
        self.post("api/rf/send", request).await
    }

    /// Transmit a saved RF command by name.
    ///
    /// `POST /api/rf/send/name` with `{"name"}`
    pub async fn send_rf_saved(&self, name: &str) -> Result<serde_json::Value, Error> {
        debug!(name, "sending saved RF command");
        self.post("api/rf/send/name", &NameRequest { name }).await
    }

    /// Store the last received RF signal under `name`.
    ///
    /// `POST /api/rf/save` with `{"name"}`
    pub async fn save_rf_command(&self, name: &str) -> Result<serde_json::Value, Error> {
        debug!(name, "saving last RF signal");
        self.post("api/rf/save", &NameRequest { name }).await
    }

    /// Remove a saved RF command.
    ///
    /// `DELETE /api/rf/delete` with `{"name"}`
    pub async fn delete_rf_command(&self, name: &str) -> Result<serde_json::Value, Error> {
        debug!(name, "deleting saved RF command");
        self.delete("api/rf/delete", &NameRequest { name }).await
    }
}
