// System endpoints
//
// Device/network status and the access-point toggle.

use tracing::debug;

use crate::client::HubClient;
use crate::error::Error;
use crate::models::StatusRecord;

impl HubClient {
    /// Get device and network status.
    ///
    /// `GET /api/status`
    pub async fn get_status(&self) -> Result<StatusRecord, Error> {
        self.get("api/status").await
    }

    /// Turn off the hub's configuration access point.
    ///
    /// `POST /api/ap/disable`. There is no matching enable endpoint; the AP
    /// comes back only through the device itself.
    pub async fn disable_ap(&self) -> Result<serde_json::Value, Error> {
        debug!("disabling access point");
        self.post_empty("api/ap/disable").await
    }
}
