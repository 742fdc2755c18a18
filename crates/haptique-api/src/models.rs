// Wire types for the hub's JSON endpoints.
//
// Field names mirror the firmware's JSON keys. Every field is defaulted so a
// firmware that omits a key still decodes; callers decide how to render the
// absence.

use serde::{Deserialize, Serialize};

// ── Reads ───────────────────────────────────────────────────────────

/// `GET /api/status`: device and network status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusRecord {
    pub hostname: Option<String>,
    /// Firmware version string.
    pub version: Option<String>,
    /// Raw Wi-Fi station state as reported by the ESP32 stack (3 = connected,
    /// 6 = disconnected).
    pub wifi_status: Option<i64>,
    pub ssid: Option<String>,
    pub rssi: Option<i64>,
    pub local_ip: Option<String>,
    pub mac: Option<String>,
    pub gateway: Option<String>,
    pub ap_enabled: bool,
}

/// `GET /api/rf/status`: RF receiver status and the last decoded signal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RfStatusRecord {
    pub rx_count: Option<u64>,
    pub last_code: Option<u64>,
    pub last_bits: Option<u32>,
    pub last_protocol: Option<u32>,
    pub rf_rx_pin: Option<i32>,
    pub rf_tx_pin: Option<i32>,
}

/// A named signal stored on the hub.
///
/// Only `name` is interpreted. Anything else the firmware attaches to the
/// entry is carried along untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCommand {
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SavedCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// `GET /api/{rf,ir}/saved` body. A missing or `null` `commands` key
/// means none.
#[derive(Debug, Deserialize)]
pub(crate) struct SavedList {
    #[serde(default)]
    commands: Option<Vec<SavedCommand>>,
}

impl SavedList {
    pub(crate) fn into_commands(list: Option<Self>) -> Vec<SavedCommand> {
        list.and_then(|l| l.commands).unwrap_or_default()
    }
}

// ── Writes ──────────────────────────────────────────────────────────

/// `POST /api/rf/send` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RfCodeRequest {
    pub code: u64,
    pub bits: u32,
    pub protocol: u32,
    pub repeat: u32,
}

/// `POST /api/ir/send` body: a raw pulse train at a carrier frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrCodeRequest {
    #[serde(rename = "freq")]
    pub frequency: u32,
    #[serde(rename = "duty")]
    pub duty_percent: u32,
    pub raw: Vec<u32>,
}

/// Body shared by every name-addressed endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct NameRequest<'a> {
    pub name: &'a str,
}
