// ── Presentation adapters ──
//
// Thin read-only views over the coordinator's snapshot, shaped the way a
// home-automation host presents a device: five sensors, one access-point
// switch, and one button per saved command. Adapters never cache; every
// read goes to the current snapshot.

use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::{info, warn};

use crate::command::Command;
use crate::coordinator::Coordinator;
use crate::dispatch::Dispatcher;
use crate::snapshot::{Band, DeviceSnapshot};

pub const MANUFACTURER: &str = "KINCONY";
pub const MODEL: &str = "KC868-AG";

const NOT_AVAILABLE: &str = "N/A";

/// Raw `wifi_status` codes reported by the hub's Wi-Fi stack.
const WIFI_CONNECTED: i64 = 3;
const WIFI_DISCONNECTED: i64 = 6;

// ── Device info ──────────────────────────────────────────────────

/// Device registry entry shared by every adapter of one hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub identifier: String,
    pub name: String,
    pub manufacturer: &'static str,
    pub model: &'static str,
    pub sw_version: String,
}

impl DeviceInfo {
    pub fn new(entry_id: &str, title: &str, snapshot: Option<&DeviceSnapshot>) -> Self {
        Self {
            identifier: entry_id.to_owned(),
            name: title.to_owned(),
            manufacturer: MANUFACTURER,
            model: MODEL,
            sw_version: snapshot.map_or("Unknown", DeviceSnapshot::firmware_version).to_owned(),
        }
    }
}

// ── Sensors ──────────────────────────────────────────────────────

/// A rendered sensor state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SensorValue {
    Text(String),
    Count(u64),
}

impl std::fmt::Display for SensorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

/// Renders one field of a snapshot as a sensor.
pub trait SensorEntity {
    /// Suffix appended to the entry id to form the unique id.
    fn key(&self) -> &'static str;
    fn name(&self) -> &'static str;
    fn icon(&self) -> &'static str;
    fn unit(&self) -> Option<&'static str> {
        None
    }
    fn value(&self, snapshot: &DeviceSnapshot) -> SensorValue;
    fn attributes(&self, _snapshot: &DeviceSnapshot) -> Map<String, Value> {
        Map::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::AsRefStr)]
pub enum SensorKind {
    WifiStatus,
    RfReceivedCount,
    FirmwareVersion,
    Hostname,
    IpAddress,
}

fn wifi_label(code: Option<i64>) -> String {
    match code {
        Some(WIFI_CONNECTED) => "Connected".to_owned(),
        Some(WIFI_DISCONNECTED) => "Disconnected".to_owned(),
        Some(other) => format!("Status {other}"),
        None => "Status unknown".to_owned(),
    }
}

fn text_or(value: Option<&String>, fallback: &str) -> Value {
    Value::String(value.map_or(fallback, String::as_str).to_owned())
}

impl SensorEntity for SensorKind {
    fn key(&self) -> &'static str {
        match self {
            Self::WifiStatus => "wifi_status",
            Self::RfReceivedCount => "rf_count",
            Self::FirmwareVersion => "version",
            Self::Hostname => "hostname",
            Self::IpAddress => "ip",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::WifiStatus => "WiFi Status",
            Self::RfReceivedCount => "RF Received Count",
            Self::FirmwareVersion => "Firmware Version",
            Self::Hostname => "Hostname",
            Self::IpAddress => "IP Address",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Self::WifiStatus => "mdi:wifi",
            Self::RfReceivedCount => "mdi:radio-tower",
            Self::FirmwareVersion => "mdi:chip",
            Self::Hostname => "mdi:network",
            Self::IpAddress => "mdi:ip-network",
        }
    }

    fn unit(&self) -> Option<&'static str> {
        match self {
            Self::RfReceivedCount => Some("signals"),
            _ => None,
        }
    }

    fn value(&self, snapshot: &DeviceSnapshot) -> SensorValue {
        let status = &snapshot.status;
        match self {
            Self::WifiStatus => SensorValue::Text(wifi_label(status.wifi_status)),
            Self::RfReceivedCount => SensorValue::Count(snapshot.rx_count()),
            Self::FirmwareVersion => SensorValue::Text(snapshot.firmware_version().to_owned()),
            Self::Hostname => SensorValue::Text(snapshot.hostname().to_owned()),
            Self::IpAddress => SensorValue::Text(
                status.local_ip.clone().unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
            ),
        }
    }

    fn attributes(&self, snapshot: &DeviceSnapshot) -> Map<String, Value> {
        let status = &snapshot.status;
        let rf = &snapshot.rf_status;
        let attrs = match self {
            Self::WifiStatus => json!({
                "ssid": text_or(status.ssid.as_ref(), NOT_AVAILABLE),
                "rssi": status.rssi.unwrap_or(0),
                "local_ip": text_or(status.local_ip.as_ref(), NOT_AVAILABLE),
            }),
            Self::RfReceivedCount => json!({
                "last_code": rf.last_code.unwrap_or(0),
                "last_bits": rf.last_bits.unwrap_or(0),
                "last_protocol": rf.last_protocol.unwrap_or(0),
                "rf_rx_pin": rf.rf_rx_pin.unwrap_or(0),
                "rf_tx_pin": rf.rf_tx_pin.unwrap_or(0),
            }),
            Self::IpAddress => json!({
                "mac": text_or(status.mac.as_ref(), NOT_AVAILABLE),
                "gateway": text_or(status.gateway.as_ref(), NOT_AVAILABLE),
            }),
            Self::FirmwareVersion | Self::Hostname => return Map::new(),
        };
        match attrs {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

/// A sensor bound to one hub's coordinator.
#[derive(Clone)]
pub struct HubSensor {
    coordinator: Coordinator,
    entry_id: String,
    kind: SensorKind,
}

impl HubSensor {
    pub fn new(coordinator: Coordinator, entry_id: &str, kind: SensorKind) -> Self {
        Self {
            coordinator,
            entry_id: entry_id.to_owned(),
            kind,
        }
    }

    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    pub fn unique_id(&self) -> String {
        format!("{}_{}", self.entry_id, self.kind.key())
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn icon(&self) -> &'static str {
        self.kind.icon()
    }

    pub fn unit(&self) -> Option<&'static str> {
        self.kind.unit()
    }

    /// False after a failed cycle. The last known value is still rendered.
    pub fn available(&self) -> bool {
        self.coordinator.last_update_success()
    }

    pub fn value(&self) -> Option<SensorValue> {
        self.coordinator.snapshot().map(|s| self.kind.value(&s))
    }

    pub fn attributes(&self) -> Map<String, Value> {
        self.coordinator
            .snapshot()
            .map(|s| self.kind.attributes(&s))
            .unwrap_or_default()
    }
}

// ── Access-point switch ──────────────────────────────────────────

/// The hub's fallback access point. It can be turned off but the API
/// offers no way to turn it back on.
#[derive(Clone)]
pub struct AccessPointSwitch {
    coordinator: Coordinator,
    dispatcher: Dispatcher,
    entry_id: String,
}

impl AccessPointSwitch {
    pub const NAME: &'static str = "Access Point";
    pub const ICON: &'static str = "mdi:access-point";

    pub fn new(coordinator: Coordinator, dispatcher: Dispatcher, entry_id: &str) -> Self {
        Self {
            coordinator,
            dispatcher,
            entry_id: entry_id.to_owned(),
        }
    }

    pub fn unique_id(&self) -> String {
        format!("{}_ap_switch", self.entry_id)
    }

    pub fn available(&self) -> bool {
        self.coordinator.last_update_success()
    }

    pub fn is_on(&self) -> bool {
        self.coordinator
            .snapshot()
            .is_some_and(|s| s.status.ap_enabled)
    }

    /// Unsupported by the hub; logged and ignored.
    pub fn turn_on(&self) {
        warn!(entity = %self.unique_id(), "turning the access point on is not supported by the hub");
    }

    /// Disable the access point. The dispatcher requests a refresh on
    /// success so `is_on` catches up; failures are logged by the dispatcher.
    pub async fn turn_off(&self) {
        let _ = self.dispatcher.execute(Command::DisableAp).await;
    }
}

// ── Saved-command buttons ────────────────────────────────────────

/// One button per command saved on the hub.
#[derive(Clone)]
pub struct SavedCommandButton {
    dispatcher: Dispatcher,
    entry_id: String,
    band: Band,
    command_name: String,
}

impl SavedCommandButton {
    pub fn new(dispatcher: Dispatcher, entry_id: &str, band: Band, command_name: &str) -> Self {
        Self {
            dispatcher,
            entry_id: entry_id.to_owned(),
            band,
            command_name: command_name.to_owned(),
        }
    }

    /// One button per saved command in the snapshot, RF first.
    pub fn for_snapshot(dispatcher: &Dispatcher, entry_id: &str, snapshot: &DeviceSnapshot) -> Vec<Self> {
        [Band::Rf, Band::Ir]
            .into_iter()
            .flat_map(|band| {
                snapshot
                    .saved(band)
                    .iter()
                    .map(move |cmd| Self::new(dispatcher.clone(), entry_id, band, &cmd.name))
            })
            .collect()
    }

    pub fn band(&self) -> Band {
        self.band
    }

    pub fn command_name(&self) -> &str {
        &self.command_name
    }

    pub fn name(&self) -> String {
        format!("{} {}", self.band, self.command_name)
    }

    pub fn unique_id(&self) -> String {
        format!(
            "{}_{}_{}",
            self.entry_id,
            self.band.as_ref().to_lowercase(),
            self.command_name
        )
    }

    /// Send the saved command. Failures are logged, never raised.
    pub async fn press(&self) {
        let name = self.command_name.clone();
        let cmd = match self.band {
            Band::Rf => Command::SendRfSaved { name },
            Band::Ir => Command::SendIrSaved { name },
        };
        if self.dispatcher.execute(cmd).await.is_ok() {
            info!(band = %self.band, command = %self.command_name, "saved command sent");
        }
    }
}
