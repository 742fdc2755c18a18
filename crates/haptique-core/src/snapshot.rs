// ── Device snapshot ──
//
// The merged view of one successful poll cycle. Built once, shared behind
// an `Arc`, replaced wholesale by the next successful cycle.

use chrono::{DateTime, Utc};
use serde::Serialize;

use haptique_api::{RfStatusRecord, SavedCommand, StatusRecord};

/// Which radio a saved command or signal belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Band {
    Rf,
    Ir,
}

/// Immutable record of all polled device state as of one cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceSnapshot {
    pub status: StatusRecord,
    pub rf_status: RfStatusRecord,
    pub rf_saved: Vec<SavedCommand>,
    pub ir_saved: Vec<SavedCommand>,
    /// When the cycle that produced this snapshot completed.
    pub fetched_at: DateTime<Utc>,
}

impl DeviceSnapshot {
    pub fn new(
        status: StatusRecord,
        rf_status: RfStatusRecord,
        rf_saved: Vec<SavedCommand>,
        ir_saved: Vec<SavedCommand>,
    ) -> Self {
        Self {
            status,
            rf_status,
            rf_saved,
            ir_saved,
            fetched_at: Utc::now(),
        }
    }

    /// Saved commands for one band, in device order.
    pub fn saved(&self, band: Band) -> &[SavedCommand] {
        match band {
            Band::Rf => &self.rf_saved,
            Band::Ir => &self.ir_saved,
        }
    }

    /// Look up a saved command by name within a band.
    pub fn find_saved(&self, band: Band, name: &str) -> Option<&SavedCommand> {
        self.saved(band).iter().find(|c| c.name == name)
    }

    /// Signals received since boot; 0 when the hub leaves it out.
    pub fn rx_count(&self) -> u64 {
        self.rf_status.rx_count.unwrap_or(0)
    }

    pub fn hostname(&self) -> &str {
        self.status.hostname.as_deref().unwrap_or("Unknown")
    }

    pub fn firmware_version(&self) -> &str {
        self.status.version.as_deref().unwrap_or("Unknown")
    }
}
