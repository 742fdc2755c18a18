// haptique-core: Polling coordinator and command surface for the Haptique IR/RF hub
//
// Sits between `haptique-api` (raw HTTP) and whatever hosts the hub
// (the CLI, or an automation runtime). Owns the polling loop, the
// published snapshot, command validation, and the entity adapters.

pub mod command;
pub mod config;
pub mod coordinator;
pub mod dispatch;
pub mod entity;
pub mod error;
pub mod hub;
pub mod setup;
pub mod snapshot;

// ── Primary re-exports ──────────────────────────────────────────
pub use command::{Command, CommandKind, CommandResult};
pub use config::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, HubConfig};
pub use coordinator::{Coordinator, CoordinatorState, CoordinatorUpdate};
pub use dispatch::Dispatcher;
pub use entity::{
    AccessPointSwitch, DeviceInfo, HubSensor, SavedCommandButton, SensorEntity, SensorKind,
    SensorValue,
};
pub use error::CoreError;
pub use hub::{Entities, HubContext};
pub use setup::{SetupError, SetupInfo};
pub use snapshot::{Band, DeviceSnapshot};

// Wire records are part of the snapshot's public shape.
pub use haptique_api::{IrCodeRequest, RfCodeRequest, RfStatusRecord, SavedCommand, StatusRecord};
