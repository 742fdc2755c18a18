// haptique-api: Async Rust client for the Haptique IR/RF hub HTTP API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod ir;
mod rf;
mod system;

pub use client::HubClient;
pub use error::Error;
pub use models::{IrCodeRequest, RfCodeRequest, RfStatusRecord, SavedCommand, StatusRecord};
pub use transport::TransportConfig;
