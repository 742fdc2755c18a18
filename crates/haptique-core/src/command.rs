// ── Command API ──
//
// Every write against the hub flows through the `Command` enum. Commands
// arrive either typed (from Rust callers) or as an untyped parameter map
// (from an automation host or the CLI); `Command::from_params` validates
// the map and fills in defaults.

use serde::Serialize;
use serde_json::{Map, Value};

use haptique_api::{IrCodeRequest, RfCodeRequest};

use crate::error::CoreError;

// ── Parameter defaults ──────────────────────────────────────────────

pub const DEFAULT_RF_BITS: u32 = 24;
pub const DEFAULT_RF_PROTOCOL: u32 = 1;
pub const DEFAULT_RF_REPEAT: u32 = 8;
pub const DEFAULT_IR_FREQUENCY: u32 = 38_000;
pub const DEFAULT_IR_DUTY: u32 = 33;

/// Command names as exposed to the invoking system.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum CommandKind {
    SendRfCode,
    SendRfSaved,
    SendIrCode,
    SendIrSaved,
    SaveRfLast,
    SaveIrLast,
    DeleteRfCommand,
    DeleteIrCommand,
    DisableAp,
}

/// All write operations against a hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // ── RF ───────────────────────────────────────────────────────────
    SendRfCode(RfCodeRequest),
    SendRfSaved { name: String },
    /// Store the most recently received RF signal under `name`.
    SaveRfLast { name: String },
    DeleteRfCommand { name: String },

    // ── IR ───────────────────────────────────────────────────────────
    SendIrCode(IrCodeRequest),
    SendIrSaved { name: String },
    SaveIrLast { name: String },
    DeleteIrCommand { name: String },

    // ── System ───────────────────────────────────────────────────────
    DisableAp,
}

/// Outcome of a successfully executed command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandResult {
    pub command: &'static str,
    /// Raw acknowledgement body from the hub (`null` when empty).
    pub ack: Value,
    /// Whether a coordinator refresh was requested afterwards.
    pub refresh_requested: bool,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::SendRfCode(_) => CommandKind::SendRfCode,
            Self::SendRfSaved { .. } => CommandKind::SendRfSaved,
            Self::SaveRfLast { .. } => CommandKind::SaveRfLast,
            Self::DeleteRfCommand { .. } => CommandKind::DeleteRfCommand,
            Self::SendIrCode(_) => CommandKind::SendIrCode,
            Self::SendIrSaved { .. } => CommandKind::SendIrSaved,
            Self::SaveIrLast { .. } => CommandKind::SaveIrLast,
            Self::DeleteIrCommand { .. } => CommandKind::DeleteIrCommand,
            Self::DisableAp => CommandKind::DisableAp,
        }
    }

    /// Only a change to the hub's own network setup warrants re-polling;
    /// saves and deletes show up on the next scheduled cycle.
    pub fn requests_refresh(&self) -> bool {
        matches!(self, Self::DisableAp)
    }

    /// Build a command from an untyped parameter map.
    ///
    /// Missing optional parameters take their defaults. Missing required
    /// ones, wrong types, and out-of-range values fail with
    /// [`CoreError::Validation`].
    pub fn from_params(kind: CommandKind, params: &Map<String, Value>) -> Result<Self, CoreError> {
        let cmd = match kind {
            CommandKind::SendRfCode => Self::SendRfCode(RfCodeRequest {
                code: required_u64(params, "code")?,
                bits: optional_u32(params, "bits", DEFAULT_RF_BITS)?,
                protocol: optional_u32(params, "protocol", DEFAULT_RF_PROTOCOL)?,
                repeat: optional_u32(params, "repeat", DEFAULT_RF_REPEAT)?,
            }),
            CommandKind::SendIrCode => Self::SendIrCode(IrCodeRequest {
                frequency: optional_u32(params, "frequency", DEFAULT_IR_FREQUENCY)?,
                duty_percent: optional_u32(params, "duty", DEFAULT_IR_DUTY)?,
                raw: optional_u32_list(params, "raw_data")?,
            }),
            CommandKind::SendRfSaved => Self::SendRfSaved {
                name: required_name(params)?,
            },
            CommandKind::SendIrSaved => Self::SendIrSaved {
                name: required_name(params)?,
            },
            CommandKind::SaveRfLast => Self::SaveRfLast {
                name: required_name(params)?,
            },
            CommandKind::SaveIrLast => Self::SaveIrLast {
                name: required_name(params)?,
            },
            CommandKind::DeleteRfCommand => Self::DeleteRfCommand {
                name: required_name(params)?,
            },
            CommandKind::DeleteIrCommand => Self::DeleteIrCommand {
                name: required_name(params)?,
            },
            CommandKind::DisableAp => Self::DisableAp,
        };
        Ok(cmd)
    }
}

// ── Parameter extraction ────────────────────────────────────────────

/// Integers may arrive as JSON numbers or as decimal strings.
fn as_u64(field: &str, value: &Value) -> Result<u64, CoreError> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| CoreError::validation(field, format!("expected a non-negative integer, got {n}"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| CoreError::validation(field, format!("expected a non-negative integer, got \"{s}\""))),
        other => Err(CoreError::validation(
            field,
            format!("expected a non-negative integer, got {other}"),
        )),
    }
}

fn as_u32(field: &str, value: &Value) -> Result<u32, CoreError> {
    let wide = as_u64(field, value)?;
    u32::try_from(wide).map_err(|_| CoreError::validation(field, format!("{wide} is out of range")))
}

fn required_u64(params: &Map<String, Value>, field: &str) -> Result<u64, CoreError> {
    match params.get(field) {
        None | Some(Value::Null) => Err(CoreError::validation(field, "required parameter is missing")),
        Some(value) => as_u64(field, value),
    }
}

fn optional_u32(params: &Map<String, Value>, field: &str, default: u32) -> Result<u32, CoreError> {
    match params.get(field) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => as_u32(field, value),
    }
}

fn optional_u32_list(params: &Map<String, Value>, field: &str) -> Result<Vec<u32>, CoreError> {
    match params.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items.iter().map(|v| as_u32(field, v)).collect(),
        Some(other) => Err(CoreError::validation(
            field,
            format!("expected a list of integers, got {other}"),
        )),
    }
}

fn required_name(params: &Map<String, Value>) -> Result<String, CoreError> {
    match params.get("name") {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(CoreError::validation("name", "must not be empty")),
        None | Some(Value::Null) => Err(CoreError::validation("name", "required parameter is missing")),
        Some(other) => Err(CoreError::validation("name", format!("expected a string, got {other}"))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use strum::IntoEnumIterator;

    use super::*;

    fn params(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn rf_code_fills_defaults() {
        let cmd = Command::from_params(CommandKind::SendRfCode, &params(json!({ "code": 12345 }))).unwrap();
        assert_eq!(
            cmd,
            Command::SendRfCode(RfCodeRequest {
                code: 12345,
                bits: 24,
                protocol: 1,
                repeat: 8,
            })
        );
    }

    #[test]
    fn rf_code_requires_code() {
        let err = Command::from_params(CommandKind::SendRfCode, &params(json!({ "bits": 12 }))).unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "code"));
    }

    #[test]
    fn rf_code_rejects_negative_and_oversized_values() {
        let negative = Command::from_params(CommandKind::SendRfCode, &params(json!({ "code": -1 })));
        assert!(matches!(negative, Err(CoreError::Validation { .. })));

        let wide = Command::from_params(
            CommandKind::SendRfCode,
            &params(json!({ "code": 1, "bits": 5_000_000_000_u64 })),
        );
        assert!(matches!(wide, Err(CoreError::Validation { ref field, .. }) if field == "bits"));
    }

    #[test]
    fn integers_accept_decimal_strings() {
        let cmd = Command::from_params(
            CommandKind::SendRfCode,
            &params(json!({ "code": "42", "repeat": "3" })),
        )
        .unwrap();
        match cmd {
            Command::SendRfCode(req) => {
                assert_eq!(req.code, 42);
                assert_eq!(req.repeat, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn ir_code_defaults_to_empty_pulse_train() {
        let cmd = Command::from_params(CommandKind::SendIrCode, &Map::new()).unwrap();
        assert_eq!(
            cmd,
            Command::SendIrCode(IrCodeRequest {
                frequency: 38_000,
                duty_percent: 33,
                raw: Vec::new(),
            })
        );
    }

    #[test]
    fn ir_code_rejects_non_integer_pulses() {
        let err = Command::from_params(
            CommandKind::SendIrCode,
            &params(json!({ "raw_data": [9000, "x"] })),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "raw_data"));
    }

    #[test]
    fn name_commands_require_non_empty_name() {
        for kind in [CommandKind::SendRfSaved, CommandKind::SaveIrLast, CommandKind::DeleteRfCommand] {
            let missing = Command::from_params(kind, &Map::new());
            assert!(matches!(missing, Err(CoreError::Validation { .. })), "{kind}");

            let blank = Command::from_params(kind, &params(json!({ "name": "  " })));
            assert!(matches!(blank, Err(CoreError::Validation { .. })), "{kind}");
        }
    }

    #[test]
    fn kind_round_trips_through_names() {
        for kind in CommandKind::iter() {
            let name = kind.to_string();
            assert_eq!(name.parse::<CommandKind>().unwrap(), kind);
        }
        assert_eq!(CommandKind::SaveRfLast.to_string(), "save_rf_last");
    }

    #[test]
    fn only_disable_ap_requests_refresh() {
        assert!(Command::DisableAp.requests_refresh());
        assert!(!Command::SaveRfLast { name: "x".into() }.requests_refresh());
        assert!(!Command::DeleteIrCommand { name: "x".into() }.requests_refresh());
    }
}
