//! `status`: one poll cycle rendered as sensors.

use serde::Serialize;
use serde_json::{Map, Value};
use tabled::Tabled;

use haptique_core::{DeviceInfo, Entities, HubConfig, HubContext, SensorValue};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── View model ──────────────────────────────────────────────────────

#[derive(Serialize)]
struct SensorView {
    unique_id: String,
    name: &'static str,
    value: Option<SensorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<&'static str>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    attributes: Map<String, Value>,
}

#[derive(Serialize)]
struct StatusView {
    device: DeviceInfo,
    available: bool,
    access_point: bool,
    sensors: Vec<SensorView>,
    saved_rf: usize,
    saved_ir: usize,
    fetched_at: Option<String>,
}

#[derive(Tabled)]
struct SensorRow {
    #[tabled(rename = "Sensor")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Details")]
    details: String,
}

impl From<&SensorView> for SensorRow {
    fn from(s: &SensorView) -> Self {
        let value = match (&s.value, s.unit) {
            (Some(v), Some(unit)) => format!("{v} {unit}"),
            (Some(v), None) => v.to_string(),
            (None, _) => "-".into(),
        };
        let details = s
            .attributes
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => format!("{k}: {s}"),
                other => format!("{k}: {other}"),
            })
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            name: s.name.to_owned(),
            value,
            details,
        }
    }
}

fn build_view(ctx: &HubContext, entities: &Entities) -> StatusView {
    let snapshot = ctx.snapshot();
    StatusView {
        device: entities.device.clone(),
        available: ctx.coordinator().last_update_success(),
        access_point: entities.access_point.is_on(),
        sensors: entities
            .sensors
            .iter()
            .map(|s| SensorView {
                unique_id: s.unique_id(),
                name: s.name(),
                value: s.value(),
                unit: s.unit(),
                attributes: s.attributes(),
            })
            .collect(),
        saved_rf: snapshot.as_ref().map_or(0, |s| s.rf_saved.len()),
        saved_ir: snapshot.as_ref().map_or(0, |s| s.ir_saved.len()),
        fetched_at: snapshot.map(|s| s.fetched_at.to_rfc3339()),
    }
}

fn detail(view: &StatusView) -> String {
    let rows: Vec<SensorRow> = view.sensors.iter().map(SensorRow::from).collect();
    let header = [
        format!("Hub:          {}", view.device.name),
        format!(
            "Model:        {} {} (firmware {})",
            view.device.manufacturer, view.device.model, view.device.sw_version
        ),
        format!(
            "Access point: {}",
            if view.access_point { "on" } else { "off" }
        ),
        format!("Saved:        {} RF, {} IR", view.saved_rf, view.saved_ir),
    ];
    format!("{}\n{}", header.join("\n"), output::render_table(&rows))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(config: HubConfig, global: &GlobalOpts) -> Result<(), CliError> {
    let view = HubContext::oneshot(config, |ctx| async move {
        let entities = ctx.entities();
        Ok(build_view(&ctx, &entities))
    })
    .await?;

    let out = output::render_single(&global.output, &view, detail, |v| {
        v.sensors
            .iter()
            .map(|s| {
                let value = s.value.as_ref().map_or_else(|| "-".into(), ToString::to_string);
                format!("{}\t{value}", s.unique_id)
            })
            .collect::<Vec<_>>()
            .join("\n")
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
