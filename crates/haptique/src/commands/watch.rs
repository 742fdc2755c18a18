//! `watch`: run the coordinator and print each update until Ctrl-C.

use std::time::Duration;

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;

use haptique_core::{CoordinatorUpdate, HubConfig, HubContext};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output;

/// One line of watch output.
#[derive(Serialize)]
struct WatchEvent {
    at: DateTime<Utc>,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    wifi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rx_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved: Option<(usize, usize)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    consecutive_failures: Option<u32>,
}

impl WatchEvent {
    fn from_update(update: &CoordinatorUpdate) -> Option<Self> {
        let event = match update {
            CoordinatorUpdate::Pending => return None,
            CoordinatorUpdate::Published { snapshot } => Self {
                at: snapshot.fetched_at,
                outcome: "published",
                wifi: snapshot.status.ssid.clone(),
                rx_count: Some(snapshot.rx_count()),
                saved: Some((snapshot.rf_saved.len(), snapshot.ir_saved.len())),
                error: None,
                consecutive_failures: None,
            },
            CoordinatorUpdate::Failed {
                error,
                consecutive_failures,
            } => Self {
                at: Utc::now(),
                outcome: "failed",
                wifi: None,
                rx_count: None,
                saved: None,
                error: Some(error.to_string()),
                consecutive_failures: Some(*consecutive_failures),
            },
        };
        Some(event)
    }

    fn to_line(&self, color: bool) -> String {
        let time = self.at.format("%H:%M:%S").to_string();
        let body = match (self.rx_count, self.saved, &self.error) {
            (Some(rx), Some((rf, ir)), _) => format!(
                "rx_count={rx} saved={rf} RF/{ir} IR ssid={}",
                self.wifi.as_deref().unwrap_or("-")
            ),
            (_, _, Some(err)) => format!(
                "{err} (failures: {})",
                self.consecutive_failures.unwrap_or_default()
            ),
            _ => String::new(),
        };
        let outcome = match (color, self.error.is_some()) {
            (false, _) => self.outcome.to_owned(),
            (true, true) => self.outcome.red().to_string(),
            (true, false) => self.outcome.green().to_string(),
        };
        format!("{time} {outcome:>9} {body}")
    }
}

fn emit(update: &CoordinatorUpdate, global: &GlobalOpts, color: bool) {
    let Some(event) = WatchEvent::from_update(update) else {
        return;
    };
    let line = match global.output {
        OutputFormat::Table | OutputFormat::Plain => event.to_line(color),
        // Streamed output is one JSON document per line.
        OutputFormat::Json | OutputFormat::JsonCompact | OutputFormat::Yaml => {
            output::render_json(&event, true)
        }
    };
    output::print_output(&line, global.quiet);
}

pub async fn handle(
    mut config: HubConfig,
    args: WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if let Some(secs) = args.interval {
        if secs == 0 {
            return Err(CliError::Validation {
                field: "interval".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        config.poll_interval = Duration::from_secs(secs);
    }

    let ctx = HubContext::setup(config).await?;
    let color = output::should_color(&global.color);
    let mut updates = ctx.coordinator().subscribe();

    emit(&updates.borrow_and_update().clone(), global, color);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let update = updates.borrow_and_update().clone();
                emit(&update, global, color);
            }
        }
    }

    ctx.shutdown().await;
    Ok(())
}
