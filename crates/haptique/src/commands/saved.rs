//! `saved`: list the commands stored on the hub.

use serde::Serialize;
use tabled::Tabled;

use haptique_core::{Band, HubConfig, HubContext};

use crate::cli::{BandArg, GlobalOpts, SavedArgs};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct SavedEntry {
    band: Band,
    name: String,
    button_id: String,
}

#[derive(Tabled)]
struct SavedRow {
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Button ID")]
    button_id: String,
}

impl From<&SavedEntry> for SavedRow {
    fn from(e: &SavedEntry) -> Self {
        Self {
            band: e.band.to_string(),
            name: e.name.clone(),
            button_id: e.button_id.clone(),
        }
    }
}

pub async fn handle(config: HubConfig, args: SavedArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let wanted = args.band.map(|b| match b {
        BandArg::Rf => Band::Rf,
        BandArg::Ir => Band::Ir,
    });

    let entries = HubContext::oneshot(config, |ctx| async move {
        let entries = ctx
            .entities()
            .buttons
            .iter()
            .filter(|b| wanted.is_none_or(|band| b.band() == band))
            .map(|b| SavedEntry {
                band: b.band(),
                name: b.command_name().to_owned(),
                button_id: b.unique_id(),
            })
            .collect::<Vec<_>>();
        Ok(entries)
    })
    .await?;

    let out = output::render_list(&global.output, &entries, |e| SavedRow::from(e), |e| e.name.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
