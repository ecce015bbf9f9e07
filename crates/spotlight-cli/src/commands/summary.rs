//! The `spotlight summary` command.

use std::path::PathBuf;

use anyhow::Result;

use spotlight_core::engine::load_records;
use spotlight_core::summary::summarize;
use spotlight_core::SpotlightError;

use crate::theme::{summary_table, Theme};

pub async fn execute(json: bool, config: Option<PathBuf>) -> Result<()> {
    let (config, store) = super::open(config)?;

    let records = match load_records(store.as_ref()).await {
        Ok(records) => records,
        Err(SpotlightError::NoData) => {
            println!("No records yet.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let summary = summarize(&records, config.roster_size);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let theme = Theme::from_dark_mode(config.dark_mode);
        println!("{}", summary_table(&summary, theme));
    }
    Ok(())
}
