//! The `spotlight log` command.

use std::path::PathBuf;

use anyhow::Result;

use spotlight_core::engine::load_records;
use spotlight_core::SpotlightError;

use crate::theme::{records_table, Theme};

pub async fn execute(limit: Option<usize>, config: Option<PathBuf>) -> Result<()> {
    let (config, store) = super::open(config)?;

    let records = match load_records(store.as_ref()).await {
        Ok(records) => records,
        Err(SpotlightError::NoData) => {
            println!("No records yet.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let skip = limit.map_or(0, |n| records.len().saturating_sub(n));
    let theme = Theme::from_dark_mode(config.dark_mode);
    println!("{}", records_table(&records[skip..], theme));
    println!("{} of {} record(s)", records.len() - skip, records.len());
    Ok(())
}
