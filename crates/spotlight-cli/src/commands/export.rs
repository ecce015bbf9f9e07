//! The `spotlight export` command.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;

use spotlight_core::engine::load_records;
use spotlight_core::SpotlightError;
use spotlight_report::{write_report, ExportFormat};

pub async fn execute(
    output: Option<PathBuf>,
    format: String,
    config: Option<PathBuf>,
) -> Result<()> {
    let format: ExportFormat = format.parse().map_err(anyhow::Error::msg)?;
    let (config, store) = super::open(config)?;

    let records = match load_records(store.as_ref()).await {
        Ok(records) => records,
        Err(SpotlightError::NoData) => {
            println!("No data available to download yet.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let dir = output.unwrap_or(config.export_dir);
    let path = write_report(
        &records,
        config.roster_size,
        &dir,
        format,
        Local::now().date_naive(),
    )?;
    println!("Report written to {} ({} rows)", path.display(), records.len());
    Ok(())
}
