//! The `spotlight session` command.

use std::path::PathBuf;

use anyhow::Result;
use tokio::io::BufReader;
use tracing::Instrument;

use spotlight_core::engine::Arena;

use crate::console::Console;

pub async fn execute(config: Option<PathBuf>) -> Result<()> {
    let (config, store) = super::open(config)?;
    let arena = Arena::new(config.roster_size, store, config.spin_frames);

    let span = tracing::info_span!("session", id = %arena.session().id());
    tracing::info!(
        parent: &span,
        roster = config.roster_size,
        log = %config.log_path.display(),
        "session started"
    );

    let mut console = Console::new(arena, config, std::io::stdout());
    console
        .run(BufReader::new(tokio::io::stdin()))
        .instrument(span)
        .await
}
