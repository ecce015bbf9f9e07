pub mod export;
pub mod init;
pub mod log;
pub mod session;
pub mod summary;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use spotlight_core::config::{load_config_from, SpotlightConfig};
use spotlight_store::JsonlStore;

/// Load the config and open the attendance log it names.
pub(crate) fn open(config: Option<PathBuf>) -> Result<(SpotlightConfig, Arc<JsonlStore>)> {
    let config = load_config_from(config.as_deref())?;
    let store = Arc::new(JsonlStore::new(config.log_path.clone()));
    Ok((config, store))
}
