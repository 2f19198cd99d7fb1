use log::{error, info};
use std::path::PathBuf;

use isleweave::utils::fs::remove_directory;

use crate::cli::commands::load_site_config;
use crate::cli::types::SourceArgs;

/// Handle the clean command
pub fn handle_clean_command(site_args: &SourceArgs, destination: Option<&PathBuf>) -> bool {
    let config = match load_site_config(site_args) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config: {}", e);
            return false;
        }
    };

    let destination = destination.cloned().unwrap_or_else(|| config.destination_path());
    info!("Cleaning site at {}", destination.display());
    match remove_directory(&destination) {
        Ok(true) => {
            info!("Site cleaned successfully");
            true
        }
        Ok(false) => {
            info!("Nothing to clean");
            true
        }
        Err(e) => {
            error!("Failed to clean site: {}", e);
            false
        }
    }
}
