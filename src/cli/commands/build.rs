use log::{error, info, warn};
use std::path::PathBuf;

use isleweave::Site;

use crate::cli::commands::{load_site_config, parse_custom_data};
use crate::cli::types::SourceArgs;

/// Handle the build command; returns whether the build succeeded
pub fn handle_build_command(site_args: &SourceArgs, destination: Option<&PathBuf>, data: Option<&str>) -> bool {
    let custom_data = match parse_custom_data(data) {
        Ok(data) => data,
        Err(e) => {
            error!("{}", e);
            return false;
        }
    };

    let config = match load_site_config(site_args) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config: {}", e);
            return false;
        }
    };

    // Command line destination takes precedence over the configured one
    let destination = destination.cloned().unwrap_or_else(|| config.destination_path());

    info!("Building site...");
    let site = match Site::setup(config, custom_data) {
        Ok(site) => site,
        Err(e) => {
            error!("Failed to read site: {}", e);
            return false;
        }
    };

    let skipped = site.report().failures().count();
    if skipped > 0 {
        warn!("{} source files were skipped, see the errors above", skipped);
    }

    match site.compile_site(&destination) {
        Ok(count) => {
            info!("Site built successfully at {} ({} pages)", destination.display(), count);
            true
        }
        Err(e) => {
            error!("Failed to build site: {}", e);
            false
        }
    }
}
