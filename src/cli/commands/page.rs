use log::error;
use serde_json::Map;

use isleweave::Site;

use crate::cli::commands::{load_site_config, parse_custom_data};
use crate::cli::types::SourceArgs;

/// Handle the page command: compile one page and print it to stdout
pub fn handle_page_command(key: &str, site_args: &SourceArgs, data: Option<&str>) -> bool {
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

    let site = match Site::setup(config, Map::new()) {
        Ok(site) => site,
        Err(e) => {
            error!("Failed to read site: {}", e);
            return false;
        }
    };

    match site.compile_page(key, &custom_data) {
        Ok(page) => {
            println!("{}", page.html);
            true
        }
        Err(e) => {
            error!("Failed to compile page '{}': {}", key, e);
            false
        }
    }
}
