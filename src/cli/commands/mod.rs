mod build;
mod clean;
mod page;

pub use build::handle_build_command;
pub use clean::handle_clean_command;
pub use page::handle_page_command;

use std::path::PathBuf;

use serde_json::{Map, Value};

use isleweave::config::{self, Config};
use isleweave::IsleError;

use crate::cli::types::SourceArgs;

/// Load the configuration for the site named by `args`
pub(crate) fn load_site_config(args: &SourceArgs) -> Result<Config, IsleError> {
    let source = args.source.clone().unwrap_or_else(|| PathBuf::from("."));
    config::load_config(source, args.config.clone())
}

/// Parse the `--data` argument into a JSON object
pub(crate) fn parse_custom_data(data: Option<&str>) -> Result<Map<String, Value>, String> {
    let Some(data) = data else {
        return Ok(Map::new());
    };

    match serde_json::from_str::<Value>(data) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("--data must be a JSON object".to_string()),
        Err(e) => Err(format!("--data is not valid JSON: {}", e)),
    }
}
