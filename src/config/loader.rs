use std::path::{Path, PathBuf};

use log::debug;
use serde_json::Value;

use crate::config::defaults;
use crate::config::types::Config;
use crate::config::validation;
use crate::utils::error::{IsleError, Result};
use crate::utils::fs;

/// Configuration file names to look for
const CONFIG_FILES: [&str; 4] = ["_config.yml", "_config.yaml", "_config.toml", "_config.json"];

/// Load site configuration from config files.
///
/// Without explicit `config_files` every default config file present in
/// `source_dir` is read. Later files override earlier ones key by key.
pub fn load_config<P: AsRef<Path>>(source_dir: P, config_files: Option<Vec<PathBuf>>) -> Result<Config> {
    let config_paths = match config_files {
        Some(paths) => paths,
        None => find_default_config_files(&source_dir),
    };

    let mut merged = Value::Object(serde_json::Map::new());
    if config_paths.is_empty() {
        debug!("No configuration files found, using defaults");
    } else {
        for path in &config_paths {
            debug!("Loading configuration from {}", path.display());
            let file_value = read_config_file(path)?;
            merge_values(&mut merged, file_value);
        }
    }

    let config_path = config_paths.last().cloned().unwrap_or_else(|| source_dir.as_ref().to_path_buf());
    let mut config: Config = serde_json::from_value(merged).map_err(|e| IsleError::Config {
        path: config_path.clone(),
        message: e.to_string(),
    })?;

    // Set source directory if not already set
    if config.source == defaults::default_source() {
        config.source = source_dir.as_ref().to_path_buf();
    } else if config.source.is_relative() {
        config.source = source_dir.as_ref().join(&config.source);
    }

    validation::validate_config(&config).map_err(|message| IsleError::Config {
        path: config_path,
        message,
    })?;

    debug!("Configuration loaded: {:?}", config);
    Ok(config)
}

/// Find default configuration files
fn find_default_config_files<P: AsRef<Path>>(source_dir: P) -> Vec<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| source_dir.as_ref().join(name))
        .filter(|path| path.is_file())
        .collect()
}

/// Parse one configuration file into a generic value, based on its extension
fn read_config_file(path: &Path) -> Result<Value> {
    let content = fs::read_file(path)?;
    let config_error = |message: String| IsleError::Config {
        path: path.to_path_buf(),
        message,
    };

    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "yml".to_string());

    match ext.as_str() {
        "yml" | "yaml" => {
            if content.trim().is_empty() {
                return Ok(Value::Object(serde_json::Map::new()));
            }
            serde_yaml::from_str(&content)
                .map_err(|e| config_error(format!("failed to parse YAML configuration: {}", e)))
        }
        "toml" => toml::from_str(&content).map_err(|e| config_error(format!("failed to parse TOML configuration: {}", e))),
        "json" => {
            serde_json::from_str(&content).map_err(|e| config_error(format!("failed to parse JSON configuration: {}", e)))
        }
        other => Err(config_error(format!("unsupported configuration file format: {}", other))),
    }
}

/// Merge `source` into `target`; objects merge recursively, anything else replaces
fn merge_values(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, source) => *target = source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_config_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.source, dir.path());
        assert_eq!(config.default_layout, "default");
        assert_eq!(config.markers.page_data, "data-page");
    }

    #[test]
    fn yaml_overrides_defaults_and_keeps_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write_file(
            dir.path().join("_config.yml"),
            "default_layout: base\nmarkers:\n  page_data: data-island\n",
        )
        .unwrap();

        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.default_layout, "base");
        assert_eq!(config.markers.page_data, "data-island");
        assert_eq!(config.markers.page_script, "data-script");
    }

    #[test]
    fn later_files_win() {
        let dir = tempfile::tempdir().unwrap();
        fs::write_file(dir.path().join("_config.yml"), "default_layout: base\n").unwrap();
        fs::write_file(dir.path().join("_config.toml"), "default_layout = \"shell\"\n").unwrap();

        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.default_layout, "shell");
    }

    #[test]
    fn invalid_yaml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write_file(dir.path().join("_config.yml"), "markers: [unclosed\n").unwrap();

        let err = load_config(dir.path(), None).unwrap_err();
        assert!(matches!(err, IsleError::Config { .. }));
    }
}
