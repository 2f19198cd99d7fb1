use std::collections::HashSet;

use log::{info, warn};

use crate::config::Config;

/// Validate the configuration
pub fn validate_config(config: &Config) -> Result<(), String> {
    // Validate source directory
    validate_source_directory(config)?;

    // Validate marker names
    validate_markers(config)?;

    // Validate extension lists
    validate_extensions(config)?;

    if config.default_layout.trim().is_empty() {
        return Err("default_layout must not be empty".to_string());
    }

    Ok(())
}

/// Validate the source directory
fn validate_source_directory(config: &Config) -> Result<(), String> {
    let source = &config.source;

    if !source.exists() {
        return Err(format!("Source directory does not exist: {}", source.display()));
    }

    if !source.is_dir() {
        return Err(format!("Source path is not a directory: {}", source.display()));
    }

    for (label, dir) in [
        ("partials", config.partials_path()),
        ("data", config.data_path()),
        ("layouts", config.layouts_path()),
        ("helpers", config.helpers_path()),
        ("pages", config.pages_path()),
        ("collections", config.collections_path()),
    ] {
        if dir.exists() && !dir.is_dir() {
            warn!("The {} path exists but is not a directory: {}", label, dir.display());
        }
    }

    info!("Source directory: {}", source.display());
    Ok(())
}

/// Marker attributes must be present and must not collide with each other
fn validate_markers(config: &Config) -> Result<(), String> {
    let markers = &config.markers;
    let named = [
        ("page_data", &markers.page_data),
        ("page_script", &markers.page_script),
        ("template_data", &markers.template_data),
        ("collection_data", &markers.collection_data),
        ("collection_field_prefix", &markers.collection_field_prefix),
    ];

    let mut seen = HashSet::new();
    for (field, value) in named {
        if value.trim().is_empty() {
            return Err(format!("markers.{} must not be empty", field));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(format!("markers.{} must not contain whitespace: {:?}", field, value));
        }
        if !seen.insert(value.to_ascii_lowercase()) {
            return Err(format!("markers.{} reuses the attribute name {:?}", field, value));
        }
    }

    Ok(())
}

fn validate_extensions(config: &Config) -> Result<(), String> {
    if config.template_ext.is_empty() {
        return Err("template_ext must list at least one extension".to_string());
    }
    if config.data_ext.is_empty() {
        return Err("data_ext must list at least one extension".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_colliding_markers() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::with_source(dir.path());
        config.markers.page_script = "DATA-PAGE".to_string();

        let err = validate_config(&config).unwrap_err();
        assert!(err.contains("page_script"));
    }

    #[test]
    fn rejects_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_source(dir.path().join("missing"));
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn accepts_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_config(&Config::with_source(dir.path())).is_ok());
    }
}
