use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// Attribute names that select data and content islands in markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerConfig {
    /// Page data island (JSON)
    #[serde(default = "defaults::default_page_data_marker")]
    pub page_data: String,

    /// Page script island (raw markup)
    #[serde(default = "defaults::default_page_script_marker")]
    pub page_script: String,

    /// Layout template metadata (JSON)
    #[serde(default = "defaults::default_template_data_marker")]
    pub template_data: String,

    /// Collection item data (JSON)
    #[serde(default = "defaults::default_collection_data_marker")]
    pub collection_data: String,

    /// Prefix of the per-field collection content markers
    #[serde(default = "defaults::default_collection_field_prefix")]
    pub collection_field_prefix: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        MarkerConfig {
            page_data: defaults::default_page_data_marker(),
            page_script: defaults::default_page_script_marker(),
            template_data: defaults::default_template_data_marker(),
            collection_data: defaults::default_collection_data_marker(),
            collection_field_prefix: defaults::default_collection_field_prefix(),
        }
    }
}

impl MarkerConfig {
    /// Marker attribute for one collection content field
    pub fn collection_field(&self, field: &str) -> String {
        format!("{}{}", self.collection_field_prefix, field)
    }
}

/// Site configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Source root of the site
    #[serde(default = "defaults::default_source")]
    pub source: PathBuf,

    /// Destination directory for generated pages
    #[serde(default = "defaults::default_destination")]
    pub destination: PathBuf,

    /// Partials directory, relative to the source root
    #[serde(default = "defaults::default_partials_dir")]
    pub partials_dir: PathBuf,

    /// Data directory, relative to the source root
    #[serde(default = "defaults::default_data_dir")]
    pub data_dir: PathBuf,

    /// Layouts directory, relative to the source root
    #[serde(default = "defaults::default_layouts_dir")]
    pub layouts_dir: PathBuf,

    /// Helpers directory, relative to the source root
    #[serde(default = "defaults::default_helpers_dir")]
    pub helpers_dir: PathBuf,

    /// Pages directory, relative to the source root
    #[serde(default = "defaults::default_pages_dir")]
    pub pages_dir: PathBuf,

    /// Collection definitions directory, relative to the source root
    #[serde(default = "defaults::default_collections_dir")]
    pub collections_dir: PathBuf,

    /// Extensions of template and markup files
    #[serde(default = "defaults::default_template_ext")]
    pub template_ext: Vec<String>,

    /// Extensions of data files
    #[serde(default = "defaults::default_data_ext")]
    pub data_ext: Vec<String>,

    /// Layout used when a page selects none or an unknown one
    #[serde(default = "defaults::default_layout")]
    pub default_layout: String,

    /// Do not warn when a page falls back to the default layout
    #[serde(default)]
    pub silent_layout_fallback: bool,

    /// Marker attribute names
    #[serde(default)]
    pub markers: MarkerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: defaults::default_source(),
            destination: defaults::default_destination(),
            partials_dir: defaults::default_partials_dir(),
            data_dir: defaults::default_data_dir(),
            layouts_dir: defaults::default_layouts_dir(),
            helpers_dir: defaults::default_helpers_dir(),
            pages_dir: defaults::default_pages_dir(),
            collections_dir: defaults::default_collections_dir(),
            template_ext: defaults::default_template_ext(),
            data_ext: defaults::default_data_ext(),
            default_layout: defaults::default_layout(),
            silent_layout_fallback: false,
            markers: MarkerConfig::default(),
        }
    }
}

impl Config {
    /// Configuration rooted at `source` with every other value defaulted
    pub fn with_source(source: impl Into<PathBuf>) -> Self {
        Config {
            source: source.into(),
            ..Config::default()
        }
    }

    /// Absolute partials directory
    pub fn partials_path(&self) -> PathBuf {
        self.source.join(&self.partials_dir)
    }

    /// Absolute data directory
    pub fn data_path(&self) -> PathBuf {
        self.source.join(&self.data_dir)
    }

    /// Absolute layouts directory
    pub fn layouts_path(&self) -> PathBuf {
        self.source.join(&self.layouts_dir)
    }

    /// Absolute helpers directory
    pub fn helpers_path(&self) -> PathBuf {
        self.source.join(&self.helpers_dir)
    }

    /// Absolute pages directory
    pub fn pages_path(&self) -> PathBuf {
        self.source.join(&self.pages_dir)
    }

    /// Absolute collections directory
    pub fn collections_path(&self) -> PathBuf {
        self.source.join(&self.collections_dir)
    }

    /// Output directory; a relative destination is taken from the source root
    pub fn destination_path(&self) -> PathBuf {
        self.source.join(&self.destination)
    }
}
