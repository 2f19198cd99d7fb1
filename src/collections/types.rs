use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::registry::Page;

/// A collection definition file.
///
/// Every content file under `source` becomes one page rendered with
/// `single-layout`. The page key is the file's path below `source`,
/// prefixed with `single-path` (or `index-path` when there is none).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CollectionDefinition {
    /// Content directory, relative to the source root
    pub source: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_path: Option<String>,

    /// Layout every item page is rendered with
    pub single_layout: String,

    /// Fields pulled out of each content file, keyed by field name
    #[serde(default)]
    pub content_fields: Map<String, Value>,

    /// Last page produced from this collection
    #[serde(skip)]
    pub last_page: Option<Page>,
}

impl CollectionDefinition {
    /// Prefix added to every item key
    pub fn key_prefix(&self) -> &str {
        self.single_path
            .as_deref()
            .or(self.index_path.as_deref())
            .unwrap_or("")
    }
}
