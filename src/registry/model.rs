use std::path::PathBuf;

use liquid::{Object, Template};
use serde_json::{Map, Value};

use crate::utils::error::{IsleError, Result};

/// A page waiting to be compiled
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Registry key: source-relative path without extension
    pub path: String,
    /// File the page came from
    pub source: PathBuf,
    /// Markup with every marker element stripped
    pub content: String,
    /// Extracted page data
    pub data: Option<Map<String, Value>>,
    /// Extracted script markup
    pub script: Option<String>,
}

/// A layout as read from disk, before it is compiled
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSource {
    /// Basename the layout is registered under
    pub name: String,
    /// File the layout came from
    pub path: PathBuf,
    /// Template source with the metadata island stripped
    pub content: String,
    /// Metadata inherited by pages using this layout
    pub template_data: Map<String, Value>,
}

/// A compiled layout
pub struct Layout {
    pub name: String,
    pub path: PathBuf,
    pub content: String,
    pub template_data: Map<String, Value>,
    template: Template,
}

impl Layout {
    pub(crate) fn new(source: LayoutSource, template: Template) -> Self {
        Layout {
            name: source.name,
            path: source.path,
            content: source.content,
            template_data: source.template_data,
            template,
        }
    }

    /// Name of the parent layout, if this layout declares one
    pub fn parent(&self) -> Option<&str> {
        self.template_data
            .get("parent")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|parent| !parent.is_empty())
    }

    /// Render the layout against a context that already holds `body`
    pub fn render(&self, context: &Object) -> Result<String> {
        self.template
            .render(context)
            .map_err(|e| IsleError::template(&self.path, e))
    }
}

impl std::fmt::Debug for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layout")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("template_data", &self.template_data)
            .finish()
    }
}
