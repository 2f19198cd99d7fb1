//! Content registry.
//!
//! Ingestion writes into a [`RegistryBuilder`]; once every category has
//! been read the builder is sealed into an immutable [`ContentRegistry`]
//! that the compiler borrows.

mod model;

pub use model::{Layout, LayoutSource, Page};

use std::collections::BTreeMap;

use liquid::Parser;
use log::{debug, warn};
use serde_json::{Map, Value};

use crate::collections::CollectionDefinition;
use crate::ingest::{Category, IngestReport};
use crate::template::{self, HelperFn};
use crate::utils::error::{BoxError, IsleError, Result};

/// Mutable registry filled during ingestion
#[derive(Default)]
pub struct RegistryBuilder {
    site_data: Map<String, Value>,
    partials: BTreeMap<String, String>,
    helpers: BTreeMap<String, HelperFn>,
    layouts: BTreeMap<String, LayoutSource>,
    pages: BTreeMap<String, Page>,
    collections: BTreeMap<String, CollectionDefinition>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` at the slash-path given by `segments`.
    ///
    /// Missing intermediate nodes are created as mappings, an intermediate
    /// that is not a mapping is replaced by one, and the last segment is
    /// overwritten.
    pub fn insert_data(&mut self, segments: &[String], value: Value) {
        let Some((last, parents)) = segments.split_last() else {
            warn!("Ignoring data value with an empty path");
            return;
        };

        let mut node = &mut self.site_data;
        for segment in parents {
            let entry = node
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            node = match entry {
                Value::Object(map) => map,
                _ => return,
            };
        }

        node.insert(last.clone(), value);
    }

    pub fn insert_partial(&mut self, name: String, source: String) {
        if self.partials.contains_key(&name) {
            warn!("Partial '{}' is registered twice, keeping the later one", name);
        }
        self.partials.insert(name, source);
    }

    pub fn insert_helper(&mut self, name: String, helper: HelperFn) {
        if self.helpers.contains_key(&name) {
            warn!("Helper '{}' is registered twice, keeping the later one", name);
        }
        self.helpers.insert(name, helper);
    }

    /// Register a native helper under `name`
    pub fn register_helper_fn<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&[liquid::model::Value], &liquid::Object) -> std::result::Result<String, BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.insert_helper(name.into(), template::helper_fn(f));
    }

    pub fn insert_layout(&mut self, layout: LayoutSource) {
        if let Some(previous) = self.layouts.get(&layout.name) {
            warn!(
                "Layout '{}' from {} replaces the one from {}",
                layout.name,
                layout.path.display(),
                previous.path.display()
            );
        }
        self.layouts.insert(layout.name.clone(), layout);
    }

    pub fn insert_page(&mut self, page: Page) {
        if let Some(previous) = self.pages.get(&page.path) {
            warn!(
                "Page '{}' from {} replaces the one from {}",
                page.path,
                page.source.display(),
                previous.source.display()
            );
        }
        self.pages.insert(page.path.clone(), page);
    }

    pub fn insert_collection(&mut self, name: String, definition: CollectionDefinition) {
        if self.collections.contains_key(&name) {
            warn!("Collection '{}' is defined twice, keeping the later one", name);
        }
        self.collections.insert(name, definition);
    }

    pub fn site_data(&self) -> &Map<String, Value> {
        &self.site_data
    }

    pub fn page(&self, key: &str) -> Option<&Page> {
        self.pages.get(key)
    }

    /// Take the collection definitions out so they can be expanded into pages
    pub(crate) fn take_collections(&mut self) -> BTreeMap<String, CollectionDefinition> {
        std::mem::take(&mut self.collections)
    }

    /// Build the template parser and compile every layout.
    ///
    /// A layout that fails to compile is recorded in `report` and left out
    /// of the registry; pages using it fall back to the default layout.
    pub fn seal(self, report: &mut IngestReport) -> Result<ContentRegistry> {
        let parser = template::create_parser(&self.partials, &self.helpers)?;

        let mut layouts = BTreeMap::new();
        for (name, source) in self.layouts {
            match parser.parse(&source.content) {
                Ok(compiled) => {
                    debug!("Compiled layout '{}'", name);
                    layouts.insert(name, Layout::new(source, compiled));
                }
                Err(e) => {
                    let err = IsleError::template(&source.path, e);
                    report.record(source.path.clone(), Category::Layout, Err(err));
                }
            }
        }

        Ok(ContentRegistry {
            site_data: self.site_data,
            layouts,
            pages: self.pages,
            collections: self.collections,
            parser,
        })
    }
}

/// Immutable content shared by every compilation
pub struct ContentRegistry {
    site_data: Map<String, Value>,
    layouts: BTreeMap<String, Layout>,
    pages: BTreeMap<String, Page>,
    collections: BTreeMap<String, CollectionDefinition>,
    parser: Parser,
}

impl ContentRegistry {
    pub fn site_data(&self) -> &Map<String, Value> {
        &self.site_data
    }

    pub fn layout(&self, name: &str) -> Option<&Layout> {
        self.layouts.get(name)
    }

    pub fn layouts(&self) -> &BTreeMap<String, Layout> {
        &self.layouts
    }

    pub fn page(&self, key: &str) -> Option<&Page> {
        self.pages.get(key)
    }

    /// Every page, in key order
    pub fn pages(&self) -> &BTreeMap<String, Page> {
        &self.pages
    }

    pub fn collections(&self) -> &BTreeMap<String, CollectionDefinition> {
        &self.collections
    }

    /// Parser that knows every partial and helper
    pub fn parser(&self) -> &Parser {
        &self.parser
    }
}

impl std::fmt::Debug for ContentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentRegistry")
            .field("site_data", &self.site_data)
            .field("layouts", &self.layouts.keys().collect::<Vec<_>>())
            .field("pages", &self.pages.keys().collect::<Vec<_>>())
            .field("collections", &self.collections.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liquid::model::ValueView;
    use serde_json::json;
    use std::path::PathBuf;

    fn segments(path: &str) -> Vec<String> {
        path.split('/').map(str::to_string).collect()
    }

    #[test]
    fn data_creates_intermediate_mappings() {
        let mut builder = RegistryBuilder::new();
        builder.insert_data(&segments("nav/main"), json!({"items": []}));

        assert_eq!(builder.site_data()["nav"]["main"]["items"], json!([]));
    }

    #[test]
    fn data_replaces_scalar_intermediates() {
        let mut builder = RegistryBuilder::new();
        builder.insert_data(&segments("nav"), json!("flat"));
        builder.insert_data(&segments("nav/footer"), json!([1, 2]));

        assert_eq!(builder.site_data()["nav"], json!({"footer": [1, 2]}));
    }

    #[test]
    fn data_keeps_siblings() {
        let mut builder = RegistryBuilder::new();
        builder.insert_data(&segments("nav/main"), json!(1));
        builder.insert_data(&segments("nav/footer"), json!(2));
        builder.insert_data(&segments("nav/main"), json!(3));

        assert_eq!(builder.site_data()["nav"], json!({"main": 3, "footer": 2}));
    }

    #[test]
    fn later_pages_win() {
        let mut builder = RegistryBuilder::new();
        for content in ["first", "second"] {
            builder.insert_page(Page {
                path: "about".to_string(),
                source: PathBuf::from(format!("pages/{}.html", content)),
                content: content.to_string(),
                data: None,
                script: None,
            });
        }

        assert_eq!(builder.page("about").map(|p| p.content.as_str()), Some("second"));
    }

    #[test]
    fn seal_skips_broken_layouts() {
        let mut builder = RegistryBuilder::new();
        builder.insert_layout(LayoutSource {
            name: "default".to_string(),
            path: PathBuf::from("layouts/default.html"),
            content: "<main>{{ body }}</main>".to_string(),
            template_data: Map::new(),
        });
        builder.insert_layout(LayoutSource {
            name: "broken".to_string(),
            path: PathBuf::from("layouts/broken.html"),
            content: "{% if %}".to_string(),
            template_data: Map::new(),
        });

        let mut report = IngestReport::default();
        let registry = builder.seal(&mut report).unwrap();

        assert!(registry.layout("default").is_some());
        assert!(registry.layout("broken").is_none());
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn layouts_can_use_native_helpers() {
        let mut builder = RegistryBuilder::new();
        builder.register_helper_fn("twice", |values, _| {
            let text = values.first().map(|v| v.to_kstr().to_string()).unwrap_or_default();
            Ok(format!("{}{}", text, text))
        });
        builder.insert_layout(LayoutSource {
            name: "default".to_string(),
            path: PathBuf::from("layouts/default.html"),
            content: "{{ body | twice }}".to_string(),
            template_data: Map::new(),
        });

        let mut report = IngestReport::default();
        let registry = builder.seal(&mut report).unwrap();

        let mut context = liquid::Object::new();
        context.insert("body".into(), liquid::model::Value::scalar("ab"));
        let layout = registry.layout("default").unwrap();
        assert_eq!(layout.render(&context).unwrap(), "abab");
    }

    #[test]
    fn parent_is_read_from_template_data() {
        let mut template_data = Map::new();
        template_data.insert("parent".to_string(), json!(" base "));
        let source = LayoutSource {
            name: "post".to_string(),
            path: PathBuf::from("layouts/post.html"),
            content: String::new(),
            template_data,
        };
        let parser = liquid::ParserBuilder::with_stdlib().build().unwrap();
        let layout = Layout::new(source, parser.parse("").unwrap());

        assert_eq!(layout.parent(), Some("base"));
    }
}
