//! One handler per source category.
//!
//! Every handler gets the builder, the configuration, the file path, its
//! contents and the category root the path is relative to.

use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::collections::CollectionDefinition;
use crate::config::Config;
use crate::markup::{extract, json_object, markup_value};
use crate::registry::{LayoutSource, Page, RegistryBuilder};
use crate::template;
use crate::utils::error::{IsleError, Result};
use crate::utils::path::{get_stem, relative_key, relative_segments};

/// Signature shared by every handler
pub type Handler = fn(&mut RegistryBuilder, &Config, &Path, &str, &Path) -> Result<()>;

fn basename(path: &Path) -> String {
    get_stem(path).unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Parse a JSON data file into the site data tree
pub fn register_data(builder: &mut RegistryBuilder, _config: &Config, path: &Path, content: &str, root: &Path) -> Result<()> {
    let value: Value = serde_json::from_str(content).map_err(|source| IsleError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let segments = relative_segments(path, root);
    debug!("Registering data at '{}'", segments.join("/"));
    builder.insert_data(&segments, value);
    Ok(())
}

/// Register raw markup for `{% include %}`
pub fn register_partial(builder: &mut RegistryBuilder, _config: &Config, path: &Path, content: &str, _root: &Path) -> Result<()> {
    let name = basename(path);
    debug!("Registering partial '{}'", name);
    builder.insert_partial(name, content.to_string());
    Ok(())
}

/// Strip the template metadata island and keep the layout for compilation
pub fn register_layout(builder: &mut RegistryBuilder, config: &Config, path: &Path, content: &str, _root: &Path) -> Result<()> {
    let extraction = extract(content, path, &config.markers.template_data, json_object)?;

    let layout = LayoutSource {
        name: basename(path),
        path: path.to_path_buf(),
        content: extraction.document,
        template_data: extraction.value.unwrap_or_default(),
    };
    debug!("Registering layout '{}'", layout.name);
    builder.insert_layout(layout);
    Ok(())
}

/// Compile a Liquid snippet helper
pub fn register_helper(builder: &mut RegistryBuilder, _config: &Config, path: &Path, content: &str, _root: &Path) -> Result<()> {
    let helper = template::template_helper(path, content)?;
    let name = basename(path);
    debug!("Registering helper '{}'", name);
    builder.insert_helper(name, helper);
    Ok(())
}

/// Pull the data and script islands out of a page and register it
pub fn register_page(builder: &mut RegistryBuilder, config: &Config, path: &Path, content: &str, root: &Path) -> Result<()> {
    let data = extract(content, path, &config.markers.page_data, json_object)?;
    let script = extract(&data.document, path, &config.markers.page_script, markup_value)?;

    let page = Page {
        path: relative_key(path, root),
        source: path.to_path_buf(),
        content: script.document,
        data: data.value,
        script: script.value,
    };
    debug!("Registering page '{}'", page.path);
    builder.insert_page(page);
    Ok(())
}

/// Parse a collection definition
pub fn register_collection(builder: &mut RegistryBuilder, _config: &Config, path: &Path, content: &str, _root: &Path) -> Result<()> {
    let definition: CollectionDefinition = serde_json::from_str(content).map_err(|source| IsleError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let name = basename(path);
    debug!("Registering collection '{}' from '{}'", name, definition.source);
    builder.insert_collection(name, definition);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::IngestReport;
    use serde_json::json;

    #[test]
    fn data_lands_under_its_relative_path() {
        let mut builder = RegistryBuilder::new();
        register_data(
            &mut builder,
            &Config::default(),
            Path::new("site/data/nav/main.json"),
            r#"{"items": []}"#,
            Path::new("site/data"),
        )
        .unwrap();

        assert_eq!(builder.site_data()["nav"]["main"]["items"], json!([]));
    }

    #[test]
    fn malformed_data_is_a_parse_error() {
        let mut builder = RegistryBuilder::new();
        let err = register_data(
            &mut builder,
            &Config::default(),
            Path::new("data/broken.json"),
            "{",
            Path::new("data"),
        )
        .unwrap_err();

        assert!(matches!(err, IsleError::Json { .. }));
        assert!(builder.site_data().is_empty());
    }

    #[test]
    fn pages_lose_their_islands() {
        let mut builder = RegistryBuilder::new();
        let content = concat!(
            "<script type=\"application/json\" data-page>{\"title\": \"About\"}</script>",
            "<h1>About</h1>",
            "<div data-script><script>go()</script></div>",
        );
        register_page(
            &mut builder,
            &Config::default(),
            Path::new("pages/team/about.html"),
            content,
            Path::new("pages"),
        )
        .unwrap();

        let page = builder.page("team/about").unwrap();
        assert_eq!(page.content, "<h1>About</h1>");
        assert_eq!(page.data.as_ref().unwrap()["title"], json!("About"));
        assert_eq!(page.script.as_deref(), Some("<script>go()</script>"));
    }

    #[test]
    fn layouts_keep_their_template_data() {
        let mut builder = RegistryBuilder::new();
        let content = "<template data-template>{\"parent\": \"base\"}</template><main>{{ body }}</main>";
        register_layout(
            &mut builder,
            &Config::default(),
            Path::new("layouts/post.html"),
            content,
            Path::new("layouts"),
        )
        .unwrap();

        let registry = builder.seal(&mut IngestReport::default()).unwrap();
        let layout = registry.layout("post").unwrap();
        assert_eq!(layout.parent(), Some("base"));
        assert_eq!(layout.content, "<main>{{ body }}</main>");
    }

    #[test]
    fn collection_definitions_use_kebab_case_keys() {
        let mut builder = RegistryBuilder::new();
        let content = r#"{
            "source": "posts",
            "single-path": "blog",
            "single-layout": "post",
            "content-fields": {"body": {}}
        }"#;
        register_collection(
            &mut builder,
            &Config::default(),
            Path::new("collections/blog.json"),
            content,
            Path::new("collections"),
        )
        .unwrap();

        let mut report = IngestReport::default();
        let registry = builder.seal(&mut report).unwrap();
        let definition = &registry.collections()["blog"];
        assert_eq!(definition.single_path.as_deref(), Some("blog"));
        assert_eq!(definition.single_layout, "post");
    }
}
