use std::path::Path;

use log::{debug, info};
use serde_json::{Map, Value};

use crate::collections::types::CollectionDefinition;
use crate::config::Config;
use crate::ingest::{Category, IngestReport};
use crate::markup::{extract, json_object, markup_value};
use crate::registry::{Page, RegistryBuilder};
use crate::utils::error::{IsleError, Result};
use crate::utils::fs::{list_files, read_file};
use crate::utils::path::{join_key, relative_key};

/// Expand every registered collection into pages.
///
/// A collection whose source cannot be read is recorded in `report`; the
/// others are still expanded.
pub fn expand_collections(builder: &mut RegistryBuilder, config: &Config, report: &mut IngestReport) {
    let definitions = builder.take_collections();
    if definitions.is_empty() {
        return;
    }

    info!("Expanding {} collections", definitions.len());
    for (name, mut definition) in definitions {
        let source_dir = config.source.join(&definition.source);
        if let Err(e) = expand_collection(builder, config, &mut definition, report) {
            report.record(source_dir, Category::Collection, Err(e));
        }
        builder.insert_collection(name, definition);
    }
}

/// Register one page per content file of `definition`
pub fn expand_collection(
    builder: &mut RegistryBuilder,
    config: &Config,
    definition: &mut CollectionDefinition,
    report: &mut IngestReport,
) -> Result<usize> {
    let source_dir = config.source.join(&definition.source);
    let files = list_files(&source_dir, &config.template_ext).map_err(|source| IsleError::CollectionSource {
        path: source_dir.clone(),
        source,
    })?;

    let mut registered = 0;
    for file in files {
        let result = read_file(&file).and_then(|content| collection_page(config, definition, &file, &content, &source_dir));
        match result {
            Ok(page) => {
                debug!("Registering collection page '{}'", page.path);
                builder.insert_page(page.clone());
                definition.last_page = Some(page);
                registered += 1;
                report.record(file, Category::Collection, Ok(()));
            }
            Err(e) => report.record(file, Category::Collection, Err(e)),
        }
    }

    Ok(registered)
}

/// Build the page for one collection content file
pub fn collection_page(
    config: &Config,
    definition: &CollectionDefinition,
    path: &Path,
    content: &str,
    source_dir: &Path,
) -> Result<Page> {
    let markers = &config.markers;
    let mut document = content.to_string();
    let mut fields = Map::new();
    let mut item_data: Option<Map<String, Value>> = None;

    // Each field replaces the markup object of the one before it, so only
    // the last field in key order reaches the page data. The item data
    // island is looked for once per field; only the first pass can find it.
    for field in definition.content_fields.keys() {
        let markup = extract(&document, path, &markers.collection_field(field), markup_value)?;
        document = markup.document;
        fields = Map::new();
        if let Some(value) = markup.value {
            fields.insert(field.clone(), Value::String(value));
        }

        let data = extract(&document, path, &markers.collection_data, json_object)?;
        document = data.document;
        if item_data.is_none() {
            item_data = data.value;
        }
    }

    let mut page_data = fields;
    if let Some(item_data) = item_data {
        page_data.extend(item_data);
    }
    page_data.insert("layout".to_string(), Value::String(definition.single_layout.clone()));

    Ok(Page {
        path: join_key(definition.key_prefix(), &relative_key(path, source_dir)),
        source: path.to_path_buf(),
        content: document,
        data: Some(page_data),
        script: None,
    })
}
