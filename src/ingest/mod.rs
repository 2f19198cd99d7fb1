//! Reads the source tree into a [`ContentRegistry`].
//!
//! Partials, data, layouts and helpers come first. Pages and collection
//! definitions follow once those are in place, then collections are
//! expanded into pages and the registry is sealed.

mod handlers;
mod report;

pub use handlers::{
    register_collection, register_data, register_helper, register_layout, register_page, register_partial, Handler,
};
pub use report::{Category, FileOutcome, IngestReport};

use std::path::{Path, PathBuf};

use log::{debug, info};
use rayon::prelude::*;

use crate::collections;
use crate::config::Config;
use crate::registry::{ContentRegistry, RegistryBuilder};
use crate::utils::error::{IsleError, Result};
use crate::utils::fs::{list_files, read_file};

/// Ingest the whole source tree into a fresh registry
pub fn ingest(config: &Config) -> Result<(ContentRegistry, IngestReport)> {
    ingest_with(config, RegistryBuilder::new())
}

/// Ingest the source tree into `builder`, which may already hold native
/// helpers or data
pub fn ingest_with(config: &Config, mut builder: RegistryBuilder) -> Result<(ContentRegistry, IngestReport)> {
    let mut report = IngestReport::default();
    let templates = &config.template_ext;

    info!("Reading site sources from {}", config.source.display());
    ingest_category(&mut builder, config, &mut report, Category::Partial, &config.partials_path(), templates, register_partial);
    ingest_category(&mut builder, config, &mut report, Category::Data, &config.data_path(), &config.data_ext, register_data);
    ingest_category(&mut builder, config, &mut report, Category::Layout, &config.layouts_path(), templates, register_layout);
    ingest_category(&mut builder, config, &mut report, Category::Helper, &config.helpers_path(), templates, register_helper);

    ingest_category(&mut builder, config, &mut report, Category::Page, &config.pages_path(), templates, register_page);
    ingest_category(
        &mut builder,
        config,
        &mut report,
        Category::Collection,
        &config.collections_path(),
        &config.data_ext,
        register_collection,
    );

    collections::expand_collections(&mut builder, config, &mut report);

    let registry = builder.seal(&mut report)?;
    info!(
        "Registered {} pages, {} layouts, {} collections ({} files skipped)",
        registry.pages().len(),
        registry.layouts().len(),
        registry.collections().len(),
        report.failures().count()
    );

    Ok((registry, report))
}

/// Run `handler` over every matching file below `dir`.
///
/// Files are read in parallel and handed to the handler one by one in path
/// order, so a later file wins a key collision.
pub fn ingest_category(
    builder: &mut RegistryBuilder,
    config: &Config,
    report: &mut IngestReport,
    category: Category,
    dir: &Path,
    extensions: &[String],
    handler: Handler,
) {
    if !dir.is_dir() {
        debug!("No {} directory at {}, skipping", category, dir.display());
        return;
    }

    let files = match list_files(dir, extensions) {
        Ok(files) => files,
        Err(e) => {
            report.record(dir.to_path_buf(), category, Err(IsleError::io(dir, e.into())));
            return;
        }
    };
    debug!("Found {} {} files in {}", files.len(), category, dir.display());

    let contents: Vec<(PathBuf, Result<String>)> = files
        .into_par_iter()
        .map(|path| {
            let content = read_file(&path);
            (path, content)
        })
        .collect();

    for (path, content) in contents {
        let result = content.and_then(|content| handler(builder, config, &path, &content, dir));
        report.record(path, category, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn one_broken_file_does_not_stop_its_siblings() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "pages/a.html", "<p>a</p>");
        write(dir.path(), "pages/b.html", "<i data-page>1</i><i data-page>2</i>");
        write(dir.path(), "pages/c.html", "<p>c</p>");

        let config = Config::with_source(dir.path());
        let (registry, report) = ingest(&config).unwrap();

        assert!(registry.page("a").is_some());
        assert!(registry.page("b").is_none());
        assert!(registry.page("c").is_some());
        assert_eq!(report.registered(Category::Page), 2);

        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert!(matches!(failures[0].1, IsleError::MultipleMarkers { .. }));
    }

    #[test]
    fn missing_directories_are_skipped() {
        let dir = TempDir::new().unwrap();
        let config = Config::with_source(dir.path());

        let (registry, report) = ingest(&config).unwrap();

        assert!(registry.pages().is_empty());
        assert!(report.is_clean());
        assert!(report.outcomes().is_empty());
    }

    #[test]
    fn files_with_other_extensions_are_ignored() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "data/site.json", r#"{"title": "Home"}"#);
        write(dir.path(), "data/notes.txt", "not json");
        write(dir.path(), "partials/nav.html", "<nav></nav>");
        write(dir.path(), "partials/nav.bak", "ignored");

        let config = Config::with_source(dir.path());
        let (registry, report) = ingest(&config).unwrap();

        assert_eq!(registry.site_data()["site"]["title"], "Home");
        assert!(report.is_clean());
        assert_eq!(report.outcomes().len(), 2);
    }
}
