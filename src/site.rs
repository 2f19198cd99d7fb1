use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::{Map, Value};

use crate::compiler::{CompiledPage, PageCompiler};
use crate::config::{load_config, Config};
use crate::ingest::{self, IngestReport};
use crate::registry::{ContentRegistry, RegistryBuilder};
use crate::utils::error::{IsleError, Result};
use crate::utils::fs::{create_directory, write_file};
use crate::utils::path::output_path;

/// A site read from disk and ready to compile
#[derive(Debug)]
pub struct Site {
    config: Config,
    registry: ContentRegistry,
    custom_data: Map<String, Value>,
    report: IngestReport,
}

impl Site {
    /// Ingest the site described by `config`.
    ///
    /// `custom_data` is layered over the page data of every page compiled
    /// from this site.
    pub fn setup(config: Config, custom_data: Map<String, Value>) -> Result<Site> {
        Self::setup_with(config, custom_data, RegistryBuilder::new())
    }

    /// Like [`Site::setup`], starting from a builder that may already hold
    /// native helpers or data
    pub fn setup_with(config: Config, custom_data: Map<String, Value>, builder: RegistryBuilder) -> Result<Site> {
        let (registry, report) = ingest::ingest_with(&config, builder)?;
        Ok(Site {
            config,
            registry,
            custom_data,
            report,
        })
    }

    /// Load the configuration found in `source` and ingest the site
    pub fn setup_from<P: AsRef<Path>>(source: P, custom_data: Map<String, Value>) -> Result<Site> {
        let config = load_config(source, None)?;
        Self::setup(config, custom_data)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    /// Outcome of every file read during setup
    pub fn report(&self) -> &IngestReport {
        &self.report
    }

    /// Compile one page; `custom_data` wins over the setup data
    pub fn compile_page(&self, key: &str, custom_data: &Map<String, Value>) -> Result<CompiledPage> {
        let mut data = self.custom_data.clone();
        data.extend(custom_data.clone());
        PageCompiler::new(&self.registry, &self.config).compile_key(key, &data)
    }

    /// Compile every page into `output_root`, in key order.
    ///
    /// Stops at the first page that fails. Returns the number of pages
    /// written.
    pub fn compile_site<P: AsRef<Path>>(&self, output_root: P) -> Result<usize> {
        let output_root = output_root.as_ref();
        info!(
            "Compiling {} pages into {}",
            self.registry.pages().len(),
            output_root.display()
        );
        create_directory(output_root)?;

        let compiler = PageCompiler::new(&self.registry, &self.config);
        let mut written = 0;
        for (key, page) in self.registry.pages() {
            let compiled = compiler.compile(page, &self.custom_data)?;
            let target = self.output_file(output_root, key)?;
            debug!("Writing '{}' to {}", key, target.display());
            write_file(&target, &compiled.html)?;
            written += 1;
        }

        info!("Wrote {} pages", written);
        Ok(written)
    }

    fn output_file(&self, output_root: &Path, key: &str) -> Result<PathBuf> {
        output_path(output_root, key).ok_or_else(|| IsleError::Destination(key.to_string()))
    }
}
