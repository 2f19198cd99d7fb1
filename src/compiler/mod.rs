//! Two-pass page compiler.
//!
//! The first pass walks the page's layout chain and merges the template
//! data of every layout in it. The second pass renders the page content
//! and then wraps it in each layout from the innermost outwards.

mod chain;

pub use chain::{resolve_chain, template_data};

use liquid::model::Value as LiquidValue;
use log::debug;
use serde_json::{Map, Value};

use crate::config::Config;
use crate::registry::{ContentRegistry, Page};
use crate::template::{object_to_liquid, render_source};
use crate::utils::error::{IsleError, Result};
use crate::utils::path::canonical_path;

/// A rendered page
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPage {
    /// Registry key the page was compiled from
    pub key: String,
    /// Path the page is served under, e.g. `/blog/`
    pub canonical_path: String,
    pub html: String,
}

/// Compiles pages against a sealed registry
pub struct PageCompiler<'a> {
    registry: &'a ContentRegistry,
    config: &'a Config,
}

impl<'a> PageCompiler<'a> {
    pub fn new(registry: &'a ContentRegistry, config: &'a Config) -> Self {
        PageCompiler { registry, config }
    }

    /// Compile the page registered under `key`
    pub fn compile_key(&self, key: &str, custom_data: &Map<String, Value>) -> Result<CompiledPage> {
        let page = self
            .registry
            .page(key)
            .ok_or_else(|| IsleError::PageNotFound(key.to_string()))?;
        self.compile(page, custom_data)
    }

    /// Compile one page with `custom_data` layered over its own data.
    ///
    /// Besides the site, page and caller data, templates see `script` (the
    /// page script island, when present), `path` (the canonical path) and
    /// `template` (the merged layout metadata); layouts also get `body`.
    pub fn compile(&self, page: &Page, custom_data: &Map<String, Value>) -> Result<CompiledPage> {
        let mut context = self.page_context(page, custom_data);

        let layout_name = context
            .get("layout")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| self.config.default_layout.clone());

        // Pass 1: layout chain and its template data
        let chain = resolve_chain(self.registry, self.config, &layout_name)?;
        debug!(
            "Page '{}' uses layouts [{}]",
            page.path,
            chain.iter().map(|l| l.name.as_str()).collect::<Vec<_>>().join(" -> ")
        );

        let path = canonical_path(&page.path);
        context.insert("path".to_string(), Value::String(path.clone()));
        context.insert("template".to_string(), Value::Object(template_data(&chain)));

        // Pass 2: content, then every layout from the leaf up
        let mut globals = object_to_liquid(&context);
        let mut body = render_source(self.registry.parser(), &page.content, &page.source, &globals)?;
        for layout in &chain {
            globals.insert("body".into(), LiquidValue::scalar(body));
            body = layout.render(&globals)?;
        }

        Ok(CompiledPage {
            key: page.path.clone(),
            canonical_path: path,
            html: body,
        })
    }

    /// Site data, then page data, then the page script, then caller data
    fn page_context(&self, page: &Page, custom_data: &Map<String, Value>) -> Map<String, Value> {
        let mut context = self.registry.site_data().clone();
        if let Some(data) = &page.data {
            context.extend(data.clone());
        }
        if let Some(script) = &page.script {
            context.insert("script".to_string(), Value::String(script.clone()));
        }
        context.extend(custom_data.clone());
        context
    }
}
