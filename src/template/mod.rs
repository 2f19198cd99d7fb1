mod convert;
mod helpers;

pub use convert::{json_to_liquid, object_to_liquid};
pub use helpers::{helper_fn, template_helper, HelperFilterParser, HelperFn};

use std::collections::BTreeMap;
use std::path::Path;

use liquid::{Object, Parser, ParserBuilder};
use log::debug;

use crate::utils::error::{IsleError, Result};

/// In-memory partial store used by `{% include %}`
pub type Partials = liquid::partials::EagerCompiler<liquid::partials::InMemorySource>;

/// Create the Liquid parser with every registered partial and helper
pub fn create_parser(partials: &BTreeMap<String, String>, helpers: &BTreeMap<String, HelperFn>) -> Result<Parser> {
    let mut store = Partials::empty();
    for (name, source) in partials {
        store.add(name.clone(), source.clone());
    }

    let mut parser_builder = ParserBuilder::with_stdlib().partials(store);
    for (name, helper) in helpers {
        debug!("Registering helper filter '{}'", name);
        parser_builder = parser_builder.filter(HelperFilterParser::new(name.clone(), helper.clone()));
    }

    parser_builder
        .build()
        .map_err(|e| IsleError::template("<template engine>", e))
}

/// Parse and render a template source in one go
pub fn render_source(parser: &Parser, source: &str, path: &Path, globals: &Object) -> Result<String> {
    let template = parser.parse(source).map_err(|e| IsleError::template(path, e))?;
    template.render(globals).map_err(|e| IsleError::template(path, e))
}
