//! Site helpers exposed to templates as Liquid filters.
//!
//! A helper receives an ordered list of values followed by a map of options
//! and returns a string. In a template the piped input is the first value,
//! positional filter arguments follow it and keyword arguments become the
//! options: `{{ title | shout: "!", times: 2 }}`.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use liquid::model::Value;
use liquid::Object;
use liquid_core::parser::{FilterArguments, ParameterReflection, ParseFilter};
use liquid_core::runtime::Expression;
use liquid_core::{Error as LiquidError, Filter, FilterReflection, Result as LiquidResult, Runtime, ValueView};

use crate::utils::error::{BoxError, IsleError, Result};

/// Signature of a helper: ordered values plus trailing options
pub type HelperFn = Arc<dyn Fn(&[Value], &Object) -> std::result::Result<String, BoxError> + Send + Sync>;

/// Wrap a closure as a helper
pub fn helper_fn<F>(f: F) -> HelperFn
where
    F: Fn(&[Value], &Object) -> std::result::Result<String, BoxError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Build a helper from a Liquid snippet.
///
/// The snippet renders with `args` (the ordered values) and `options`
/// in scope; trailing newlines of the output are dropped.
pub fn template_helper(path: &Path, source: &str) -> Result<HelperFn> {
    let parser = liquid::ParserBuilder::with_stdlib()
        .build()
        .map_err(|e| IsleError::template(path, e))?;
    let template = Arc::new(parser.parse(source).map_err(|e| IsleError::template(path, e))?);

    Ok(helper_fn(move |args, options| {
        let mut globals = Object::new();
        globals.insert("args".into(), Value::Array(args.to_vec()));
        globals.insert("options".into(), Value::Object(options.clone()));

        let rendered = template.render(&globals).map_err(BoxError::from)?;
        Ok(rendered.trim_end_matches(['\r', '\n']).to_string())
    }))
}

/// Helper filter implementation
pub struct HelperFilter {
    name: String,
    helper: HelperFn,
    positional: Vec<Expression>,
    keyword: Vec<(String, Expression)>,
}

impl fmt::Debug for HelperFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelperFilter")
            .field("name", &self.name)
            .field("positional", &self.positional)
            .field("keyword", &self.keyword)
            .finish()
    }
}

impl fmt::Display for HelperFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Filter for HelperFilter {
    fn evaluate(&self, input: &dyn ValueView, runtime: &dyn Runtime) -> LiquidResult<Value> {
        let mut values = Vec::with_capacity(self.positional.len() + 1);
        values.push(input.to_value());
        for expression in &self.positional {
            values.push(expression.evaluate(runtime)?.to_value());
        }

        let mut options = Object::new();
        for (key, expression) in &self.keyword {
            options.insert(key.clone().into(), expression.evaluate(runtime)?.to_value());
        }

        let output = (self.helper)(&values, &options)
            .map_err(|e| LiquidError::with_msg(format!("helper `{}` failed: {}", self.name, e)))?;
        Ok(Value::scalar(output))
    }
}

/// Parse filter factory for a registered helper
#[derive(Clone)]
pub struct HelperFilterParser {
    name: String,
    helper: HelperFn,
}

impl HelperFilterParser {
    pub fn new(name: impl Into<String>, helper: HelperFn) -> Self {
        HelperFilterParser {
            name: name.into(),
            helper,
        }
    }
}

impl fmt::Debug for HelperFilterParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelperFilterParser").field("name", &self.name).finish()
    }
}

impl FilterReflection for HelperFilterParser {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Site helper: ordered values plus trailing options, returns a string"
    }

    fn positional_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }

    fn keyword_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }
}

impl ParseFilter for HelperFilterParser {
    fn parse(&self, args: FilterArguments) -> LiquidResult<Box<dyn Filter>> {
        let positional = args.positional.collect();
        let keyword = args.keyword.map(|(key, expression)| (key.to_string(), expression)).collect();

        Ok(Box::new(HelperFilter {
            name: self.name.clone(),
            helper: self.helper.clone(),
            positional,
            keyword,
        }))
    }

    fn reflection(&self) -> &dyn FilterReflection {
        self
    }
}
