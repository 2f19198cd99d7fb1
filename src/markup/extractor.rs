use std::path::Path;

use serde_json::{Map, Value};

use crate::markup::scanner::{self, MarkedSpan};
use crate::utils::error::{BoxError, IsleError, Result};

/// The single element matched by a marker attribute
#[derive(Debug, Clone, Copy)]
pub struct MarkerElement<'a> {
    tag: &'a str,
    outer: &'a str,
    inner: &'a str,
}

impl<'a> MarkerElement<'a> {
    fn new(document: &'a str, span: &'a MarkedSpan) -> Self {
        MarkerElement {
            tag: &span.tag,
            outer: &document[span.outer.clone()],
            inner: &document[span.inner.clone()],
        }
    }

    /// Lowercased tag name
    pub fn tag(&self) -> &'a str {
        self.tag
    }

    /// The element as it appears in the source, tags included
    pub fn outer_markup(&self) -> &'a str {
        self.outer
    }

    /// Everything between the opening and closing tag
    pub fn inner_markup(&self) -> &'a str {
        self.inner
    }
}

/// Result of running the extractor over one document
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction<T> {
    /// The document with the marker element removed
    pub document: String,
    /// The value produced from the marker element, when it had a child
    pub value: Option<T>,
}

/// Pull the element marked with `attribute` out of `document`.
///
/// No marked element leaves the document untouched. One marked element is
/// removed; if it has exactly one child `value_fn` turns it into the
/// extracted value. More than one marked element, or a marked element with
/// more than one child, is a validation error naming `path`.
pub fn extract<T, F>(document: &str, path: &Path, attribute: &str, value_fn: F) -> Result<Extraction<T>>
where
    F: FnOnce(&MarkerElement<'_>) -> std::result::Result<T, BoxError>,
{
    let spans = scanner::find_marked(document, attribute).map_err(|message| IsleError::Markup {
        path: path.to_path_buf(),
        message,
    })?;

    let span = match spans.as_slice() {
        [] => {
            return Ok(Extraction {
                document: document.to_string(),
                value: None,
            })
        }
        [span] => span,
        _ => {
            return Err(IsleError::MultipleMarkers {
                path: path.to_path_buf(),
                attribute: attribute.to_string(),
            })
        }
    };

    if span.children > 1 {
        return Err(IsleError::MultipleChildren {
            path: path.to_path_buf(),
            attribute: attribute.to_string(),
        });
    }

    let value = if span.children == 1 {
        let element = MarkerElement::new(document, span);
        let value = value_fn(&element).map_err(|source| IsleError::Island {
            path: path.to_path_buf(),
            attribute: attribute.to_string(),
            source,
        })?;
        Some(value)
    } else {
        None
    };

    let mut stripped = String::with_capacity(document.len() - span.outer.len());
    stripped.push_str(&document[..span.outer.start]);
    stripped.push_str(&document[span.outer.end..]);

    Ok(Extraction { document: stripped, value })
}

/// Parse the element's content as any JSON value
pub fn json_value(element: &MarkerElement<'_>) -> std::result::Result<Value, BoxError> {
    Ok(serde_json::from_str(element.inner_markup())?)
}

/// Parse the element's content as a JSON object
pub fn json_object(element: &MarkerElement<'_>) -> std::result::Result<Map<String, Value>, BoxError> {
    match json_value(element)? {
        Value::Object(map) => Ok(map),
        other => Err(format!("expected a JSON object, found {}", json_kind(&other)).into()),
    }
}

/// Keep the element's content as opaque markup
pub fn markup_value(element: &MarkerElement<'_>) -> std::result::Result<String, BoxError> {
    Ok(element.inner_markup().trim().to_string())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;
    use serde_json::json;

    fn path() -> &'static Path {
        Path::new("pages/index.html")
    }

    #[test]
    fn no_marker_is_a_noop() {
        let doc = "<h1>Hello</h1>";
        let result = extract(doc, path(), "data-page", json_value).unwrap();
        assert_eq!(result.document, doc);
        assert_eq!(result.value, None);
    }

    #[test]
    fn single_child_is_extracted_and_removed() {
        let doc = r#"<script type="application/json" data-page>{"title": "Home"}</script><h1>Hello</h1>"#;
        let result = extract(doc, path(), "data-page", json_object).unwrap();
        assert_eq!(result.document, "<h1>Hello</h1>");
        assert_eq!(result.value.unwrap().get("title"), Some(&json!("Home")));
    }

    #[test]
    fn removal_is_exact_when_the_markup_recurs() {
        let island = r#"<i data-page>{"a":1}</i>"#;
        let doc = format!("<!-- {island} --><textarea>{island}</textarea>{island}<p>tail</p>");
        let result = extract(&doc, path(), "data-page", json_value).unwrap();
        assert_eq!(result.document, format!("<!-- {island} --><textarea>{island}</textarea><p>tail</p>"));
        assert_eq!(result.value, Some(json!({"a": 1})));
    }

    #[test]
    fn empty_marker_is_removed_without_a_value() {
        let doc = "<p>a</p><div data-page></div><p>b</p>";
        let result = extract(doc, path(), "data-page", json_value).unwrap();
        assert_eq!(result.document, "<p>a</p><p>b</p>");
        assert_eq!(result.value, None);
    }

    #[test]
    fn liquid_comparisons_stay_a_single_child() {
        let doc = "<div data-field-body>{% if a < b %}yes{% endif %}</div><p>rest</p>";
        let result = extract(doc, Path::new("content/x.html"), "data-field-body", markup_value).unwrap();
        assert_eq!(result.document, "<p>rest</p>");
        assert_eq!(result.value.as_deref(), Some("{% if a < b %}yes{% endif %}"));
    }

    #[test]
    fn json_strings_may_contain_angle_brackets() {
        let doc = r#"<div data-page>{"cmp": "a < b"}</div><p>rest</p>"#;
        let result = extract(doc, path(), "data-page", json_value).unwrap();
        assert_eq!(result.document, "<p>rest</p>");
        assert_eq!(result.value, Some(json!({"cmp": "a < b"})));
    }

    #[test]
    fn multiple_markers_fail_with_the_path() {
        let doc = "<i data-page>{}</i><i data-page>{}</i>";
        let err = extract(doc, path(), "data-page", json_value).unwrap_err();
        assert!(matches!(err, IsleError::MultipleMarkers { .. }));
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("pages/index.html"));
    }

    #[test]
    fn multiple_children_fail() {
        let doc = "<div data-script><script>a()</script><script>b()</script></div>";
        let err = extract(doc, path(), "data-script", markup_value).unwrap_err();
        assert!(matches!(err, IsleError::MultipleChildren { .. }));
        assert!(err.to_string().contains("single child only"));
    }

    #[test]
    fn malformed_json_is_wrapped_with_the_path() {
        let doc = "<script data-page>{not json}</script>";
        let err = extract(doc, path(), "data-page", json_value).unwrap_err();
        assert!(matches!(err, IsleError::Island { .. }));
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().starts_with("pages/index.html"));
    }

    #[test]
    fn non_object_json_is_rejected_by_json_object() {
        let doc = "<script data-page>[1, 2]</script>";
        let err = extract(doc, path(), "data-page", json_object).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn markup_values_keep_inner_markup() {
        let doc = "<template data-script>\n<script src=\"/app.js\"></script>\n</template><main></main>";
        let result = extract(doc, path(), "data-script", markup_value).unwrap();
        assert_eq!(result.value.as_deref(), Some("<script src=\"/app.js\"></script>"));
        assert_eq!(result.document, "<main></main>");
    }

    #[test]
    fn extracting_twice_is_idempotent() {
        let doc = r#"<i data-item>{"n":1}</i><p>x</p>"#;
        let first = extract(doc, path(), "data-item", json_value).unwrap();
        let second = extract(&first.document, path(), "data-item", json_value).unwrap();
        assert_eq!(second.document, first.document);
        assert_eq!(second.value, None);
    }
}
