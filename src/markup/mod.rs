mod extractor;
mod scanner;

pub use extractor::{extract, json_object, json_value, markup_value, Extraction, MarkerElement};
pub use scanner::{find_marked, MarkedSpan};
