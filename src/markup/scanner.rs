//! Locates elements carrying a given attribute in an HTML document.
//!
//! The document is tokenized with `quick-xml` using lenient settings and an
//! element tree is tracked on a stack, so every match comes back with the
//! exact byte span it occupies. Cutting that span removes the element and
//! nothing else, even when the same serialized text appears elsewhere.

use std::ops::Range;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Elements that never have content or a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source", "track",
    "wbr",
];

/// Elements whose content is opaque text up to the matching close tag
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Location of one marked element inside a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedSpan {
    /// Lowercased tag name
    pub tag: String,
    /// Bytes covered by the element, tags included
    pub outer: Range<usize>,
    /// Bytes between the opening and closing tag
    pub inner: Range<usize>,
    /// Number of direct child nodes
    pub children: usize,
}

#[derive(Debug)]
struct OpenElement {
    tag: String,
    start: usize,
    inner_start: usize,
    marked: bool,
    children: usize,
    in_text: bool,
}

/// Find every element carrying `attribute`, in document order
pub fn find_marked(document: &str, attribute: &str) -> Result<Vec<MarkedSpan>, String> {
    let masked = mask_bare_angles(document)?;
    let document = masked.as_str();
    let mut found = Vec::new();
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut offset = 0;

    // Raw-text elements restart the reader right after their closing tag
    'document: loop {
        let mut reader = Reader::from_str(&document[offset..]);
        let config = reader.config_mut();
        config.trim_text(false);
        config.enable_all_checks(false);
        config.allow_unmatched_ends = true;
        config.allow_dangling_amp = true;

        loop {
            let before = offset + reader.buffer_position() as usize;
            let event = reader
                .read_event()
                .map_err(|e| format!("at byte {}: {}", offset + reader.buffer_position() as usize, e))?;
            let after = offset + reader.buffer_position() as usize;

            match event {
                Event::Start(element) => {
                    note_node(&mut stack);
                    let tag = tag_name(element.name().as_ref());
                    let marked = has_attribute(&element, attribute);

                    if VOID_ELEMENTS.contains(&tag.as_str()) {
                        if marked {
                            found.push(MarkedSpan { tag, outer: before..after, inner: after..after, children: 0 });
                        }
                    } else if RAW_TEXT_ELEMENTS.contains(&tag.as_str()) {
                        let (inner_end, close_end) = raw_text_end(document, after, &tag);
                        if marked {
                            let children = usize::from(!document[after..inner_end].trim().is_empty());
                            found.push(MarkedSpan { tag, outer: before..close_end, inner: after..inner_end, children });
                        }
                        offset = close_end;
                        continue 'document;
                    } else {
                        stack.push(OpenElement {
                            tag,
                            start: before,
                            inner_start: after,
                            marked,
                            children: 0,
                            in_text: false,
                        });
                    }
                }
                Event::Empty(element) => {
                    note_node(&mut stack);
                    if has_attribute(&element, attribute) {
                        let tag = tag_name(element.name().as_ref());
                        found.push(MarkedSpan { tag, outer: before..after, inner: after..after, children: 0 });
                    }
                }
                Event::End(element) => {
                    let tag = tag_name(element.name().as_ref());
                    // Stray end tags are ignored; skipped-over elements were left open
                    if let Some(index) = stack.iter().rposition(|open| open.tag == tag) {
                        while stack.len() > index + 1 {
                            if let Some(open) = stack.pop() {
                                close(open, before, before, &mut found);
                            }
                        }
                        if let Some(open) = stack.pop() {
                            close(open, after, before, &mut found);
                        }
                    }
                }
                Event::Text(text) => {
                    if !text.iter().all(u8::is_ascii_whitespace) {
                        note_text(&mut stack);
                    }
                }
                Event::GeneralRef(_) | Event::CData(_) => note_text(&mut stack),
                Event::Comment(_) => note_node(&mut stack),
                Event::Eof => {
                    let end = document.len();
                    while let Some(open) = stack.pop() {
                        close(open, end, end, &mut found);
                    }
                    break 'document;
                }
                _ => {}
            }
        }
    }

    found.sort_by_key(|span| span.outer.start);
    Ok(found)
}

/// Replace every `<` that cannot open a tag with an inert byte.
///
/// Only `<` followed by an ASCII letter, `/`, `!` or `?` starts markup; a
/// comparison such as `{% if a < b %}` stays text. Byte offsets are kept.
fn mask_bare_angles(document: &str) -> Result<String, String> {
    let mut bytes = document.as_bytes().to_vec();
    for i in 0..bytes.len() {
        if bytes[i] != b'<' {
            continue;
        }
        let opens_tag = matches!(
            bytes.get(i + 1),
            Some(next) if next.is_ascii_alphabetic() || matches!(next, b'/' | b'!' | b'?')
        );
        if !opens_tag {
            bytes[i] = b'_';
        }
    }
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

fn close(open: OpenElement, outer_end: usize, inner_end: usize, found: &mut Vec<MarkedSpan>) {
    if open.marked {
        found.push(MarkedSpan {
            tag: open.tag,
            outer: open.start..outer_end,
            inner: open.inner_start..inner_end,
            children: open.children,
        });
    }
}

/// Count a non-text child on the innermost open element
fn note_node(stack: &mut [OpenElement]) {
    if let Some(parent) = stack.last_mut() {
        parent.children += 1;
        parent.in_text = false;
    }
}

/// Count a text child, merging adjacent text and entity references into one node
fn note_text(stack: &mut [OpenElement]) {
    if let Some(parent) = stack.last_mut() {
        if !parent.in_text {
            parent.children += 1;
            parent.in_text = true;
        }
    }
}

fn tag_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).to_ascii_lowercase()
}

fn has_attribute(element: &BytesStart<'_>, attribute: &str) -> bool {
    let mut attributes = element.html_attributes();
    attributes.with_checks(false);
    attributes
        .flatten()
        .any(|attr| attr.key.as_ref().eq_ignore_ascii_case(attribute.as_bytes()))
}

/// End of the text content of a raw-text element starting at `from`, and the
/// end of its closing tag
fn raw_text_end(document: &str, from: usize, tag: &str) -> (usize, usize) {
    // ASCII lowercasing keeps byte offsets intact
    let haystack = document[from..].to_ascii_lowercase();
    let needle = format!("</{}", tag);

    match haystack.find(&needle) {
        Some(relative) => {
            let inner_end = from + relative;
            let close_end = document[inner_end..]
                .find('>')
                .map_or(document.len(), |i| inner_end + i + 1);
            (inner_end, close_end)
        }
        None => (document.len(), document.len()),
    }
}
