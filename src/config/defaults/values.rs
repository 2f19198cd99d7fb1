use std::path::PathBuf;

/// Default source directory
pub fn default_source() -> PathBuf {
    PathBuf::from(".")
}

/// Default destination directory
pub fn default_destination() -> PathBuf {
    PathBuf::from("_site")
}

/// Default partials directory
pub fn default_partials_dir() -> PathBuf {
    PathBuf::from("partials")
}

/// Default data directory
pub fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Default layouts directory
pub fn default_layouts_dir() -> PathBuf {
    PathBuf::from("layouts")
}

/// Default helpers directory
pub fn default_helpers_dir() -> PathBuf {
    PathBuf::from("helpers")
}

/// Default pages directory
pub fn default_pages_dir() -> PathBuf {
    PathBuf::from("pages")
}

/// Default collections directory
pub fn default_collections_dir() -> PathBuf {
    PathBuf::from("collections")
}

/// Extensions of markup/template files (partials, layouts, helpers, pages, collection content)
pub fn default_template_ext() -> Vec<String> {
    vec!["html".to_string(), "liquid".to_string()]
}

/// Extensions of data and collection definition files
pub fn default_data_ext() -> Vec<String> {
    vec!["json".to_string()]
}

/// Layout used when a page names none, or names one that does not exist
pub fn default_layout() -> String {
    "default".to_string()
}

/// Marker for the page data island
pub fn default_page_data_marker() -> String {
    "data-page".to_string()
}

/// Marker for the page script island
pub fn default_page_script_marker() -> String {
    "data-script".to_string()
}

/// Marker for layout template metadata
pub fn default_template_data_marker() -> String {
    "data-template".to_string()
}

/// Marker for collection item data
pub fn default_collection_data_marker() -> String {
    "data-item".to_string()
}

/// Prefix of collection content-field markers
pub fn default_collection_field_prefix() -> String {
    "data-field-".to_string()
}
