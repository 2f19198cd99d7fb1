pub mod processor;
pub mod types;

pub use processor::{collection_page, expand_collection, expand_collections};
pub use types::CollectionDefinition;
