//! Isleweave builds static sites out of plain HTML.
//!
//! Pages, layouts and collection items carry their metadata as marked
//! elements ("islands") inside the markup. The islands are pulled out,
//! the remaining markup is rendered with Liquid and wrapped in a chain of
//! layouts.

pub mod collections;
pub mod compiler;
pub mod config;
pub mod ingest;
pub mod markup;
pub mod registry;
pub mod site;
pub mod template;
pub mod utils;

pub use compiler::{CompiledPage, PageCompiler};
pub use config::Config;
pub use registry::{ContentRegistry, RegistryBuilder};
pub use site::Site;
pub use utils::error::{ErrorKind, IsleError, Result};
