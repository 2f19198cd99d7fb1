mod defaults;
mod loader;
mod types;
mod validation;

pub use loader::load_config;
pub use types::*;
pub use validation::validate_config;
