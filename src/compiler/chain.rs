use std::collections::HashSet;

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::config::Config;
use crate::registry::{ContentRegistry, Layout};
use crate::utils::error::{IsleError, Result};

/// Resolve the layouts a page is wrapped in, leaf first.
///
/// Each layout names its parent in its template data. A name that is not
/// registered is replaced by the default layout; the chain ends when there
/// is no parent or the default layout is missing or already used. Meeting
/// a layout twice any other way is a cycle.
pub fn resolve_chain<'a>(registry: &'a ContentRegistry, config: &Config, start: &str) -> Result<Vec<&'a Layout>> {
    let default_name = config.default_layout.as_str();
    let mut chain: Vec<&'a Layout> = Vec::new();
    let mut visited: HashSet<&'a str> = HashSet::new();
    let mut next = Some(start.to_string());

    while let Some(name) = next.take() {
        let layout = match registry.layout(&name) {
            Some(layout) => layout,
            None if name == default_name || visited.contains(default_name) => {
                debug!("Layout '{}' not found, ending chain of '{}'", name, start);
                break;
            }
            None => {
                if !config.silent_layout_fallback {
                    warn!("Layout '{}' not found, falling back to '{}'", name, default_name);
                }
                match registry.layout(default_name) {
                    Some(layout) => layout,
                    None => {
                        debug!("Default layout '{}' is not registered", default_name);
                        break;
                    }
                }
            }
        };

        if !visited.insert(layout.name.as_str()) {
            return Err(IsleError::CyclicLayout {
                start: start.to_string(),
                repeated: layout.name.clone(),
            });
        }

        chain.push(layout);
        next = layout.parent().map(str::to_string);
    }

    Ok(chain)
}

/// Union of the chain's template data; a layout overrides its ancestors
pub fn template_data(chain: &[&Layout]) -> Map<String, Value> {
    let mut merged = Map::new();
    for layout in chain.iter().rev() {
        for (key, value) in &layout.template_data {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
