use std::path::{Component, Path, PathBuf};

/// Get file name without extension
pub fn get_stem<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref()
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(|s| s.to_string())
}

/// Split a path relative to `base` into its segments, dropping the extension
/// of the last one.
///
/// `data/nav/main.json` relative to `data` becomes `["nav", "main"]`.
pub fn relative_segments(path: &Path, base: &Path) -> Vec<String> {
    let relative = path.strip_prefix(base).unwrap_or(path);
    let mut segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if let Some(last) = segments.last_mut() {
        if let Some(stem) = get_stem(last.as_str()) {
            *last = stem;
        }
    }

    segments
}

/// Registry key for a file: its path relative to `base`, without extension,
/// joined with `/`
pub fn relative_key(path: &Path, base: &Path) -> String {
    relative_segments(path, base).join("/")
}

/// Join a URL-ish prefix and a relative key with exactly one `/` between them
pub fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        return key.to_string();
    }

    format!("{}/{}", prefix.trim_end_matches('/'), key.trim_start_matches('/'))
}

/// Caller-facing path of a compiled page.
///
/// `blog/post-1` becomes `/blog/post-1.html`; a basename of exactly
/// `index.html` is elided so `blog/index` becomes `/blog/`.
pub fn canonical_path(key: &str) -> String {
    let path = format!("/{}.html", key.trim_start_matches('/'));

    match path.strip_suffix("index.html") {
        Some(dir) if dir.ends_with('/') => dir.to_string(),
        _ => path,
    }
}

/// Output file for a page key, or `None` when the key cannot denote a file
/// below `output_root`
pub fn output_path(output_root: &Path, key: &str) -> Option<PathBuf> {
    let relative = Path::new(key.trim_start_matches('/'));

    let mut has_name = false;
    for component in relative.components() {
        match component {
            Component::Normal(_) => has_name = true,
            Component::CurDir => {}
            _ => return None,
        }
    }

    if !has_name {
        return None;
    }

    Some(output_root.join(format!("{}.html", relative.to_string_lossy())))
}
