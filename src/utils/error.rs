use std::error::Error;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Boxed error used by value functions and helper callbacks
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Common result type for Isleweave operations
pub type Result<T> = std::result::Result<T, IsleError>;

/// Broad classes of failure, used by callers to pick fatal vs. logged handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Markup breaks a structural rule (marker count, child count, layout cycle)
    Validation,
    /// Malformed JSON, markup or template source
    Parse,
    /// Something referenced by name or path could not be resolved
    Lookup,
    /// Reading or writing a file failed
    Io,
    /// Invalid site configuration
    Config,
}

/// Error types for Isleweave operations
#[derive(Debug, Error)]
pub enum IsleError {
    /// More than one element carries the same marker attribute
    #[error("{}: multiple elements marked with `{attribute}`, only one is allowed", path.display())]
    MultipleMarkers { path: PathBuf, attribute: String },

    /// A marker element has more than one child node
    #[error("{}: element marked with `{attribute}` must have a single child only", path.display())]
    MultipleChildren { path: PathBuf, attribute: String },

    /// A layout chain refers back to a layout it already contains
    #[error("layout chain starting at `{start}` loops back to `{repeated}`")]
    CyclicLayout { start: String, repeated: String },

    /// The value of a marker element could not be interpreted
    #[error("{}: invalid `{attribute}` island: {source}", path.display())]
    Island {
        path: PathBuf,
        attribute: String,
        #[source]
        source: BoxError,
    },

    /// A JSON file could not be parsed
    #[error("{}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The markup itself could not be tokenized
    #[error("{}: malformed markup: {message}", path.display())]
    Markup { path: PathBuf, message: String },

    /// A template failed to parse or render
    #[error("{}: template error: {message}", path.display())]
    Template { path: PathBuf, message: String },

    /// No page is registered under the requested key
    #[error("page `{0}` is not registered")]
    PageNotFound(String),

    /// A collection's declared source directory cannot be read
    #[error("{}: collection source cannot be read: {source}", path.display())]
    CollectionSource {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A page key cannot be turned into an output file path
    #[error("page `{0}` has no resolvable destination path")]
    Destination(String),

    /// IO error wrapper
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration error
    #[error("{}: configuration error: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl IsleError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IsleError::MultipleMarkers { .. }
            | IsleError::MultipleChildren { .. }
            | IsleError::CyclicLayout { .. } => ErrorKind::Validation,
            IsleError::Island { .. }
            | IsleError::Json { .. }
            | IsleError::Markup { .. }
            | IsleError::Template { .. } => ErrorKind::Parse,
            IsleError::PageNotFound(_)
            | IsleError::CollectionSource { .. }
            | IsleError::Destination(_) => ErrorKind::Lookup,
            IsleError::Io { .. } => ErrorKind::Io,
            IsleError::Config { .. } => ErrorKind::Config,
        }
    }

    /// Wrap an IO error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        IsleError::Io { path: path.into(), source }
    }

    /// Wrap a liquid error with the template path
    pub fn template(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        IsleError::Template {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_prefixed_with_the_path() {
        let err = IsleError::MultipleMarkers {
            path: PathBuf::from("pages/about.html"),
            attribute: "data-page".to_string(),
        };
        assert!(err.to_string().starts_with("pages/about.html:"));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn island_errors_keep_their_cause() {
        let cause = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = IsleError::Island {
            path: PathBuf::from("pages/index.html"),
            attribute: "data-page".to_string(),
            source: Box::new(cause),
        };
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(std::error::Error::source(&err).is_some());
    }
}
