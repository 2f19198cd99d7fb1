use std::fmt;
use std::path::PathBuf;

use log::error;

use crate::utils::error::{IsleError, Result};

/// Kind of source file an ingestion handler deals with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Partial,
    Data,
    Layout,
    Helper,
    Page,
    Collection,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Partial => "partial",
            Category::Data => "data",
            Category::Layout => "layout",
            Category::Helper => "helper",
            Category::Page => "page",
            Category::Collection => "collection",
        };
        f.write_str(name)
    }
}

/// What happened to one source file
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub category: Category,
    pub result: Result<()>,
}

/// Per-file outcomes of an ingestion run
#[derive(Debug, Default)]
pub struct IngestReport {
    outcomes: Vec<FileOutcome>,
}

impl IngestReport {
    /// Record an outcome; failures are logged as they come in
    pub fn record(&mut self, path: PathBuf, category: Category, result: Result<()>) {
        if let Err(e) = &result {
            error!("Skipping {} {}: {}", category, path.display(), e);
        }
        self.outcomes.push(FileOutcome { path, category, result });
    }

    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    pub fn failures(&self) -> impl Iterator<Item = (&FileOutcome, &IsleError)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().err().map(|e| (outcome, e)))
    }

    /// Number of files of `category` that were registered
    pub fn registered(&self, category: Category) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.category == category && outcome.result.is_ok())
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.result.is_ok())
    }
}
