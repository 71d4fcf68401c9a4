pub mod aggregate;
pub mod directory;
pub mod in_memory;

pub use aggregate::AggregateFileSource;
pub use directory::DirectorySource;
pub use in_memory::InMemorySource;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::diagnostics::{DropReason, DroppedRecord};
use crate::domain::EntityKind;
use crate::error::{ContentError, Result};

/// One raw JSON value and where it was read from
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    pub origin: String,
    pub value: Value,
}

/// Everything a source could read for one collection
#[derive(Debug, Default)]
pub struct RawBatch {
    pub entries: Vec<RawEntry>,
    /// Entries lost before normalization (unreadable files, missing sources)
    pub skipped: Vec<DroppedRecord>,
}

impl RawBatch {
    pub fn missing(origin: impl Into<String>) -> Self {
        RawBatch {
            entries: Vec::new(),
            skipped: vec![DroppedRecord::new(origin, DropReason::SourceMissing)],
        }
    }

    /// Entries for each element of an array, origins `<label>[<index>]`
    pub fn from_array(label: &str, values: Vec<Value>) -> Self {
        let entries = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| RawEntry {
                origin: format!("{}[{}]", label, index),
                value,
            })
            .collect();
        RawBatch {
            entries,
            skipped: Vec::new(),
        }
    }
}

/// Read-only handle to content storage, injected into the catalog
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Human-readable description used in load reports
    fn describe(&self) -> String;

    /// Reads every raw entry of one collection
    async fn fetch(&self, kind: EntityKind) -> Result<RawBatch>;
}

/// On-disk arrangement of content files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// `<root>/casinos.json` holding an array
    #[default]
    Aggregate,
    /// `<root>/casinos/<slug>.json`, one object per file
    Directory,
}

impl FromStr for Layout {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "aggregate" => Ok(Layout::Aggregate),
            "directory" => Ok(Layout::Directory),
            other => Err(ContentError::Config(format!(
                "unknown content layout '{}' (expected 'aggregate' or 'directory')",
                other
            ))),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Aggregate => f.write_str("aggregate"),
            Layout::Directory => f.write_str("directory"),
        }
    }
}

/// Opens the file-backed source for `layout` rooted at `root`
pub fn open_source(layout: Layout, root: impl Into<PathBuf>) -> Arc<dyn ContentSource> {
    match layout {
        Layout::Aggregate => Arc::new(AggregateFileSource::new(root)),
        Layout::Directory => Arc::new(DirectorySource::new(root)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_layout_parses_case_insensitively() {
        assert_eq!("Directory".parse::<Layout>().unwrap(), Layout::Directory);
        assert_eq!(" aggregate ".parse::<Layout>().unwrap(), Layout::Aggregate);
        assert!("sqlite".parse::<Layout>().is_err());
    }

    #[test]
    fn test_batch_origins_include_index() {
        let batch = RawBatch::from_array("casinos.json", vec![json!(null), json!({})]);
        let origins: Vec<&str> = batch.entries.iter().map(|e| e.origin.as_str()).collect();
        assert_eq!(origins, vec!["casinos.json[0]", "casinos.json[1]"]);
    }
}
