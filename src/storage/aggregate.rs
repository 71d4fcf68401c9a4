use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, warn};

use super::{ContentSource, RawBatch};
use crate::constants::JSON_EXTENSION;
use crate::diagnostics::{DropReason, DroppedRecord};
use crate::domain::EntityKind;
use crate::error::{ContentError, Result};

/// One JSON array file per collection: `<root>/casinos.json`, `<root>/countries.json`, ...
pub struct AggregateFileSource {
    root: PathBuf,
}

impl AggregateFileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, kind: EntityKind) -> PathBuf {
        self.root.join(format!("{}.{}", kind.collection_name(), JSON_EXTENSION))
    }
}

#[async_trait]
impl ContentSource for AggregateFileSource {
    fn describe(&self) -> String {
        format!("aggregate files in {}", self.root.display())
    }

    async fn fetch(&self, kind: EntityKind) -> Result<RawBatch> {
        let path = self.path_for(kind);
        let label = format!("{}.{}", kind.collection_name(), JSON_EXTENSION);

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Content file {} does not exist", path.display());
                return Ok(RawBatch::missing(label));
            }
            Err(e) => return Err(ContentError::source_at(&path, e.to_string())),
        };

        let value: Value = serde_json::from_str(&text)
            .map_err(|e| ContentError::source_at(&path, format!("invalid JSON: {}", e)))?;

        match value {
            Value::Array(items) => {
                debug!("Read {} raw entries from {}", items.len(), path.display());
                Ok(RawBatch::from_array(&label, items))
            }
            _ => {
                warn!("Content file {} is not a JSON array", path.display());
                Ok(RawBatch {
                    entries: Vec::new(),
                    skipped: vec![DroppedRecord::new(label, DropReason::NotAnArray)],
                })
            }
        }
    }
}
