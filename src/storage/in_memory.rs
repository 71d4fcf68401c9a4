use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use super::{ContentSource, RawBatch};
use crate::domain::EntityKind;
use crate::error::Result;

/// In-memory content source for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    collections: HashMap<EntityKind, Vec<Value>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the raw values of one collection
    pub fn with(mut self, kind: EntityKind, values: Vec<Value>) -> Self {
        self.collections.insert(kind, values);
        self
    }

    pub fn insert(&mut self, kind: EntityKind, value: Value) {
        self.collections.entry(kind).or_default().push(value);
    }
}

#[async_trait]
impl ContentSource for InMemorySource {
    fn describe(&self) -> String {
        "in-memory content".to_string()
    }

    async fn fetch(&self, kind: EntityKind) -> Result<RawBatch> {
        let values = self.collections.get(&kind).cloned().unwrap_or_default();
        Ok(RawBatch::from_array(
            &format!("memory:{}", kind.collection_name()),
            values,
        ))
    }
}
