use serde::Serialize;
use std::fmt;

use crate::domain::EntityKind;
use crate::normalize::Rejection;

/// Why an entry never made it into a loaded collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum DropReason {
    /// The value was read but failed normalization
    Rejected(String),
    /// Another record already owns this key
    DuplicateKey(String),
    /// A per-record file could not be read
    Unreadable(String),
    /// A per-record file is not valid JSON
    Unparseable(String),
    /// An aggregate file holds something other than an array
    NotAnArray,
    /// The aggregate file or record directory does not exist
    SourceMissing,
}

impl From<Rejection> for DropReason {
    fn from(rejection: Rejection) -> Self {
        DropReason::Rejected(rejection.to_string())
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::Rejected(why) => write!(f, "rejected: {}", why),
            DropReason::DuplicateKey(key) => write!(f, "duplicate key `{}`", key),
            DropReason::Unreadable(why) => write!(f, "unreadable: {}", why),
            DropReason::Unparseable(why) => write!(f, "invalid JSON: {}", why),
            DropReason::NotAnArray => f.write_str("top-level value is not an array"),
            DropReason::SourceMissing => f.write_str("source does not exist"),
        }
    }
}

/// A dropped entry and where it came from (`casinos.json[3]`, `guides/foo.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedRecord {
    pub origin: String,
    pub reason: DropReason,
}

impl DroppedRecord {
    pub fn new(origin: impl Into<String>, reason: impl Into<DropReason>) -> Self {
        DroppedRecord {
            origin: origin.into(),
            reason: reason.into(),
        }
    }
}

/// Outcome of one collection load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub kind: EntityKind,
    /// Human-readable description of the content source
    pub source: String,
    pub accepted: usize,
    pub dropped: Vec<DroppedRecord>,
}

impl LoadReport {
    pub fn new(kind: EntityKind, source: impl Into<String>) -> Self {
        LoadReport {
            kind,
            source: source.into(),
            accepted: 0,
            dropped: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} from {}: {} accepted, {} dropped",
            self.kind.collection_name(),
            self.source,
            self.accepted,
            self.dropped.len()
        )?;
        for dropped in &self.dropped {
            write!(f, "\n  - {}: {}", dropped.origin, dropped.reason)?;
        }
        Ok(())
    }
}
