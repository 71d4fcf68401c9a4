use std::collections::HashSet;
use tracing::{debug, info};

use crate::diagnostics::{DropReason, DroppedRecord, LoadReport};
use crate::error::Result;
use crate::normalize::{try_normalize, Record};
use crate::storage::{ContentSource, RawBatch};

/// A loaded collection plus the diagnostics of how it was built
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub report: LoadReport,
}

impl<T> Loaded<T> {
    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}

/// Reads one collection from `source` and normalizes it.
///
/// Invalid entries never reach the returned records; they are listed in the report.
/// Only storage failures surface as errors.
pub async fn load_collection<T: Record>(source: &dyn ContentSource) -> Result<Loaded<T>> {
    let batch = source.fetch(T::KIND).await?;
    Ok(collect_records(source.describe(), batch))
}

/// Normalizes an already-read batch. The first record wins on duplicate keys.
pub fn collect_records<T: Record>(source: impl Into<String>, batch: RawBatch) -> Loaded<T> {
    let kind = T::KIND;
    let mut report = LoadReport::new(kind, source);
    report.dropped = batch.skipped;

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(batch.entries.len());

    for entry in batch.entries {
        match try_normalize::<T>(&entry.value) {
            Ok(record) => {
                if seen.insert(record.key().to_string()) {
                    records.push(record);
                } else {
                    debug!(
                        origin = %entry.origin,
                        key = record.key(),
                        "Dropping duplicate {}",
                        kind
                    );
                    let reason = DropReason::DuplicateKey(record.key().to_string());
                    report.dropped.push(DroppedRecord::new(entry.origin, reason));
                }
            }
            Err(rejection) => {
                debug!(origin = %entry.origin, "Dropping invalid {}: {}", kind, rejection);
                report.dropped.push(DroppedRecord::new(entry.origin, rejection));
            }
        }
    }

    report.accepted = records.len();

    let label = kind.collection_name();
    metrics::counter!("content_records_loaded_total", "entity" => label)
        .increment(report.accepted as u64);
    metrics::counter!("content_records_dropped_total", "entity" => label)
        .increment(report.dropped.len() as u64);

    info!(
        entity = label,
        accepted = report.accepted,
        dropped = report.dropped.len(),
        "Loaded collection"
    );

    Loaded { records, report }
}
