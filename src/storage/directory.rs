use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{ContentSource, RawBatch, RawEntry};
use crate::constants::JSON_EXTENSION;
use crate::diagnostics::{DropReason, DroppedRecord};
use crate::domain::EntityKind;
use crate::error::{ContentError, Result};

/// One JSON object per file: `<root>/casinos/<slug>.json`
///
/// Files are visited in file-name order. A file that cannot be read or parsed is
/// skipped and reported; failing to list the directory itself is an error.
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn dir_for(&self, kind: EntityKind) -> PathBuf {
        self.root.join(kind.collection_name())
    }

    async fn list_json_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut entries = tokio::fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_json = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map_or(false, |ext| ext.eq_ignore_ascii_case(JSON_EXTENSION));
            if is_json && entry.file_type().await?.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

#[async_trait]
impl ContentSource for DirectorySource {
    fn describe(&self) -> String {
        format!("record directories in {}", self.root.display())
    }

    async fn fetch(&self, kind: EntityKind) -> Result<RawBatch> {
        let dir = self.dir_for(kind);

        let files = match Self::list_json_files(&dir).await {
            Ok(files) => files,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Content directory {} does not exist", dir.display());
                return Ok(RawBatch::missing(format!("{}/", kind.collection_name())));
            }
            Err(e) => return Err(ContentError::source_at(&dir, e.to_string())),
        };

        let mut batch = RawBatch::default();
        for path in files {
            let origin = record_origin(kind, &path);

            let text = match tokio::fs::read_to_string(&path).await {
                Ok(text) => text,
                Err(e) => {
                    debug!("Skipping unreadable content file {}: {}", path.display(), e);
                    batch
                        .skipped
                        .push(DroppedRecord::new(origin, DropReason::Unreadable(e.to_string())));
                    continue;
                }
            };

            match serde_json::from_str::<Value>(&text) {
                Ok(value) => batch.entries.push(RawEntry { origin, value }),
                Err(e) => {
                    debug!("Skipping unparseable content file {}: {}", path.display(), e);
                    batch
                        .skipped
                        .push(DroppedRecord::new(origin, DropReason::Unparseable(e.to_string())));
                }
            }
        }

        debug!(
            "Read {} raw entries from {} ({} skipped)",
            batch.entries.len(),
            dir.display(),
            batch.skipped.len()
        );
        Ok(batch)
    }
}

fn record_origin(kind: EntityKind, path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}/{}", kind.collection_name(), file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_reads_files_in_name_order_and_skips_broken_ones() {
        let dir = tempdir().unwrap();
        let guides = dir.path().join("guides");
        fs::create_dir(&guides).unwrap();
        fs::write(guides.join("b-guide.json"), r#"{"slug":"b-guide","title":"B"}"#).unwrap();
        fs::write(guides.join("a-guide.json"), r#"{"slug":"a-guide","title":"A"}"#).unwrap();
        fs::write(guides.join("broken.json"), "{ nope").unwrap();
        fs::write(guides.join("notes.txt"), "ignored").unwrap();

        let batch = DirectorySource::new(dir.path())
            .fetch(EntityKind::Guide)
            .await
            .unwrap();

        let origins: Vec<&str> = batch.entries.iter().map(|e| e.origin.as_str()).collect();
        assert_eq!(origins, vec!["guides/a-guide.json", "guides/b-guide.json"]);
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].origin, "guides/broken.json");
        assert!(matches!(batch.skipped[0].reason, DropReason::Unparseable(_)));
    }

    #[tokio::test]
    async fn test_non_utf8_file_is_reported_unreadable() {
        let dir = tempdir().unwrap();
        let countries = dir.path().join("countries");
        fs::create_dir(&countries).unwrap();
        fs::write(countries.join("au.json"), r#"{"code":"AU","name":"Australia"}"#).unwrap();
        fs::write(countries.join("latin1.json"), [b'{', 0xff, 0xfe, b'}']).unwrap();

        let batch = DirectorySource::new(dir.path())
            .fetch(EntityKind::Country)
            .await
            .unwrap();

        assert_eq!(batch.entries.len(), 1);
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].origin, "countries/latin1.json");
        assert!(matches!(batch.skipped[0].reason, DropReason::Unreadable(_)));
    }

    #[tokio::test]
    async fn test_missing_directory_is_reported_not_fatal() {
        let dir = tempdir().unwrap();
        let batch = DirectorySource::new(dir.path())
            .fetch(EntityKind::Casino)
            .await
            .unwrap();

        assert!(batch.entries.is_empty());
        assert_eq!(batch.skipped[0].origin, "casinos/");
        assert_eq!(batch.skipped[0].reason, DropReason::SourceMissing);
    }
}
