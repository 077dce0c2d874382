//! Single-slot store for the most recently completed job.
//!
//! Each write replaces the previous record; no history is kept. The record
//! lives in one JSON file under the app data directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The persisted artifact of the last completed job.
///
/// Serializes to `{"transcript": <text>}` or `{"error": <text>}`, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultRecord {
    Transcript(String),
    Error(String),
}

impl ResultRecord {
    pub fn transcript(text: impl Into<String>) -> Self {
        Self::Transcript(text.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    /// The text a broadcast message is built from.
    pub fn body_text(&self) -> &str {
        match self {
            Self::Transcript(text) => text,
            Self::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Overwrite-on-write store holding the single most recent record.
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn at_default_location() -> Result<Self> {
        Ok(Self::new(crate::global::result_file()?))
    }

    /// Overwrites whatever was stored before. The prior record is gone.
    pub async fn put(&self, record: &ResultRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create data directory")?;
        }

        let content =
            serde_json::to_string_pretty(record).context("Failed to serialize result record")?;

        // Write a sibling temp file and rename over the slot, so an
        // interrupted write can never leave a torn record behind.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content)
            .await
            .context("Failed to write result record")?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .context("Failed to replace result record")?;

        Ok(())
    }

    /// Returns `None` until the first successful `put`.
    pub async fn get(&self) -> Result<Option<ResultRecord>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let record = serde_json::from_str(&content)
                    .context("Failed to parse stored result record")?;
                Ok(Some(record))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context("Failed to read result record"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, ResultStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("latest.json"));
        (dir, store)
    }

    #[test]
    fn test_record_serialization_shape() {
        let record = ResultRecord::transcript("hello");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"transcript":"hello"}"#);

        let record = ResultRecord::error("No transcript found.");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"error":"No transcript found."}"#);
    }

    #[test]
    fn test_record_body_text() {
        assert_eq!(ResultRecord::transcript("hello").body_text(), "hello");
        assert_eq!(ResultRecord::error("boom").body_text(), "boom");
        assert!(ResultRecord::error("boom").is_error());
        assert!(!ResultRecord::transcript("hello").is_error());
    }

    #[tokio::test]
    async fn test_get_before_first_put_returns_none() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_then_get_returns_last_value() {
        let (_dir, store) = temp_store();
        let record = ResultRecord::transcript("hello");

        store.put(&record).await.unwrap();
        assert_eq!(store.get().await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_second_put_makes_first_unobservable() {
        let (_dir, store) = temp_store();

        store.put(&ResultRecord::transcript("first")).await.unwrap();
        store
            .put(&ResultRecord::error("No transcript found."))
            .await
            .unwrap();

        assert_eq!(
            store.get().await.unwrap(),
            Some(ResultRecord::error("No transcript found."))
        );
    }

    #[tokio::test]
    async fn test_put_leaves_no_temp_file_behind() {
        let (_dir, store) = temp_store();

        store.put(&ResultRecord::transcript("hello")).await.unwrap();

        assert!(store.path.exists());
        assert!(!store.path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_put_replaces_a_torn_slot_file() {
        let (_dir, store) = temp_store();
        std::fs::write(&store.path, "{ torn").unwrap();
        assert!(store.get().await.is_err());

        store.put(&ResultRecord::transcript("hello")).await.unwrap();

        assert_eq!(
            store.get().await.unwrap(),
            Some(ResultRecord::transcript("hello"))
        );
    }

    #[tokio::test]
    async fn test_put_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("nested").join("latest.json"));

        store.put(&ResultRecord::transcript("hello")).await.unwrap();
        assert!(store.get().await.unwrap().is_some());
    }
}
