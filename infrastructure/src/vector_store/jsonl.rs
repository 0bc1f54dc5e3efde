//! JSONL-backed vector store.
//!
//! Each passage is one JSON line in `<persist_directory>/passages.jsonl`:
//!
//! ```json
//! {"id":"…","text":"…","metadata":{"source":"https://…"},"model":"…","embedding":[…],"created_at":"…"}
//! ```
//!
//! `model` names the embedder that produced the vector. Records from a
//! different embedder are skipped with a warning: their vectors are not
//! comparable with the query's.
//!
//! Writes append whole lines in a single `write` on a file opened in append
//! mode, so handles in different sessions (or processes) never overwrite
//! each other. Every read first picks up lines appended since the last
//! read, so all handles on one directory see the same passages.

use crate::embedding::{Embedder, cosine_similarity};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagerag_application::{StoreError, VectorStore};
use pagerag_domain::{Passage, PassageMetadata, ScoredPassage};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// File name of the passage log inside the persist directory
pub const STORE_FILE_NAME: &str = "passages.jsonl";

/// One line of the passage log
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PassageRecord {
    id: String,
    text: String,
    metadata: PassageMetadata,
    model: String,
    embedding: Vec<f32>,
    created_at: DateTime<Utc>,
}

/// Records read so far and the byte offset reading stopped at
#[derive(Default)]
struct LoadedRecords {
    records: Vec<PassageRecord>,
    offset: u64,
}

/// Vector store persisted as an append-only JSONL file
pub struct JsonlVectorStore {
    path: PathBuf,
    embedder: Arc<dyn Embedder>,
    loaded: Mutex<LoadedRecords>,
}

impl JsonlVectorStore {
    /// Open (or create) the store in `persist_directory`.
    ///
    /// Existing passages are loaded; malformed lines are skipped with a warning.
    pub fn open(
        persist_directory: &Path,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self, StoreError> {
        let open_error = |e: std::io::Error| StoreError::Open {
            path: persist_directory.to_path_buf(),
            reason: e.to_string(),
        };

        std::fs::create_dir_all(persist_directory).map_err(open_error)?;
        let path = persist_directory.join(STORE_FILE_NAME);
        // Create the file up front so a read-only location fails here
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(open_error)?;

        let store = Self {
            path,
            embedder,
            loaded: Mutex::new(LoadedRecords::default()),
        };
        let count = store.refresh().map_err(|e| StoreError::Open {
            path: persist_directory.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!(
            "Opened vector store {} ({} passages, embedder {})",
            store.path.display(),
            count,
            store.embedder.model_id()
        );
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read lines appended since the last read; returns the total record count.
    fn refresh(&self) -> Result<usize, StoreError> {
        let mut loaded = self
            .loaded
            .lock()
            .map_err(|_| StoreError::Read("store lock poisoned".to_string()))?;

        let mut file = File::open(&self.path).map_err(|e| StoreError::Read(e.to_string()))?;
        file.seek(SeekFrom::Start(loaded.offset))
            .map_err(|e| StoreError::Read(e.to_string()))?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)
            .map_err(|e| StoreError::Read(e.to_string()))?;

        // A trailing partial line belongs to a write still in progress
        let Some(complete) = buf.iter().rposition(|&b| b == b'\n').map(|i| i + 1) else {
            return Ok(loaded.records.len());
        };

        let model = self.embedder.model_id();
        let mut foreign: Vec<String> = Vec::new();
        let mut skipped = 0usize;
        for (i, line) in String::from_utf8_lossy(&buf[..complete]).lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<PassageRecord>(line) {
                Ok(record) if record.model == model => loaded.records.push(record),
                Ok(record) => {
                    skipped += 1;
                    if !foreign.contains(&record.model) {
                        foreign.push(record.model);
                    }
                }
                Err(e) => warn!(
                    "Skipping malformed line in {} (byte offset {}, line {}): {}",
                    self.path.display(),
                    loaded.offset,
                    i + 1,
                    e
                ),
            }
        }
        if skipped > 0 {
            warn!(
                "Skipping {} passages in {} embedded with {} (store embedder is {}); re-ingest them to search",
                skipped,
                self.path.display(),
                foreign.join(", "),
                model
            );
        }
        loaded.offset += complete as u64;
        Ok(loaded.records.len())
    }

    fn append(&self, records: &[PassageRecord]) -> Result<(), StoreError> {
        let mut lines = String::new();
        for record in records {
            let line =
                serde_json::to_string(record).map_err(|e| StoreError::Write(e.to_string()))?;
            lines.push_str(&line);
            lines.push('\n');
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::Write(e.to_string()))?;
        file.write_all(lines.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| StoreError::Write(e.to_string()))
    }
}

#[async_trait]
impl VectorStore for JsonlVectorStore {
    async fn add_texts(
        &self,
        texts: &[String],
        metadatas: &[PassageMetadata],
    ) -> Result<(), StoreError> {
        if texts.len() != metadatas.len() {
            return Err(StoreError::LengthMismatch {
                texts: texts.len(),
                metadatas: metadatas.len(),
            });
        }
        if texts.is_empty() {
            return Ok(());
        }

        let embeddings = self
            .embedder
            .embed(texts)
            .await
            .map_err(|e| StoreError::Embedding(e.to_string()))?;
        if embeddings.len() != texts.len() {
            return Err(StoreError::Embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            )));
        }

        let created_at = Utc::now();
        let records: Vec<PassageRecord> = texts
            .iter()
            .zip(metadatas)
            .zip(embeddings)
            .map(|((text, metadata), embedding)| PassageRecord {
                id: uuid::Uuid::new_v4().to_string(),
                text: text.clone(),
                metadata: metadata.clone(),
                model: self.embedder.model_id().to_string(),
                embedding,
                created_at,
            })
            .collect();

        self.append(&records)?;
        debug!(
            "Appended {} passages to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<ScoredPassage>, StoreError> {
        if k == 0 || self.refresh()? == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self
            .embedder
            .embed(&[query.to_string()])
            .await
            .map_err(|e| StoreError::Embedding(e.to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Embedding("no embedding for query".to_string()))?;

        let loaded = self
            .loaded
            .lock()
            .map_err(|_| StoreError::Read("store lock poisoned".to_string()))?;

        let mut scored: Vec<ScoredPassage> = loaded
            .records
            .iter()
            .map(|record| ScoredPassage {
                passage: Passage::new(record.text.clone(), record.metadata.clone()),
                score: cosine_similarity(&query_embedding, &record.embedding),
            })
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);
        Ok(scored)
    }

    async fn len(&self) -> Result<usize, StoreError> {
        self.refresh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::{EmbedError, HashingEmbedder};
    use pagerag_domain::SOURCE_KEY;

    fn hashing() -> Arc<dyn Embedder> {
        Arc::new(HashingEmbedder::new(128))
    }

    fn source(url: &str) -> PassageMetadata {
        PassageMetadata::new().with(SOURCE_KEY, url)
    }

    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        async fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
            Err(EmbedError::Malformed("model unavailable".to_string()))
        }

        fn model_id(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_open_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let persist = dir.path().join("nested").join("chroma_db");

        let store = JsonlVectorStore::open(&persist, hashing()).unwrap();

        assert!(store.path().exists());
        assert_eq!(store.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_and_search_ranks_by_similarity() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlVectorStore::open(dir.path(), hashing()).unwrap();

        store
            .add_texts(
                &[
                    "Rust ownership rules and the borrow checker".to_string(),
                    "Banana bread recipe with walnuts".to_string(),
                ],
                &[source("https://rust.example"), source("https://bake.example")],
            )
            .await
            .unwrap();

        let results = store
            .similarity_search("how does the borrow checker enforce ownership", 1)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].passage.source(), Some("https://rust.example"));
    }

    #[tokio::test]
    async fn test_passages_persist_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = JsonlVectorStore::open(dir.path(), hashing()).unwrap();
            store
                .add_texts(&["Example Domain text".to_string()], &[source("https://example.com")])
                .await
                .unwrap();
        }

        let reopened = JsonlVectorStore::open(dir.path(), hashing()).unwrap();
        assert_eq!(reopened.len().await.unwrap(), 1);
        let results = reopened.similarity_search("example", 4).await.unwrap();
        assert_eq!(results[0].passage.text, "Example Domain text");
    }

    #[tokio::test]
    async fn test_two_handles_share_appends() {
        let dir = tempfile::tempdir().unwrap();
        let first = JsonlVectorStore::open(dir.path(), hashing()).unwrap();
        let second = JsonlVectorStore::open(dir.path(), hashing()).unwrap();

        first
            .add_texts(&["from session one".to_string()], &[source("https://one.example")])
            .await
            .unwrap();
        second
            .add_texts(&["from session two".to_string()], &[source("https://two.example")])
            .await
            .unwrap();

        assert_eq!(first.len().await.unwrap(), 2);
        assert_eq!(second.len().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicates_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlVectorStore::open(dir.path(), hashing()).unwrap();
        for _ in 0..2 {
            store
                .add_texts(&["same text".to_string()], &[source("https://example.com")])
                .await
                .unwrap();
        }
        assert_eq!(store.len().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlVectorStore::open(dir.path(), hashing()).unwrap();
        store
            .add_texts(&["good".to_string()], &[source("https://example.com")])
            .await
            .unwrap();
        let mut file = OpenOptions::new().append(true).open(store.path()).unwrap();
        writeln!(file, "{{not json").unwrap();
        // Partial line without newline: a write in progress
        write!(file, "{{\"id\":\"x\"").unwrap();

        let reopened = JsonlVectorStore::open(dir.path(), hashing()).unwrap();
        assert_eq!(reopened.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_record_format() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlVectorStore::open(dir.path(), Arc::new(HashingEmbedder::new(4))).unwrap();
        store
            .add_texts(&["hello".to_string()], &[source("https://example.com")])
            .await
            .unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        let record: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(record["text"], "hello");
        assert_eq!(record["metadata"]["source"], "https://example.com");
        assert_eq!(record["model"], "hashing-4");
        assert_eq!(record["embedding"].as_array().unwrap().len(), 4);
        assert!(record["id"].is_string());
        assert!(record["created_at"].is_string());
    }

    #[tokio::test]
    async fn test_passages_from_another_embedder_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let old = JsonlVectorStore::open(dir.path(), Arc::new(HashingEmbedder::new(4))).unwrap();
        old.add_texts(&["old vectors".to_string()], &[source("https://old.example")])
            .await
            .unwrap();

        let store = JsonlVectorStore::open(dir.path(), Arc::new(HashingEmbedder::new(8))).unwrap();
        assert_eq!(store.len().await.unwrap(), 0);
        assert!(store.similarity_search("old vectors", 4).await.unwrap().is_empty());

        store
            .add_texts(&["new vectors".to_string()], &[source("https://new.example")])
            .await
            .unwrap();
        let results = store.similarity_search("new vectors", 4).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].passage.source(), Some("https://new.example"));
        assert!(results[0].score > 0.9);

        // The old handle still sees only its own model's passages
        assert_eq!(old.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_length_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlVectorStore::open(dir.path(), hashing()).unwrap();
        let err = store
            .add_texts(&["a".to_string(), "b".to_string()], &[source("u")])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::LengthMismatch {
                texts: 2,
                metadatas: 1
            }
        ));
    }

    #[tokio::test]
    async fn test_embedding_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlVectorStore::open(dir.path(), Arc::new(FailingEmbedder)).unwrap();

        let err = store
            .add_texts(&["text".to_string()], &[source("https://example.com")])
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Embedding(ref m) if m.contains("model unavailable")));
        assert_eq!(store.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_search_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlVectorStore::open(dir.path(), Arc::new(FailingEmbedder)).unwrap();
        // No embedding call is needed when there is nothing to rank
        assert!(store.similarity_search("anything", 4).await.unwrap().is_empty());
    }
}
