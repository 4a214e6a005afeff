//! Writers for the destination document store.

pub mod http;

use async_trait::async_trait;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::error::{Error, Result};
use crate::model::Collection;

pub use http::HttpDocumentStore;

/// Full-replace writes of serialized documents.
///
/// Implementations must treat every call as an unconditional overwrite of
/// the document at `collection`/`id`.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    /// Get the sink type name.
    fn sink_type(&self) -> &'static str;

    /// Writes `body` (a JSON document) as `collection`/`id`.
    async fn put(&self, collection: Collection, id: &str, body: Vec<u8>) -> Result<()>;
}

#[async_trait]
impl<T: DocumentSink + ?Sized> DocumentSink for Arc<T> {
    fn sink_type(&self) -> &'static str {
        (**self).sink_type()
    }

    async fn put(&self, collection: Collection, id: &str, body: Vec<u8>) -> Result<()> {
        (**self).put(collection, id, body).await
    }
}

/// Serializes `document` to JSON and writes it through `sink`.
///
/// # Errors
///
/// Returns [`Error::Serialization`] if the document cannot be serialized,
/// otherwise whatever the sink returns.
pub async fn publish<T>(sink: &dyn DocumentSink, collection: Collection, id: &str, document: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let body = serde_json::to_vec(document).map_err(|e| Error::Serialization {
        collection: collection.to_string(),
        id: id.to_string(),
        reason: e.to_string(),
    })?;
    sink.put(collection, id, body).await
}

/// A document captured by [`DryRunSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenDocument {
    /// Target collection.
    pub collection: Collection,
    /// Document ID.
    pub id: String,
    /// Serialized body.
    pub body: Vec<u8>,
}

impl WrittenDocument {
    /// Parses the body back into JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Sink that logs documents instead of writing them.
///
/// It only counts writes unless built with [`DryRunSink::capturing`], which
/// also keeps every serialized body.
#[derive(Debug, Default)]
pub struct DryRunSink {
    capture: bool,
    count: AtomicU64,
    documents: Mutex<Vec<WrittenDocument>>,
}

impl DryRunSink {
    /// Creates a dry-run sink that only counts documents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dry-run sink that keeps every document it receives.
    #[must_use]
    pub fn capturing() -> Self {
        Self {
            capture: true,
            ..Self::default()
        }
    }

    /// Number of documents received.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Documents captured so far, in write order. Always empty unless the
    /// sink was built with [`DryRunSink::capturing`].
    #[must_use]
    pub fn documents(&self) -> Vec<WrittenDocument> {
        self.documents
            .lock()
            .map(|docs| docs.clone())
            .unwrap_or_default()
    }

    /// Documents captured for one collection.
    #[must_use]
    pub fn documents_in(&self, collection: Collection) -> Vec<WrittenDocument> {
        self.documents()
            .into_iter()
            .filter(|d| d.collection == collection)
            .collect()
    }
}

#[async_trait]
impl DocumentSink for DryRunSink {
    fn sink_type(&self) -> &'static str {
        "dry_run"
    }

    async fn put(&self, collection: Collection, id: &str, body: Vec<u8>) -> Result<()> {
        info!("[dry run] PUT {}/{} ({} bytes)", collection, id, body.len());
        self.count.fetch_add(1, Ordering::Relaxed);
        if !self.capture {
            return Ok(());
        }
        if let Ok(mut docs) = self.documents.lock() {
            docs.push(WrittenDocument {
                collection,
                id: id.to_string(),
                body,
            });
        }
        Ok(())
    }
}
