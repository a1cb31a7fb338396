//! Collaborator interfaces for the enrichment service.
//!
//! Every external capability (object store, text recognition, event channel,
//! document directory, embedding model) is reached through one of these
//! traits. Concrete clients live in the sibling modules and are constructed
//! once at startup, then injected wherever they are used.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::document::{Candidate, CompletionEvent};

pub mod documents;
pub mod embedder;
pub mod publisher;
pub mod recognizer;
pub mod store;

/// Block type emitted by the recognition service for a line of text.
pub const LINE_BLOCK: &str = "LINE";

/// One recognized fragment of a document.
#[derive(Debug, Clone, Deserialize)]
pub struct TextBlock {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object {bucket}/{key} not found")]
    NotFound { bucket: String, key: String },
    #[error("invalid object address: {0}")]
    Address(String),
    #[error("object store request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("object store returned status {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Error)]
pub enum RecognizerError {
    #[error("recognition request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("recognition service returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("document is {size} bytes, above the {limit} byte synchronous recognition ceiling")]
    DocumentTooLarge { size: usize, limit: usize },
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to send event: {0}")]
    Send(#[from] zmq::Error),
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("document directory request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("document directory returned status {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("failed to initialize embedding model: {0}")]
    Init(String),
    #[error("failed to embed texts: {0}")]
    Embed(String),
    #[error("embedder returned {got} embeddings for {want} inputs")]
    Incomplete { want: usize, got: usize },
}

/// Raw object storage: `get`/`put` against a bucket.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError>;

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError>;
}

/// Converts document bytes into recognized text blocks.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize(&self, document: &[u8]) -> Result<Vec<TextBlock>, RecognizerError>;
}

/// Emits completion events to the downstream enrichment channel.
///
/// Delivery is at-least-once; consumers must tolerate duplicates.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: &CompletionEvent) -> Result<(), PublishError>;
}

/// Supplies ranking candidates from the document directory.
#[async_trait]
pub trait DocumentReader: Send + Sync {
    async fn fetch_candidates(&self, limit: usize) -> Result<Vec<Candidate>, DirectoryError>;
}

/// Embeds a batch of texts into a shared vector space, order-preserving.
pub trait Embedder: Send + Sync {
    fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}
