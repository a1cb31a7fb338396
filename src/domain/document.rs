use serde::{Deserialize, Serialize};

/// Event type carried by every OCR completion event.
pub const EVENT_DOCUMENT_OCR_PROCESSED: &str = "DocumentOCRProcessed";

/// A stored document offered to the similarity ranker.
///
/// Sourced from the document directory; `id` is opaque and assumed unique
/// for the duration of one ranking call.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: String,
    pub title: String,
}

/// One entry of a ranking response. The candidate title is serialized
/// under the wire field name `description`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedResult {
    pub id: String,
    #[serde(rename = "description")]
    pub title: String,
    pub score: f32,
}

/// A single extraction request pulled from the job queue.
///
/// Consumed once and never mutated; redelivery of the same job is safe up to
/// the completion event, which may then be emitted twice.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionJob {
    pub document_id: String,
    pub s3_key: String,
}

/// Downstream event emitted after extracted text has been persisted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CompletionEvent {
    pub document_id: String,
    pub ocr_s3_key: String,
    pub event_type: String,
}

impl CompletionEvent {
    pub fn ocr_processed(document_id: &str, ocr_s3_key: &str) -> Self {
        Self {
            document_id: document_id.to_string(),
            ocr_s3_key: ocr_s3_key.to_string(),
            event_type: EVENT_DOCUMENT_OCR_PROCESSED.to_string(),
        }
    }
}
