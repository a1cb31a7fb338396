use thiserror::Error;

use crate::clients::{
    EventPublisher, LINE_BLOCK, ObjectStore, PublishError, RecognizerError, StoreError,
    TextRecognizer,
};
use crate::domain::document::{CompletionEvent, ExtractionJob};

/// Ceiling for the synchronous recognition path. Larger documents would need
/// the asynchronous recognition API, which this stage does not implement.
pub const MAX_SYNC_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to fetch source object: {0}")]
    Ingest(#[source] StoreError),
    #[error("text recognition failed: {0}")]
    Recognition(#[source] RecognizerError),
    #[error("failed to persist extracted text: {0}")]
    Persistence(#[source] StoreError),
    #[error("failed to publish completion event: {0}")]
    Notification(#[source] PublishError),
}

impl ExtractionError {
    /// Pipeline step that produced the error, for log context.
    pub fn step(&self) -> &'static str {
        match self {
            ExtractionError::Ingest(_) => "ingest",
            ExtractionError::Recognition(_) => "recognition",
            ExtractionError::Persistence(_) => "persistence",
            ExtractionError::Notification(_) => "notification",
        }
    }
}

/// Storage key for the extracted text of a document.
///
/// Deterministic per document, so a redelivered job overwrites the same
/// object instead of creating a duplicate artifact.
pub fn ocr_text_key(document_id: &str) -> String {
    format!("documents/{document_id}/ocr_text/{document_id}_ocr.txt")
}

/// Runs the extraction pipeline for one job: fetch, recognize, persist,
/// notify, in that order.
///
/// No step is retried here. Every failure names the step that produced it
/// and is returned to the queue layer, which owns redelivery, backoff and
/// dead-lettering. A notification failure leaves the extracted text in the
/// store with no downstream event; redelivering the job then republishes
/// against the same key.
pub async fn extract<S, R, P>(
    job: &ExtractionJob,
    bucket: &str,
    store: &S,
    recognizer: &R,
    publisher: &P,
) -> Result<CompletionEvent, ExtractionError>
where
    S: ObjectStore + ?Sized,
    R: TextRecognizer + ?Sized,
    P: EventPublisher + ?Sized,
{
    let document = store
        .get(bucket, &job.s3_key)
        .await
        .map_err(ExtractionError::Ingest)?;

    if document.len() > MAX_SYNC_DOCUMENT_BYTES {
        return Err(ExtractionError::Recognition(
            RecognizerError::DocumentTooLarge {
                size: document.len(),
                limit: MAX_SYNC_DOCUMENT_BYTES,
            },
        ));
    }

    let blocks = recognizer
        .recognize(&document)
        .await
        .map_err(ExtractionError::Recognition)?;

    let mut text = String::new();
    for block in blocks.iter().filter(|block| block.kind == LINE_BLOCK) {
        text.push_str(&block.text);
        text.push('\n');
    }

    let ocr_s3_key = ocr_text_key(&job.document_id);
    store
        .put(bucket, &ocr_s3_key, text.into_bytes(), "text/plain")
        .await
        .map_err(ExtractionError::Persistence)?;

    let event = CompletionEvent::ocr_processed(&job.document_id, &ocr_s3_key);
    publisher
        .publish(&event)
        .map_err(ExtractionError::Notification)?;

    Ok(event)
}

/// Queue-loop entry point. Logs outcome with the document id and failing
/// step, then re-raises so the caller decides what to do with the job.
pub async fn process_extraction_message<S, R, P>(
    job: &ExtractionJob,
    bucket: &str,
    store: &S,
    recognizer: &R,
    publisher: &P,
) -> Result<CompletionEvent, ExtractionError>
where
    S: ObjectStore + ?Sized,
    R: TextRecognizer + ?Sized,
    P: EventPublisher + ?Sized,
{
    log::info!("Received extraction job for document {}", job.document_id);

    match extract(job, bucket, store, recognizer, publisher).await {
        Ok(event) => {
            log::info!(
                "OCR processed for document {}, text saved to {}",
                job.document_id,
                event.ocr_s3_key
            );
            Ok(event)
        }
        Err(error) => {
            log::error!(
                "OCR failed for document {} during {}: {error}",
                job.document_id,
                error.step()
            );
            Err(error)
        }
    }
}
