use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use crate::clients::{RecognizerError, TextBlock, TextRecognizer};

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    blocks: Vec<TextBlock>,
}

/// HTTP client for the text-recognition service.
///
/// Posts the raw document bytes and receives the recognized blocks back as
/// JSON. Only the synchronous path exists; oversized documents are rejected
/// upstream before this client is called.
pub struct HttpTextRecognizer {
    url: String,
    client: reqwest::Client,
}

impl HttpTextRecognizer {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TextRecognizer for HttpTextRecognizer {
    async fn recognize(&self, document: &[u8]) -> Result<Vec<TextBlock>, RecognizerError> {
        let res = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(document.to_vec())
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(RecognizerError::Status(res.status()));
        }
        let response: RecognizeResponse = res.json().await?;
        Ok(response.blocks)
    }
}
