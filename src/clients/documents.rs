use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::clients::{DirectoryError, DocumentReader};
use crate::domain::document::Candidate;

#[derive(Debug, Deserialize)]
struct DocumentRow {
    id: Value,
    #[serde(default)]
    ai_suggested_title: Option<String>,
}

impl DocumentRow {
    fn into_candidate(self) -> Option<Candidate> {
        let title = self.ai_suggested_title?;
        if title.is_empty() {
            return None;
        }
        let id = match self.id {
            Value::String(id) => id,
            other => other.to_string(),
        };
        Some(Candidate { id, title })
    }
}

/// Ranking-candidate source backed by the document directory REST API.
pub struct HttpDocumentReader {
    url: String,
    client: reqwest::Client,
}

impl HttpDocumentReader {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DocumentReader for HttpDocumentReader {
    async fn fetch_candidates(&self, limit: usize) -> Result<Vec<Candidate>, DirectoryError> {
        let res = self
            .client
            .get(&self.url)
            .query(&[("limit", limit)])
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(DirectoryError::Status(res.status()));
        }
        let rows: Vec<DocumentRow> = res.json().await?;

        // Rows without a usable title cannot be embedded and are skipped.
        Ok(rows
            .into_iter()
            .filter_map(DocumentRow::into_candidate)
            .collect())
    }
}
