use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::clients::{ObjectStore, StoreError};

/// Object store client speaking plain HTTP against an S3-compatible gateway.
///
/// Objects are addressed as `{endpoint}/{bucket}/{key}`; authentication is
/// owned by the gateway, not this client.
pub struct HttpObjectStore {
    endpoint: Url,
    client: reqwest::Client,
}

impl HttpObjectStore {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }

    fn object_url(&self, bucket: &str, key: &str) -> Result<Url, StoreError> {
        self.endpoint
            .join(&format!("{bucket}/{key}"))
            .map_err(|e| StoreError::Address(e.to_string()))
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        let url = self.object_url(bucket, key)?;
        let res = self.client.get(url).send().await?;
        if res.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            });
        }
        if !res.status().is_success() {
            return Err(StoreError::Status(res.status()));
        }
        Ok(res.bytes().await?.to_vec())
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError> {
        let url = self.object_url(bucket, key)?;
        let res = self
            .client
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(StoreError::Status(res.status()));
        }
        Ok(())
    }
}
