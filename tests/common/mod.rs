//! In-memory collaborator doubles for integration tests.
//!
//! All fakes share one ordered call log so tests can assert the order of
//! effects across collaborators.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use openarchive_enrichment::clients::{
    EventPublisher, ObjectStore, PublishError, RecognizerError, StoreError, TextBlock,
    TextRecognizer,
};
use openarchive_enrichment::domain::document::CompletionEvent;

pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn new_call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn log_entries(log: &CallLog) -> Vec<String> {
    log.lock().expect("call log mutex poisoned").clone()
}

#[derive(Default)]
struct FakeStoreState {
    /// (bucket, key) -> (body, content type)
    objects: HashMap<(String, String), (Vec<u8>, String)>,
    puts: Vec<(String, String)>,
}

pub struct FakeStore {
    state: Mutex<FakeStoreState>,
    log: CallLog,
    fail_put: bool,
}

impl FakeStore {
    pub fn new(log: CallLog) -> Self {
        Self {
            state: Mutex::new(FakeStoreState::default()),
            log,
            fail_put: false,
        }
    }

    pub fn failing_puts(log: CallLog) -> Self {
        Self {
            fail_put: true,
            ..Self::new(log)
        }
    }

    pub fn insert(&self, bucket: &str, key: &str, body: &[u8]) {
        let mut state = self.state.lock().expect("store mutex poisoned");
        state.objects.insert(
            (bucket.to_string(), key.to_string()),
            (body.to_vec(), "application/octet-stream".to_string()),
        );
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<(Vec<u8>, String)> {
        let state = self.state.lock().expect("store mutex poisoned");
        state
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn object_count(&self) -> usize {
        let state = self.state.lock().expect("store mutex poisoned");
        state.objects.len()
    }

    pub fn puts(&self) -> Vec<(String, String)> {
        let state = self.state.lock().expect("store mutex poisoned");
        state.puts.clone()
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        self.log
            .lock()
            .expect("call log mutex poisoned")
            .push(format!("get {bucket}/{key}"));
        let state = self.state.lock().expect("store mutex poisoned");
        state
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .map(|(body, _)| body.clone())
            .ok_or_else(|| StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError> {
        self.log
            .lock()
            .expect("call log mutex poisoned")
            .push(format!("put {bucket}/{key}"));
        if self.fail_put {
            return Err(StoreError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        }
        let mut state = self.state.lock().expect("store mutex poisoned");
        state.puts.push((bucket.to_string(), key.to_string()));
        state.objects.insert(
            (bucket.to_string(), key.to_string()),
            (body, content_type.to_string()),
        );
        Ok(())
    }
}

pub struct FakeRecognizer {
    blocks: Vec<TextBlock>,
    log: CallLog,
    fail: bool,
}

impl FakeRecognizer {
    pub fn with_lines(log: CallLog, lines: &[&str]) -> Self {
        Self {
            blocks: lines
                .iter()
                .map(|line| TextBlock {
                    kind: "LINE".to_string(),
                    text: line.to_string(),
                })
                .collect(),
            log,
            fail: false,
        }
    }

    pub fn with_blocks(log: CallLog, blocks: Vec<TextBlock>) -> Self {
        Self {
            blocks,
            log,
            fail: false,
        }
    }

    pub fn failing(log: CallLog) -> Self {
        Self {
            blocks: Vec::new(),
            log,
            fail: true,
        }
    }
}

#[async_trait]
impl TextRecognizer for FakeRecognizer {
    async fn recognize(&self, _document: &[u8]) -> Result<Vec<TextBlock>, RecognizerError> {
        self.log
            .lock()
            .expect("call log mutex poisoned")
            .push("recognize".to_string());
        if self.fail {
            return Err(RecognizerError::Status(reqwest::StatusCode::BAD_GATEWAY));
        }
        Ok(self.blocks.clone())
    }
}

pub struct FakePublisher {
    published: Mutex<Vec<CompletionEvent>>,
    log: CallLog,
    fail: bool,
}

impl FakePublisher {
    pub fn new(log: CallLog) -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            log,
            fail: false,
        }
    }

    pub fn failing(log: CallLog) -> Self {
        Self {
            fail: true,
            ..Self::new(log)
        }
    }

    pub fn published(&self) -> Vec<CompletionEvent> {
        self.published
            .lock()
            .expect("publisher mutex poisoned")
            .clone()
    }
}

impl EventPublisher for FakePublisher {
    fn publish(&self, event: &CompletionEvent) -> Result<(), PublishError> {
        self.log
            .lock()
            .expect("call log mutex poisoned")
            .push("publish".to_string());
        if self.fail {
            return Err(PublishError::Send(zmq::Error::EAGAIN));
        }
        self.published
            .lock()
            .expect("publisher mutex poisoned")
            .push(event.clone());
        Ok(())
    }
}
