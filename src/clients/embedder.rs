use std::sync::{Mutex, PoisonError};

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::clients::{Embedder, EmbeddingError};

/// fastembed-backed embedder using the `all-MiniLM-L6-v2` sentence model.
///
/// The model is loaded once at startup; inference takes `&mut self`, so
/// concurrent callers are serialized behind a mutex.
pub struct FastembedEmbedder {
    model: Mutex<TextEmbedding>,
}

impl FastembedEmbedder {
    pub fn new() -> Result<Self, EmbeddingError> {
        let model = TextEmbedding::try_new(InitOptions::new(EmbeddingModel::AllMiniLML6V2))
            .map_err(|error| EmbeddingError::Init(format!("{error:?}")))?;
        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

impl Embedder for FastembedEmbedder {
    fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut model = self.model.lock().unwrap_or_else(PoisonError::into_inner);
        model
            .embed(texts, None)
            .map_err(|error| EmbeddingError::Embed(format!("{error:?}")))
    }
}
