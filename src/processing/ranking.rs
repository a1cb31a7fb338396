use std::cmp::Ordering;

use thiserror::Error;

use crate::clients::{Embedder, EmbeddingError};
use crate::domain::document::{Candidate, RankedResult};

/// Score reported for a degenerate (zero-norm) embedding: the floor of the
/// cosine range, so such candidates always rank last.
pub const DEGENERATE_SCORE: f32 = -1.0;

#[derive(Debug, Error)]
pub enum RankError {
    #[error("no candidates to rank")]
    NoCandidates,
    #[error("query must not be empty")]
    EmptyQuery,
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}

/// Cosine similarity `dot(a,b) / (‖a‖·‖b‖)`.
///
/// Returns `None` when either vector has zero norm instead of dividing by
/// zero; the caller decides how an undefined similarity ranks.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }
    Some(dot / (norm_a * norm_b))
}

/// Ranks `candidates` by semantic similarity of their titles to `query`,
/// descending. Ties keep input order (stable sort, no secondary key).
///
/// Pure given a fixed embedder; the only external call is the embedding
/// computation itself. Titles are embedded in one order-preserving batch.
pub fn rank<E>(
    query: &str,
    candidates: Vec<Candidate>,
    embedder: &E,
) -> Result<Vec<RankedResult>, RankError>
where
    E: Embedder + ?Sized,
{
    if query.trim().is_empty() {
        return Err(RankError::EmptyQuery);
    }
    if candidates.is_empty() {
        return Err(RankError::NoCandidates);
    }

    let query_embedding = embedder
        .embed(vec![query.to_string()])?
        .into_iter()
        .next()
        .ok_or(EmbeddingError::Incomplete { want: 1, got: 0 })?;

    let titles: Vec<String> = candidates.iter().map(|c| c.title.clone()).collect();
    let title_embeddings = embedder.embed(titles)?;
    if title_embeddings.len() != candidates.len() {
        return Err(EmbeddingError::Incomplete {
            want: candidates.len(),
            got: title_embeddings.len(),
        }
        .into());
    }

    let mut results: Vec<RankedResult> = candidates
        .into_iter()
        .zip(title_embeddings)
        .map(|(candidate, embedding)| RankedResult {
            id: candidate.id,
            title: candidate.title,
            score: cosine_similarity(&query_embedding, &embedding).unwrap_or(DEGENERATE_SCORE),
        })
        .collect();

    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    Ok(results)
}
