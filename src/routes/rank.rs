use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::domain::document::RankedResult;
use crate::processing::ranking;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct QueryInput {
    pub query: String,
}

/// Response envelope for the sort endpoint.
///
/// Failures are reported as an `error` object in the body with HTTP 200;
/// external callers depend on the always-200 contract, so this is preserved
/// rather than upgraded to structured status codes.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SortResponse {
    Results { results: Vec<RankedResult> },
    Error { error: String },
}

/// `POST /sort` — ranks stored document titles against the query.
pub async fn sort_documents(
    State(state): State<AppState>,
    Json(input): Json<QueryInput>,
) -> Json<SortResponse> {
    let candidates = match state.documents.fetch_candidates(state.candidate_limit).await {
        Ok(candidates) => candidates,
        Err(error) => {
            log::error!("Failed to fetch ranking candidates: {error}");
            return Json(SortResponse::Error {
                error: error.to_string(),
            });
        }
    };

    match ranking::rank(&input.query, candidates, state.embedder.as_ref()) {
        Ok(results) => Json(SortResponse::Results { results }),
        Err(error) => {
            log::error!("Failed to rank candidates for query {:?}: {error}", input.query);
            Json(SortResponse::Error {
                error: error.to_string(),
            })
        }
    }
}
