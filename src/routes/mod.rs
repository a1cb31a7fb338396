use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::routing::{get, post};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;

use crate::clients::{DocumentReader, Embedder};

pub mod rank;

/// Shared state for HTTP handlers. Collaborators are constructed once at
/// startup and injected; handlers never reach for process-wide singletons.
#[derive(Clone)]
pub struct AppState {
    pub embedder: Arc<dyn Embedder>,
    pub documents: Arc<dyn DocumentReader>,
    pub candidate_limit: usize,
}

/// Builds the HTTP router. The permissive CORS policy (all origins, methods
/// and headers) is part of the public contract and stays behind a
/// configuration switch.
pub fn build_router(state: AppState, permissive_cors: bool) -> Router {
    let router = Router::new()
        .route("/", get(health))
        .route("/sort", post(rank::sort_documents))
        .with_state(state);

    if permissive_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "message": "OpenArchive enrichment service is live" }))
}
