use std::sync::Arc;

use tokio::net::TcpListener;
use url::Url;

use openarchive_enrichment::clients::documents::HttpDocumentReader;
use openarchive_enrichment::clients::embedder::FastembedEmbedder;
use openarchive_enrichment::clients::publisher::ZmqEventPublisher;
use openarchive_enrichment::clients::recognizer::HttpTextRecognizer;
use openarchive_enrichment::clients::store::HttpObjectStore;
use openarchive_enrichment::domain::document::ExtractionJob;
use openarchive_enrichment::models::config::ServerConfig;
use openarchive_enrichment::processing::extraction::process_extraction_message;
use openarchive_enrichment::routes::{AppState, build_router};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let embedder = match FastembedEmbedder::new() {
        Ok(embedder) => Arc::new(embedder),
        Err(e) => {
            log::error!("Failed to initialize embedding model: {e}");
            std::process::exit(1);
        }
    };

    let store_endpoint = match Url::parse(&config.store_endpoint) {
        Ok(endpoint) => endpoint,
        Err(e) => {
            log::error!("Invalid store endpoint {}: {e}", config.store_endpoint);
            std::process::exit(1);
        }
    };
    let store = Arc::new(HttpObjectStore::new(store_endpoint));
    let recognizer = Arc::new(HttpTextRecognizer::new(config.recognizer_url.clone()));
    let documents = Arc::new(HttpDocumentReader::new(config.documents_url.clone()));

    let context = zmq::Context::new();
    let publisher = match ZmqEventPublisher::connect(&context, &config.zmq_events_push) {
        Ok(publisher) => Arc::new(publisher),
        Err(e) => {
            log::error!("Cannot connect event publisher: {e}");
            std::process::exit(1);
        }
    };

    let state = AppState {
        embedder,
        documents,
        candidate_limit: config.candidate_limit,
    };
    let router = build_router(state, config.permissive_cors);
    let server_address = config.server_address.clone();
    tokio::spawn(async move {
        let listener = match TcpListener::bind(&server_address).await {
            Ok(listener) => listener,
            Err(e) => {
                log::error!("Cannot bind HTTP server to {server_address}: {e}");
                return;
            }
        };
        log::info!("HTTP server listening on {server_address}");
        if let Err(e) = axum::serve(listener, router).await {
            log::error!("HTTP server terminated: {e}");
        }
    });

    let responder = context.socket(zmq::PULL).expect("Cannot create zmq socket");
    responder
        .bind(&config.zmq_jobs_pull)
        .expect("Cannot bind to zmq port");
    log::info!("Extraction worker pulling jobs from {}", config.zmq_jobs_pull);

    loop {
        let msg = match responder.recv_bytes(0) {
            Ok(msg) => msg,
            Err(e) => {
                log::error!("Failed to receive queue message: {e}");
                continue;
            }
        };
        match serde_json::from_slice::<ExtractionJob>(&msg) {
            Ok(job) => {
                let store = Arc::clone(&store);
                let recognizer = Arc::clone(&recognizer);
                let publisher = Arc::clone(&publisher);
                let bucket = config.store_bucket.clone();
                tokio::spawn(async move {
                    // Redelivery and dead-lettering belong to the queue; a
                    // failed job is logged inside and dropped here.
                    let _ = process_extraction_message(
                        &job,
                        &bucket,
                        store.as_ref(),
                        recognizer.as_ref(),
                        publisher.as_ref(),
                    )
                    .await;
                });
            }
            Err(e) => log::error!("Failed to parse JSON: {e}"),
        }
    }
}
