//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across the HTTP surface and the worker loop.
pub struct ServerConfig {
    /// Bind address for the ranking endpoint.
    pub server_address: String,
    /// PULL socket address for inbound extraction jobs.
    pub zmq_jobs_pull: String,
    /// PUSH socket address for the downstream completion-event channel.
    pub zmq_events_push: String,
    /// Base URL of the S3-compatible object store gateway.
    pub store_endpoint: String,
    pub store_bucket: String,
    /// Endpoint of the text-recognition service.
    pub recognizer_url: String,
    /// Document directory endpoint supplying ranking candidates.
    pub documents_url: String,
    /// How many candidates to fetch per ranking request.
    pub candidate_limit: usize,
    /// Whether to attach the permissive CORS layer to the HTTP surface.
    pub permissive_cors: bool,
}

impl ServerConfig {
    /// Loads configuration from an optional `config.yaml` layered with
    /// `OPENARCHIVE_`-prefixed environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("server_address", "0.0.0.0:8000")?
            .set_default("zmq_jobs_pull", "tcp://127.0.0.1:5555")?
            .set_default("zmq_events_push", "tcp://127.0.0.1:5556")?
            .set_default("store_endpoint", "http://127.0.0.1:9000/")?
            .set_default("store_bucket", "openarchive-documents")?
            .set_default("recognizer_url", "http://127.0.0.1:8500/recognize")?
            .set_default("documents_url", "http://127.0.0.1:3000/documents")?
            .set_default("candidate_limit", 5)?
            .set_default("permissive_cors", true)?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("OPENARCHIVE"))
            .build()?
            .try_deserialize()
    }
}
