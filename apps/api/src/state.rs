use std::sync::Arc;

use crate::config::Config;
use crate::interview::store::SessionStore;
use crate::llm_client::LlmClient;
use crate::transcribe::Transcriber;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Pluggable speech backend. Default: DeepgramTranscriber.
    pub transcriber: Arc<dyn Transcriber>,
    /// In-memory interview sessions — no durable storage by design.
    pub sessions: SessionStore,
    pub config: Config,
}
