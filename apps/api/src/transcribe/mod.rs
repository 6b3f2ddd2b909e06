//! Speech transcription — pluggable, trait-based client that turns recorded
//! WAV audio into best-effort text.
//!
//! Default: `DeepgramTranscriber` (pre-recorded transcription REST API).
//! `AppState` holds an `Arc<dyn Transcriber>`, so backends can be swapped
//! without touching the session controller.
//!
//! Both failure modes are NON-FATAL by design: the controller converts them
//! to distinct placeholder transcripts and the interview flow continues to
//! the submission step. Keep the two outcomes separate — "the service was
//! unreachable" and "nobody said anything recognizable" are different facts
//! and render differently.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

const DEEPGRAM_API_URL: &str = "https://api.deepgram.com/v1/listen";
/// Query parameters for the pre-recorded endpoint. The model is pinned for
/// reproducible transcription quality across deployments.
const DEEPGRAM_PARAMS: &[(&str, &str)] = &[
    ("model", "nova-2"),
    ("language", "en-US"),
    ("smart_format", "true"),
];

/// Placeholder transcript stored when the speech service cannot be reached.
pub const UNAVAILABLE_PLACEHOLDER: &str = "API unavailable";
/// Placeholder transcript stored when the recording contains no recognizable speech.
pub const UNINTELLIGIBLE_PLACEHOLDER: &str = "Unable to recognize speech";

#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("speech service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("no recognizable speech in recording")]
    Unintelligible,
}

impl TranscribeError {
    /// The sentinel transcript substituted for this failure.
    pub fn placeholder(&self) -> &'static str {
        match self {
            TranscribeError::ServiceUnavailable(_) => UNAVAILABLE_PLACEHOLDER,
            TranscribeError::Unintelligible => UNINTELLIGIBLE_PLACEHOLDER,
        }
    }
}

/// The transcriber trait. Implement this to swap speech backends without
/// touching handler or controller code.
///
/// Carried in `AppState` as `Arc<dyn Transcriber>`.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio_wav: Bytes) -> Result<String, TranscribeError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Deepgram pre-recorded backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct DeepgramResponse {
    results: DeepgramResults,
}

#[derive(Debug, Deserialize)]
struct DeepgramResults {
    channels: Vec<DeepgramChannel>,
}

#[derive(Debug, Deserialize)]
struct DeepgramChannel {
    alternatives: Vec<DeepgramAlternative>,
}

#[derive(Debug, Deserialize)]
struct DeepgramAlternative {
    transcript: String,
}

impl DeepgramResponse {
    /// Extracts the transcript of the first alternative on the first channel.
    fn transcript(&self) -> Option<&str> {
        self.results
            .channels
            .first()
            .and_then(|c| c.alternatives.first())
            .map(|a| a.transcript.as_str())
    }
}

/// Transcribes pre-recorded WAV audio via the Deepgram REST API.
pub struct DeepgramTranscriber {
    client: Client,
    api_key: String,
}

impl DeepgramTranscriber {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl Transcriber for DeepgramTranscriber {
    async fn transcribe(&self, audio_wav: Bytes) -> Result<String, TranscribeError> {
        let response = self
            .client
            .post(DEEPGRAM_API_URL)
            .query(DEEPGRAM_PARAMS)
            .header("Authorization", format!("Token {}", self.api_key))
            .header("Content-Type", "audio/wav")
            .body(audio_wav)
            .send()
            .await
            .map_err(|e| TranscribeError::ServiceUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Speech API returned {}: {}", status, body);
            return Err(TranscribeError::ServiceUnavailable(format!(
                "status {status}"
            )));
        }

        let parsed: DeepgramResponse = response
            .json()
            .await
            .map_err(|e| TranscribeError::ServiceUnavailable(e.to_string()))?;

        let transcript = parsed
            .transcript()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(TranscribeError::Unintelligible)?;

        debug!("Transcribed {} chars of speech", transcript.len());
        Ok(transcript.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_are_distinct() {
        let unavailable = TranscribeError::ServiceUnavailable("timeout".to_string());
        let unintelligible = TranscribeError::Unintelligible;
        assert_ne!(unavailable.placeholder(), unintelligible.placeholder());
    }

    #[test]
    fn test_unavailable_placeholder_text() {
        let e = TranscribeError::ServiceUnavailable("connection refused".to_string());
        assert_eq!(e.placeholder(), "API unavailable");
    }

    #[test]
    fn test_unintelligible_placeholder_text() {
        assert_eq!(
            TranscribeError::Unintelligible.placeholder(),
            "Unable to recognize speech"
        );
    }

    #[test]
    fn test_response_transcript_extraction() {
        let json = r#"{
            "results": {
                "channels": [
                    {"alternatives": [{"transcript": "tell me about yourself"}]}
                ]
            }
        }"#;
        let parsed: DeepgramResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.transcript(), Some("tell me about yourself"));
    }

    #[test]
    fn test_response_with_no_channels_yields_none() {
        let json = r#"{"results": {"channels": []}}"#;
        let parsed: DeepgramResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.transcript(), None);
    }

    #[test]
    fn test_empty_transcript_is_treated_as_unintelligible() {
        // Mirrors the filter in `transcribe`: whitespace-only transcripts
        // must map to Unintelligible, not to an empty answer.
        let json = r#"{
            "results": {"channels": [{"alternatives": [{"transcript": "   "}]}]}
        }"#;
        let parsed: DeepgramResponse = serde_json::from_str(json).unwrap();
        let cleaned = parsed
            .transcript()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        assert!(cleaned.is_none());
    }
}
