//! crates/schemes_connect_core/src/ports.rs
//!
//! Defines the service contracts (traits) the core depends on.
//! These traits form the boundary of the hexagonal architecture: the backend
//! client, the local key-value store and the speech providers are all
//! injected, so the flows never know which concrete implementation is behind them.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{Answer, HealthStatus, Scheme, UserProfile};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (HTTP, filesystem, speech).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Backend responded with status {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Capability unavailable: {0}")]
    Unavailable(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Local Storage Port
//=========================================================================================

/// A synchronous string key-value store, the equivalent of browser local storage.
///
/// Writes are last-write-wins; there is no cross-process coordination.
pub trait KeyValueStore: Send + Sync {
    /// Returns the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> PortResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> PortResult<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> PortResult<()>;
}

//=========================================================================================
// Backend Ports
//=========================================================================================

#[async_trait]
pub trait HealthService: Send + Sync {
    async fn check_health(&self) -> PortResult<HealthStatus>;
}

#[async_trait]
pub trait RecommendationService: Send + Sync {
    /// Maps a complete profile to a ranked list of schemes.
    async fn recommend(&self, profile: &UserProfile) -> PortResult<Vec<Scheme>>;
}

#[async_trait]
pub trait QuestionAnsweringService: Send + Sync {
    /// Answers a free-text question, returning supporting source citations.
    async fn ask(&self, question: &str) -> PortResult<Answer>;
}

//=========================================================================================
// Speech Ports
//=========================================================================================

#[async_trait]
pub trait TextToSpeechService: Send + Sync {
    /// Generates audio data for `text`, spoken in the given locale (e.g. `hi-IN`).
    async fn generate_audio(&self, text: &str, locale: &str) -> PortResult<Bytes>;
}

#[async_trait]
pub trait SpeechToTextService: Send + Sync {
    /// Transcribes a recording into text.
    async fn transcribe_audio(&self, audio_data: &[u8]) -> PortResult<String>;
}

/// Where synthesized audio ends up (a speaker, a file, a test buffer).
#[async_trait]
pub trait AudioSink: Send + Sync {
    async fn play(&self, audio: Bytes, locale: &str) -> PortResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_endpoint() {
        let err = PortError::Status {
            endpoint: "/api/recommend".to_string(),
            status: 502,
        };
        assert_eq!(
            err.to_string(),
            "Backend responded with status 502 for /api/recommend"
        );
    }

    #[test]
    fn unavailable_error_display() {
        let err = PortError::Unavailable("speech synthesis".to_string());
        assert!(err.to_string().contains("speech synthesis"));
    }
}
