//! services/client/src/adapters/backend.rs
//!
//! This module contains the adapter for the SchemesConnect HTTP backend.
//! It implements the `HealthService`, `RecommendationService` and
//! `QuestionAnsweringService` ports from the `core` crate.

use async_trait::async_trait;
use reqwest::{Client, Response};
use schemes_connect_core::domain::RecommendationRequest;
use schemes_connect_core::ports::{
    HealthService, PortError, PortResult, QuestionAnsweringService, RecommendationService,
};
use schemes_connect_core::{Answer, HealthStatus, Scheme, UserProfile};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error};

pub const HEALTH_ENDPOINT: &str = "/api/health";
pub const RECOMMEND_ENDPOINT: &str = "/api/recommend";
pub const ASK_ENDPOINT: &str = "/api/ask";

#[derive(Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that talks JSON over HTTP to the recommendation and
/// question-answering backend.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Creates a new `HttpBackend`. Every request is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> PortResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PortError::Unexpected(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> PortResult<T> {
        debug!(endpoint, "GET");
        let response = self
            .client
            .get(self.url(endpoint))
            .send()
            .await
            .map_err(|e| transport_error(endpoint, e))?;
        decode(endpoint, response).await
    }

    async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> PortResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!(endpoint, "POST");
        let response = self
            .client
            .post(self.url(endpoint))
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(endpoint, e))?;
        decode(endpoint, response).await
    }
}

fn transport_error(endpoint: &str, e: reqwest::Error) -> PortError {
    error!(endpoint, error = %e, timeout = e.is_timeout(), "Backend request failed");
    PortError::Transport(e.to_string())
}

async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> PortResult<T> {
    let status = response.status();
    if !status.is_success() {
        error!(endpoint, status = status.as_u16(), "Backend returned an error status");
        return Err(PortError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        });
    }
    response.json::<T>().await.map_err(|e| {
        error!(endpoint, error = %e, "Failed to deserialize backend response");
        PortError::Unexpected(format!("Malformed response from {}: {}", endpoint, e))
    })
}

//=========================================================================================
// Port Implementations
//=========================================================================================

#[async_trait]
impl HealthService for HttpBackend {
    async fn check_health(&self) -> PortResult<HealthStatus> {
        self.get_json(HEALTH_ENDPOINT).await
    }
}

#[async_trait]
impl RecommendationService for HttpBackend {
    /// Posts the profile (without the full name) and returns the ranked schemes.
    async fn recommend(&self, profile: &UserProfile) -> PortResult<Vec<Scheme>> {
        let body = RecommendationRequest::from(profile);
        self.post_json(RECOMMEND_ENDPOINT, &body).await
    }
}

#[async_trait]
impl QuestionAnsweringService for HttpBackend {
    async fn ask(&self, question: &str) -> PortResult<Answer> {
        self.post_json(ASK_ENDPOINT, &AskRequest { question }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped_from_base_url() {
        let backend = HttpBackend::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:8000");
        assert_eq!(backend.url(ASK_ENDPOINT), "http://localhost:8000/api/ask");
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let backend = HttpBackend::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = backend.check_health().await.unwrap_err();
        assert!(matches!(err, PortError::Transport(_)));
    }
}
