//! reqwest-backed [`LearnApi`] implementation.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::{ApiError, GenerateRequest, LearnApi, LoginRequest, RegisterRequest};
use crate::domain::{ChatMessage, MasteryReport, User};

/// Per-request timeout
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Error body returned by the service on non-success statuses
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

pub struct HttpLearnApi {
    client: Client,
    base_url: String,
}

impl HttpLearnApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    async fn post<B: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        let response = self
            .client
            .post(self.url(endpoint))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        check_status(response).await
    }

    async fn get_for_user(&self, endpoint: &str, user_id: &str) -> Result<Response, ApiError> {
        let response = self
            .client
            .get(self.url(endpoint))
            .query(&[("userId", user_id)])
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        check_status(response).await
    }
}

/// Turn non-success responses into [`ApiError::Rejected`], keeping the
/// service's `{"error": ...}` message when present.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error)
        .unwrap_or_default();

    Err(ApiError::Rejected {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl LearnApi for HttpLearnApi {
    async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        let response = self.post("register", request).await?;
        decode(response).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<User, ApiError> {
        let response = self.post("login", request).await?;
        decode(response).await
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<ChatMessage, ApiError> {
        let response = self.post("chat", request).await?;
        decode(response).await
    }

    async fn history(&self, user_id: &str) -> Result<Vec<ChatMessage>, ApiError> {
        let response = self.get_for_user("history", user_id).await?;
        decode(response).await
    }

    async fn progress(&self, user_id: &str) -> Result<User, ApiError> {
        let response = self.get_for_user("progress", user_id).await?;
        decode(response).await
    }

    async fn report_mastery(&self, report: &MasteryReport) -> Result<(), ApiError> {
        // Body is `{"success": true}`; only the status matters
        self.post("flashcard-review", report).await?;
        Ok(())
    }
}
