//! Client for the remote MicroLearn API.
//!
//! Authentication, content generation and persistence of history and
//! progress all live behind this seam. Handlers only see [`LearnApi`].

pub mod http;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{ChatMessage, MasteryReport, StudyMode, User};

pub use http::HttpLearnApi;

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub user_id: String,
    pub topic: String,
    pub mode: StudyMode,
}

/// Remote API errors.
#[derive(Debug)]
pub enum ApiError {
    /// Request never completed (connection refused, timeout, ...)
    Transport(String),
    /// Service answered with a non-success status
    Rejected { status: u16, message: String },
    /// Response body did not match the expected shape
    Decode(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(err) => write!(f, "Request failed: {}", err),
            ApiError::Rejected { status, message } => {
                write!(f, "Request rejected ({}): {}", status, message)
            }
            ApiError::Decode(err) => write!(f, "Invalid response: {}", err),
        }
    }
}

impl ApiError {
    /// Message safe to show in the UI.
    ///
    /// Rejections carry the service's own wording ("Invalid credentials",
    /// "Username already exists"); everything else is generic.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Rejected { .. } => "Request failed".to_string(),
            ApiError::Transport(_) | ApiError::Decode(_) => {
                "Connection error. Please try again.".to_string()
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Operations the client needs from the remote service.
#[async_trait]
pub trait LearnApi: Send + Sync {
    async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError>;

    async fn login(&self, request: &LoginRequest) -> Result<User, ApiError>;

    /// Generate study content and append it to the user's remote history
    async fn generate(&self, request: &GenerateRequest) -> Result<ChatMessage, ApiError>;

    async fn history(&self, user_id: &str) -> Result<Vec<ChatMessage>, ApiError>;

    /// Current profile with progress counters
    async fn progress(&self, user_id: &str) -> Result<User, ApiError>;

    async fn report_mastery(&self, report: &MasteryReport) -> Result<(), ApiError>;
}
