//! Shared error types for the services crate.

use thiserror::Error;

use tutor_core::ProgressionError;
use tutor_core::model::CurriculumError;
use tutor_core::selector::SelectionError;

/// Errors emitted by `AiClient`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AiClientError {
    #[error("AI provider is not configured")]
    Disabled,
    #[error("AI provider returned an empty response")]
    EmptyResponse,
    #[error("AI request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by question and grading gateways.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    #[error(transparent)]
    Ai(#[from] AiClientError),
    #[error("malformed gateway response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    #[error("gateway response is missing `{0}`")]
    MissingField(&'static str),
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}

/// Errors emitted by `TutorSession`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Progression(#[from] ProgressionError),
    #[error(transparent)]
    Curriculum(#[from] CurriculumError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
}
