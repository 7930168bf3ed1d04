use std::time::Duration;

use thiserror::Error;

/// Everything that can go wrong while turning a prompt into recommendations.
///
/// None of these are retried; each one ends the current fetch and is reported
/// to the caller through its `Display` text.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("OPENROUTER_API_KEY environment variable is not set")]
    MissingApiKey,

    #[error("failed to create request body: {0}")]
    RequestBody(#[source] serde_json::Error),

    #[error("failed to make request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to read response: {0}")]
    ReadBody(#[source] reqwest::Error),

    #[error("failed to parse AI response: {source}, body: {body}")]
    EnvelopeParse {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("API error: {0}")]
    Provider(String),

    #[error("invalid {field} in AI response: {reason}")]
    InvalidEnvelope { field: &'static str, reason: String },

    #[error("failed to extract JSON from content: no valid JSON found in content")]
    NoJsonFound,

    #[error("invalid JSON structure: {0}")]
    InvalidStructure(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FetchError>;
