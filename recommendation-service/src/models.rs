use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

/// Successful reply. `recommendations` is embedded exactly as extracted.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub original_prompt: String,
    pub recommendations: Box<RawValue>,
}

impl ApiResponse {
    pub fn success(original_prompt: String, recommendations: Box<RawValue>) -> Self {
        Self {
            status: "success".to_string(),
            original_prompt,
            recommendations,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
