use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::FetcherConfig;
use crate::envelope::{ChatCompletionRequest, ChatEnvelope};
use crate::error::{FetchError, Result};
use crate::extract::{extract_json, validate};
use crate::models::EXPECTED_RECOMMENDATIONS;
use crate::prompt::build_prompt;

/// Anything that can turn a free-text prompt into a validated recommendations document.
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Returns the extracted JSON text exactly as the model wrote it.
    async fn fetch(&self, prompt: &str) -> Result<String>;
}

/// Fetches recommendations from an OpenAI-compatible chat-completion endpoint.
///
/// One POST per call, bounded by the configured timeout, no retries.
pub struct RecommendationFetcher {
    config: FetcherConfig,
    client: reqwest::Client,
}

impl RecommendationFetcher {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(FetchError::Request)?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    async fn send(&self, api_key: &str, request: &ChatCompletionRequest<'_>) -> Result<String> {
        info!(endpoint = %self.config.endpoint, model = %self.config.model, "Sending request to provider");

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e, FetchError::Request))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e, FetchError::ReadBody))?;

        info!(status = %status, bytes = body.len(), "Provider response received");
        Ok(body)
    }

    fn transport_error(
        &self,
        err: reqwest::Error,
        otherwise: fn(reqwest::Error) -> FetchError,
    ) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.config.timeout)
        } else {
            otherwise(err)
        }
    }
}

#[async_trait]
impl RecommendationSource for RecommendationFetcher {
    async fn fetch(&self, prompt: &str) -> Result<String> {
        info!("Starting AI query");

        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(FetchError::MissingApiKey)?;

        let request = ChatCompletionRequest::new(&self.config, build_prompt(prompt)?);
        let body = self.send(api_key, &request).await?;

        let reply = ChatEnvelope::parse(&body)?.into_content()?;
        debug!(reply_len = reply.len(), "Model reply unwrapped");

        let extracted = extract_json(&reply)?;
        info!(strategy = ?extracted.strategy, "Extracted JSON content");

        let set = validate(extracted.json)?;
        if set.len() != EXPECTED_RECOMMENDATIONS {
            warn!(
                count = set.len(),
                expected = EXPECTED_RECOMMENDATIONS,
                "Unexpected number of recommendations"
            );
        }

        info!(count = set.len(), "AI query complete");
        Ok(extracted.json.to_string())
    }
}
