//! Movie recommendations from a chat-completion LLM.
//!
//! A free-text prompt is wrapped with fixed instructions, sent to the provider
//! in a single call, and the JSON document embedded in the model's reply is
//! located, checked against the [`RecommendationSet`] shape, and handed back
//! as the original text.

pub mod config;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod models;
pub mod prompt;

// Re-export commonly used types
pub use config::FetcherConfig;
pub use error::{FetchError, Result};
pub use extract::{ExtractionStrategy, Extracted, extract_json, validate};
pub use fetcher::{RecommendationFetcher, RecommendationSource};
pub use models::{EXPECTED_RECOMMENDATIONS, Recommendation, RecommendationSet};
pub use prompt::{INSTRUCTIONS, PromptPayload, build_prompt};
