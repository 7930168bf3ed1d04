use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "nvidia/llama-3.1-nemotron-70b-instruct:free";

/// Settings for talking to the chat-completion provider.
///
/// Built once at startup and handed to [`crate::RecommendationFetcher`]; the
/// fetcher never reads the process environment itself.
#[derive(Clone)]
pub struct FetcherConfig {
    /// `None` means every fetch fails before any network call is made.
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub referer: String,
    pub title: String,
}

impl FetcherConfig {
    /// Read `OPENROUTER_API_KEY`, `OPENROUTER_URL` and `OPENROUTER_MODEL`.
    /// A missing key is not an error here.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            api_key: non_empty("OPENROUTER_API_KEY"),
            endpoint: non_empty("OPENROUTER_URL").unwrap_or(defaults.endpoint),
            model: non_empty("OPENROUTER_MODEL").unwrap_or(defaults.model),
            ..defaults
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 40000,
            timeout: Duration::from_secs(120),
            referer: "https://localhost:8080".to_string(),
            title: "Movie Recommendations".to_string(),
        }
    }
}

// Hand-written so the key never ends up in logs.
impl std::fmt::Debug for FetcherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetcherConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}
