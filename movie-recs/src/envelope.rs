//! Wire types for the chat-completion call.
//!
//! The request side is fully typed. The response side is decoded one level at
//! a time so that a missing or mistyped field surfaces as a
//! [`FetchError::InvalidEnvelope`] naming that field, instead of a generic
//! parse failure for the whole body.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::FetcherConfig;
use crate::error::{FetchError, Result};

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    pub response_format: ResponseFormat,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl<'a> ChatCompletionRequest<'a> {
    /// A single user message carrying `content`, with the config's sampling settings.
    pub fn new(config: &'a FetcherConfig, content: String) -> Self {
        Self {
            model: &config.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content,
            }],
            response_format: ResponseFormat::json_object(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

/// Top level of the provider's reply. Only `error` and `choices` are looked at.
#[derive(Debug)]
pub struct ChatEnvelope {
    error: Option<Value>,
    choices: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<Value>,
}

impl ChatEnvelope {
    /// The body must be a JSON object; arrays and scalars are parse failures.
    pub fn parse(body: &str) -> Result<Self> {
        let mut object: Map<String, Value> =
            serde_json::from_str(body).map_err(|source| FetchError::EnvelopeParse {
                source,
                body: body.to_string(),
            })?;

        Ok(Self {
            error: object.remove("error"),
            choices: object.remove("choices"),
        })
    }

    /// The provider's error object, if it sent one. Non-object values are ignored.
    pub fn provider_error(&self) -> Option<&Value> {
        self.error.as_ref().filter(|e| e.is_object())
    }

    /// Descend `choices[0].message.content`. A provider error wins over everything else.
    pub fn into_content(self) -> Result<String> {
        if let Some(error) = self.provider_error() {
            return Err(FetchError::Provider(error.to_string()));
        }

        let choices: Vec<Value> = descend(self.choices, "choices")?;
        let first = choices
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::InvalidEnvelope {
                field: "choices",
                reason: "no choices in response".to_string(),
            })?;

        let choice: Choice = descend(Some(first), "choices[0]")?;
        let message: ReplyMessage = descend(choice.message, "message")?;
        descend(message.content, "content")
    }
}

fn descend<T: DeserializeOwned>(value: Option<Value>, field: &'static str) -> Result<T> {
    let value = match value {
        None | Some(Value::Null) => {
            return Err(FetchError::InvalidEnvelope {
                field,
                reason: "field is missing".to_string(),
            });
        }
        Some(value) => value,
    };

    serde_json::from_value(value).map_err(|e| FetchError::InvalidEnvelope {
        field,
        reason: e.to_string(),
    })
}
