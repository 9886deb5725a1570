//! Pure OpenAI REST API client
//!
//! A small client for the chat completions API with no domain-specific logic.
//! Talks either to the public OpenAI API or to an Azure OpenAI deployment.
//! Supports free-form chat completions and strict JSON-schema structured outputs.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{OpenAIClient, ChatRequest, Message};
//!
//! let client = OpenAIClient::azure(endpoint, api_key, "gpt-4o", "2024-10-21");
//!
//! let response = client
//!     .chat_completion(
//!         ChatRequest::new("gpt-4o")
//!             .message(Message::system("You are terse."))
//!             .message(Message::user("Hello!")),
//!     )
//!     .await?;
//! ```
//!
//! # Structured Output
//!
//! ```rust,ignore
//! #[derive(Deserialize, JsonSchema)]
//! struct Names {
//!     names: Vec<String>,
//! }
//!
//! let request = StructuredRequest::new("gpt-4o", system, user, Names::openai_schema())
//!     .with_schema_name(&Names::type_name());
//! let json = client.structured_output(request).await?;
//! let names: Names = serde_json::from_str(&json)?;
//! ```

pub mod error;
pub mod schema;
pub mod types;

pub use error::{OpenAIError, Result};
pub use schema::{strict_schema, StructuredOutput};
pub use types::*;

use reqwest::Client;
use serde::Serialize;
use types::{ChatMessageResponse, ChatResponseRaw};
use tracing::{debug, warn};

/// OpenAI / Azure OpenAI API client.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    endpoint: Endpoint,
}

impl OpenAIClient {
    /// Client for the public OpenAI API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            endpoint: Endpoint::openai(),
        }
    }

    /// Client for an Azure OpenAI deployment.
    pub fn azure(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        deployment: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            endpoint: Endpoint::Azure {
                endpoint: endpoint.into(),
                deployment: deployment.into(),
                api_version: api_version.into(),
            },
        }
    }

    /// Point an OpenAI-style client at a proxy or compatible server.
    ///
    /// Has no effect on Azure clients.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        if let Endpoint::OpenAi { base_url } = &mut self.endpoint {
            *base_url = url.into();
        }
        self
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Chat completion.
    ///
    /// A null `content` (e.g. the model produced nothing) comes back as an
    /// empty string; an explicit refusal is an error.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let raw = self.post_chat(&request).await?;
        let usage = raw.usage.clone();
        let message = first_message(raw)?;

        if let Some(refusal) = message.refusal {
            warn!(model = %request.model, "OpenAI refused chat completion");
            return Err(OpenAIError::Refusal(refusal));
        }

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "OpenAI chat completion"
        );

        Ok(ChatResponse {
            content: message.content.unwrap_or_default(),
            usage,
        })
    }

    /// Structured output with a strict JSON schema.
    ///
    /// Returns the raw JSON text; deserializing it is the caller's job so that
    /// shape mismatches surface where the expected type is known.
    pub async fn structured_output(&self, request: StructuredRequest) -> Result<String> {
        let start = std::time::Instant::now();

        let raw = self.post_chat(&request).await?;
        let message = first_message(raw)?;

        if let Some(refusal) = message.refusal {
            warn!(model = %request.model, "OpenAI refused structured output");
            return Err(OpenAIError::Refusal(refusal));
        }

        debug!(
            model = %request.model,
            schema = %request.response_format.json_schema.name,
            duration_ms = start.elapsed().as_millis(),
            "OpenAI structured output"
        );

        message
            .content
            .ok_or_else(|| OpenAIError::Parse("structured output had no content".into()))
    }

    async fn post_chat<B: Serialize>(&self, body: &B) -> Result<ChatResponseRaw> {
        let (header, value) = self.endpoint.auth_header(&self.api_key);

        let response = self
            .http_client
            .post(self.endpoint.chat_completions_url())
            .header(header, value)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI request failed");
                OpenAIError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "OpenAI API error");
            return Err(OpenAIError::Api {
                status: status.as_u16(),
                body: error_text,
            });
        }

        response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))
    }
}

fn first_message(raw: ChatResponseRaw) -> Result<ChatMessageResponse> {
    raw.choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .ok_or_else(|| OpenAIError::Parse("response contained no choices".into()))
}
