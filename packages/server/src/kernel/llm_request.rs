// BaseAI implementation backed by the openai-client crate
//
// One client per process; the model (or Azure deployment) is fixed at
// construction so every stage runs against the same configuration.

use anyhow::{Context, Result};
use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient, StructuredRequest};

use super::BaseAI;

/// LLM access for the pipeline stages.
#[derive(Clone)]
pub struct LlmClient {
    client: OpenAIClient,
    model: String,
}

impl LlmClient {
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl BaseAI for LlmClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = ChatRequest::new(&self.model)
            .message(Message::system(system_prompt))
            .message(Message::user(user_prompt));

        let response = self
            .client
            .chat_completion(request)
            .await
            .context("chat completion failed")?;

        Ok(response.content)
    }

    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema_name: &str,
        schema: serde_json::Value,
    ) -> Result<String> {
        let request = StructuredRequest::new(&self.model, system_prompt, user_prompt, schema)
            .with_schema_name(schema_name);

        self.client
            .structured_output(request)
            .await
            .context("structured output failed")
    }
}
