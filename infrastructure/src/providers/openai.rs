//! OpenAI chat completions adapter

use super::http::{classify_transport, read_body, require_api_key};
use async_trait::async_trait;
use llm_plus_application::ProviderAdapter;
use llm_plus_domain::{EndpointSettings, Prompt, ProviderError};
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Extract the answer text from a chat completions body
pub fn parse_chat_response(body: &str) -> Result<String, ProviderError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::invalid_response(format!("malformed chat response: {e}")))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|text| text.trim().to_string())
        .ok_or_else(|| ProviderError::invalid_response("no choices in chat response"))
}

/// Serves GPT-family models (and OpenAI-compatible servers via `base_url`).
pub struct OpenAiAdapter {
    client: Client,
    name: String,
    model: String,
    settings: EndpointSettings,
}

impl OpenAiAdapter {
    pub fn new(
        client: Client,
        name: impl Into<String>,
        model: impl Into<String>,
        settings: EndpointSettings,
    ) -> Self {
        Self {
            client,
            name: name.into(),
            model: model.into(),
            settings,
        }
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        let api_key = require_api_key(&self.settings)?;
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.text(),
            }],
            max_tokens: self.settings.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.settings.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(classify_transport)?;

        parse_chat_response(&read_body(response).await?)
    }
}
