//! Anthropic messages API adapter

use super::http::{classify_transport, read_body, require_api_key};
use async_trait::async_trait;
use llm_plus_application::ProviderAdapter;
use llm_plus_domain::{EndpointSettings, Prompt, ProviderError};
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

/// Concatenate the text blocks of a messages API body
pub fn parse_messages_response(body: &str) -> Result<String, ProviderError> {
    let response: MessagesResponse = serde_json::from_str(body).map_err(|e| {
        ProviderError::invalid_response(format!("malformed messages response: {e}"))
    })?;
    let text: Vec<String> = response
        .content
        .into_iter()
        .filter(|block| block.block_type == "text")
        .filter_map(|block| block.text)
        .collect();
    if text.is_empty() {
        return Err(ProviderError::invalid_response(
            "no text content in messages response",
        ));
    }
    Ok(text.join("").trim().to_string())
}

/// Serves Claude-family models.
pub struct AnthropicAdapter {
    client: Client,
    name: String,
    model: String,
    settings: EndpointSettings,
    api_version: String,
}

impl AnthropicAdapter {
    pub fn new(
        client: Client,
        name: impl Into<String>,
        model: impl Into<String>,
        settings: EndpointSettings,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            client,
            name: name.into(),
            model: model.into(),
            settings,
            api_version: api_version.into(),
        }
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        let api_key = require_api_key(&self.settings)?;
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.settings.max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt.text(),
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.settings.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.api_version)
            .json(&request)
            .send()
            .await
            .map_err(classify_transport)?;

        parse_messages_response(&read_body(response).await?)
    }
}
