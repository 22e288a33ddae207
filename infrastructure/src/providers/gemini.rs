//! Google Gemini generateContent adapter

use super::http::{classify_transport, read_body, require_api_key};
use async_trait::async_trait;
use llm_plus_application::ProviderAdapter;
use llm_plus_domain::{EndpointSettings, Prompt, ProviderError};
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Extract the first candidate's text from a generateContent body
pub fn parse_generate_response(body: &str) -> Result<String, ProviderError> {
    let response: GenerateResponse = serde_json::from_str(body).map_err(|e| {
        ProviderError::invalid_response(format!("malformed generateContent response: {e}"))
    })?;
    let parts = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .ok_or_else(|| ProviderError::invalid_response("no candidates (blocked or empty)"))?;
    let text: String = parts.into_iter().filter_map(|p| p.text).collect();
    Ok(text.trim().to_string())
}

/// Serves Gemini-family models.
pub struct GeminiAdapter {
    client: Client,
    name: String,
    model: String,
    settings: EndpointSettings,
}

impl GeminiAdapter {
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
impl ProviderAdapter for GeminiAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        let api_key = require_api_key(&self.settings)?;
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart {
                    text: prompt.text(),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.settings.max_tokens,
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.settings.base_url, self.model
            ))
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(classify_transport)?;

        parse_generate_response(&read_body(response).await?)
    }
}
