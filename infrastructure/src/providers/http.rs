//! Shared HTTP plumbing for the backend adapters
//!
//! Every backend maps its failures through the same two functions so the
//! retry behavior does not depend on which API a provider talks to.

use llm_plus_domain::{EndpointSettings, ProviderError};
use reqwest::{Client, Response, StatusCode};

/// Build the HTTP client shared by all adapters.
///
/// Per-attempt timeouts are enforced by the dispatch coordinator, so the
/// client itself carries none.
pub fn build_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("llm-plus/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Classify a non-success HTTP status
pub fn classify_status(status: StatusCode, body: &str) -> ProviderError {
    let detail = if body.trim().is_empty() {
        status.to_string()
    } else {
        format!("{}: {}", status, body.trim())
    };
    match status {
        StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited(detail),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ProviderError::timeout(detail),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ProviderError::invalid_response(detail)
        }
        _ => ProviderError::unavailable(detail),
    }
}

/// Classify a transport-level failure (connect, TLS, body read)
pub fn classify_transport(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::timeout(error.to_string())
    } else if error.is_decode() {
        ProviderError::invalid_response(error.to_string())
    } else {
        ProviderError::unavailable(error.to_string())
    }
}

/// Resolve the API key or report the provider as unavailable
pub fn require_api_key(settings: &EndpointSettings) -> Result<String, ProviderError> {
    settings.resolve_api_key().ok_or_else(|| {
        ProviderError::unavailable(format!("API key not set ({})", settings.api_key_env))
    })
}

/// Read the body of a response, classifying non-success statuses
pub async fn read_body(response: Response) -> Result<String, ProviderError> {
    let status = response.status();
    let body = response.text().await.map_err(classify_transport)?;
    if !status.is_success() {
        return Err(classify_status(status, &body));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_plus_domain::{EndpointConfig, ProviderErrorKind};

    #[test]
    fn test_status_classification() {
        let kind = |code: u16| {
            classify_status(StatusCode::from_u16(code).unwrap(), "").kind()
        };
        assert_eq!(kind(429), ProviderErrorKind::RateLimited);
        assert_eq!(kind(401), ProviderErrorKind::Unavailable);
        assert_eq!(kind(403), ProviderErrorKind::Unavailable);
        assert_eq!(kind(404), ProviderErrorKind::Unavailable);
        assert_eq!(kind(500), ProviderErrorKind::Unavailable);
        assert_eq!(kind(503), ProviderErrorKind::Unavailable);
        assert_eq!(kind(504), ProviderErrorKind::Timeout);
        assert_eq!(kind(400), ProviderErrorKind::InvalidResponse);
    }

    #[test]
    fn test_status_message_includes_body() {
        let error = classify_status(StatusCode::SERVICE_UNAVAILABLE, " overloaded ");
        assert_eq!(error.message(), "503 Service Unavailable: overloaded");
    }

    #[test]
    fn test_missing_key_is_unavailable() {
        let mut settings = EndpointConfig::default().anthropic;
        settings.api_key_env = "LLM_PLUS_TEST_MISSING_KEY".to_string();
        let error = require_api_key(&settings).unwrap_err();
        assert_eq!(error.kind(), ProviderErrorKind::Unavailable);
        assert!(error.message().contains("LLM_PLUS_TEST_MISSING_KEY"));
    }
}
