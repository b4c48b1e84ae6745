//! HTTP client for the external text-completion provider.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ChatConfig;

use super::{ChatAssistant, FALLBACK_REPLY};

const SYSTEM_INSTRUCTION: &str = "You are the PRIMERSTORE shopping assistant. Answer the \
shopper's question briefly and helpfully, using only the catalog you are given.";

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    instruction: &'a str,
    context: &'a str,
    message: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    output: String,
}

/// One-shot completion client. Carries a request timeout so a hung provider
/// cannot wedge the storefront's only async path.
pub struct CompletionClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl CompletionClient {
    pub fn new(config: &ChatConfig) -> Result<Self, ChatError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| ChatError::InvalidApiKey)?;
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
        })
    }

    async fn complete(&self, message: &str, context: &str) -> Result<String, ChatError> {
        let request = CompletionRequest {
            model: &self.model,
            instruction: SYSTEM_INSTRUCTION,
            context,
            message,
        };
        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        if !response.status().is_success() {
            return Err(ChatError::Provider { status: response.status().as_u16() });
        }
        let body: CompletionResponse = response.json().await?;
        if body.output.trim().is_empty() {
            return Err(ChatError::EmptyReply);
        }
        Ok(body.output)
    }
}

#[async_trait]
impl ChatAssistant for CompletionClient {
    async fn reply(&self, message: &str, catalog_context: &str) -> String {
        match self.complete(message, catalog_context).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "chat completion failed, returning fallback");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("API key is not a valid header value")]
    InvalidApiKey,
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Provider returned status {status}")]
    Provider { status: u16 },
    #[error("Provider returned an empty reply")]
    EmptyReply,
}
