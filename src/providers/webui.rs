//! Client for the self-hosted generation API.

use async_trait::async_trait;
use reqwest::Client;

use super::{read_json, TextGenerationApi};
use crate::api::{GenerateRequest, GenerateResponse};
use crate::core::error::Error;
use crate::utils::url::join_url;

pub struct WebUiClient {
    client: Client,
    base_url: String,
}

impl WebUiClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        WebUiClient {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TextGenerationApi for WebUiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, Error> {
        let response = self
            .client
            .post(join_url(&self.base_url, "generate"))
            .json(request)
            .send()
            .await?;
        let generated: GenerateResponse = read_json(response).await?;
        Ok(extract_reply(generated))
    }
}

/// The backend prefixes its completion with one newline artifact; strip
/// exactly that first occurrence and nothing else.
fn extract_reply(response: GenerateResponse) -> String {
    let text = response
        .results
        .into_iter()
        .next()
        .map(|r| r.text)
        .unwrap_or_default();
    text.replacen('\n', "", 1)
}
