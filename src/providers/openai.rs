//! Client for the hosted OpenAI-compatible API.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{read_json, ChatCompletionApi};
use crate::api::{ChatRequest, ChatResponse, CompletionRequest, CompletionResponse, ModelsResponse};
use crate::core::error::Error;
use crate::utils::url::join_url;

pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        OpenAiClient {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        let response = self
            .client
            .post(join_url(&self.base_url, endpoint))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(body)
            .send()
            .await?;
        read_json(response).await
    }
}

#[async_trait]
impl ChatCompletionApi for OpenAiClient {
    async fn chat(&self, request: &ChatRequest) -> Result<String, Error> {
        let response: ChatResponse = self.post_json("chat/completions", request).await?;
        Ok(join_chat_choices(response))
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Error> {
        let response: CompletionResponse = self.post_json("completions", request).await?;
        Ok(join_completion_choices(response))
    }

    async fn list_models(&self) -> Result<String, Error> {
        let response = self
            .client
            .get(join_url(&self.base_url, "models"))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;
        let models: ModelsResponse = read_json(response).await?;
        Ok(format_model_listing(models))
    }
}

fn join_chat_choices(response: ChatResponse) -> String {
    response
        .choices
        .into_iter()
        .filter_map(|c| c.message.content)
        .collect()
}

fn join_completion_choices(response: CompletionResponse) -> String {
    response.choices.into_iter().map(|c| c.text).collect()
}

fn format_model_listing(models: ModelsResponse) -> String {
    models
        .data
        .iter()
        .map(|m| format!("{} - {}", m.id, m.owned_by.as_deref().unwrap_or("unknown")))
        .collect::<Vec<_>>()
        .join("\n")
}
