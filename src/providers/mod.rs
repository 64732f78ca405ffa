//! Backend clients for the two text-generation providers.
//!
//! The traits are the seam the session orchestrates against; the concrete
//! clients speak HTTP via a shared [`reqwest::Client`]. Tests substitute
//! scripted implementations.

pub mod openai;
pub mod webui;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::api::{ChatRequest, CompletionRequest, GenerateRequest};
use crate::core::error::Error;

pub use openai::OpenAiClient;
pub use webui::WebUiClient;

/// The hosted chat/completion backend.
#[async_trait]
pub trait ChatCompletionApi: Send + Sync {
    /// Run a chat completion; the reply is the concatenation of every
    /// returned candidate, in backend order, with no separator.
    async fn chat(&self, request: &ChatRequest) -> Result<String, Error>;

    /// One-shot completion against the completions-mode model.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, Error>;

    /// Available remote models, one `id - owner` line each.
    async fn list_models(&self) -> Result<String, Error>;
}

/// The local persona-driven generation backend.
#[async_trait]
pub trait TextGenerationApi: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, Error>;
}

/// Decode a JSON response body, turning non-success statuses into
/// [`Error::Api`] with whatever body text the backend produced.
pub(crate) async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(Error::Api { status, body });
    }
    Ok(response.json::<T>().await?)
}
