//! Wire payloads for the two text-generation backends.
//!
//! The hosted backend speaks the OpenAI-compatible `chat/completions`,
//! `completions`, and `models` endpoints; the local backend speaks the
//! text-generation-webui `generate` endpoint. Everything here is a plain
//! serde struct mirroring those contracts.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Serialize, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Deserialize)]
pub struct ChatResponseMessage {
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub struct ChatResponseChoice {
    pub message: ChatResponseMessage,
}

#[derive(Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatResponseChoice>,
}

#[derive(Serialize, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
}

#[derive(Deserialize)]
pub struct CompletionChoice {
    pub text: String,
}

#[derive(Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub owned_by: Option<String>,
}

#[derive(Deserialize)]
pub struct ModelsResponse {
    pub data: Vec<ModelInfo>,
}

/// Sampling parameters sent with every generate request.
///
/// The record has a fixed shape: the local backend expects the full set on
/// each call, so fields are never skipped. Defaults match the tuning the
/// bot ships with; [`crate::core::session::Session::update_sampling`]
/// mutates them at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub max_new_tokens: u32,
    pub do_sample: bool,
    pub temperature: f32,
    pub top_p: f32,
    pub typical_p: f32,
    pub repetition_penalty: f32,
    pub top_k: u32,
    pub min_length: u32,
    pub no_repeat_ngram_size: u32,
    pub num_beams: u32,
    pub penalty_alpha: f32,
    pub length_penalty: f32,
    pub early_stopping: bool,
    pub seed: i64,
    pub add_bos_token: bool,
    pub truncation_length: u32,
    pub ban_eos_token: bool,
    pub skip_special_tokens: bool,
    pub stopping_strings: Vec<String>,
}

impl Default for SamplingParams {
    fn default() -> Self {
        SamplingParams {
            max_new_tokens: 1000,
            do_sample: true,
            temperature: 1.3,
            top_p: 0.1,
            typical_p: 1.0,
            repetition_penalty: 1.18,
            top_k: 40,
            min_length: 0,
            no_repeat_ngram_size: 0,
            num_beams: 1,
            penalty_alpha: 0.0,
            length_penalty: 1.0,
            early_stopping: true,
            seed: -1,
            add_bos_token: true,
            truncation_length: 2048,
            ban_eos_token: false,
            skip_special_tokens: true,
            stopping_strings: vec!["\nYou".to_string(), "\nVocê".to_string()],
        }
    }
}

#[derive(Serialize, Clone)]
pub struct GenerateRequest {
    #[serde(flatten)]
    pub params: SamplingParams,
    pub prompt: String,
}

#[derive(Deserialize)]
pub struct GenerateResult {
    pub text: String,
}

#[derive(Deserialize)]
pub struct GenerateResponse {
    pub results: Vec<GenerateResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_author_name_is_omitted_from_chat_payloads() {
        let message = ChatMessage {
            role: "assistant".to_string(),
            content: "hi".to_string(),
            name: None,
        };
        let json = serde_json::to_value(&message).unwrap();
        assert!(json.get("name").is_none());
    }

    #[test]
    fn generate_request_flattens_sampling_params_beside_the_prompt() {
        let request = GenerateRequest {
            params: SamplingParams::default(),
            prompt: "once upon a time".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["prompt"], "once upon a time");
        assert_eq!(json["max_new_tokens"], 1000);
        assert_eq!(json["seed"], -1);
        assert_eq!(json["stopping_strings"][0], "\nYou");
        assert!(json.get("params").is_none());
    }
}
