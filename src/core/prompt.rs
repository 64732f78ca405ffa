//! Backend-specific prompt construction.
//!
//! Both strategies read the same history partition shape but produce very
//! different payloads: an ordered message list for the hosted backend and a
//! single flat prompt string for the local one.

use crate::api::{ChatMessage, ChatRequest, GenerateRequest, SamplingParams};
use crate::character::Character;
use crate::core::message::Message;

/// Fixed sampling temperature for chat completions.
const CHAT_TEMPERATURE: f32 = 0.7;

/// Build the chat-completion payload from a chat's retained transcript.
///
/// The entire partition is re-sent on every call; there is no truncation or
/// summarization, so the payload grows with the conversation. Chat ids are
/// internal correlation keys and never reach the wire.
pub fn build_chat_request(chat_model: &str, history: &[Message]) -> ChatRequest {
    let messages = history
        .iter()
        .map(|m| ChatMessage {
            role: m.role.as_str().to_string(),
            content: m.content.clone(),
            name: m.author_name.clone(),
        })
        .collect();

    ChatRequest {
        model: chat_model.to_string(),
        messages,
        temperature: CHAT_TEMPERATURE,
    }
}

/// Build the flat generation prompt: character context, a blank line, the
/// example dialogue, the greeting (once, when the character has one), one
/// `author: content` line per retained message, and a trailing
/// `<character name>: ` primer with no newline after it.
pub fn build_generation_prompt(character: &Character, history: &[Message]) -> String {
    let mut prompt = String::new();
    prompt.push_str(&character.context);
    prompt.push_str("\n\n");
    prompt.push_str(&character.example_dialogue);
    prompt.push('\n');
    if let Some(greeting) = &character.greeting {
        prompt.push_str(greeting);
        prompt.push('\n');
    }
    for message in history {
        let author = message.author_name.as_deref().unwrap_or(message.role.as_str());
        prompt.push_str(author);
        prompt.push_str(": ");
        prompt.push_str(&message.content);
        prompt.push('\n');
    }
    prompt.push_str(&character.name);
    prompt.push_str(": ");
    prompt
}

/// Attach the current sampling record to a built prompt.
pub fn build_generation_request(params: &SamplingParams, prompt: String) -> GenerateRequest {
    GenerateRequest {
        params: params.clone(),
        prompt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::{Provider, Role};

    fn character() -> Character {
        Character {
            name: "Ada".to_string(),
            context: "Ada is a meticulous engineer.".to_string(),
            greeting: Some("Hello! Ready to build something?".to_string()),
            example_dialogue: "You: hi\nAda: hello!".to_string(),
            language: None,
        }
    }

    fn turn(role: Role, author: &str, content: &str) -> Message {
        Message::new(role, content, "c1", Provider::WebUi).with_author(author)
    }

    #[test]
    fn chat_request_carries_model_temperature_and_full_transcript() {
        let history = vec![
            Message::new(Role::User, "hello", "c1", Provider::OpenAi).with_author("Ada"),
            Message::new(Role::Assistant, "hi there", "c1", Provider::OpenAi),
        ];

        let request = build_chat_request("gpt-4", &history);

        assert_eq!(request.model, "gpt-4");
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "user");
        assert_eq!(request.messages[0].name.as_deref(), Some("Ada"));
        assert_eq!(request.messages[1].role, "assistant");
        assert!(request.messages[1].name.is_none());
        // chat ids are stripped: the wire type has no such field, and the
        // serialized payload must not grow one
        let json = serde_json::to_value(&request).unwrap();
        assert!(json["messages"][0].get("chat_id").is_none());
    }

    #[test]
    fn generation_prompt_matches_the_transcript_layout() {
        let history = vec![
            turn(Role::User, "You", "how do I test this?"),
            turn(Role::Assistant, "Ada", "write the prompt down first."),
        ];

        let prompt = build_generation_prompt(&character(), &history);

        assert_eq!(
            prompt,
            "Ada is a meticulous engineer.\n\n\
             You: hi\nAda: hello!\n\
             Hello! Ready to build something?\n\
             You: how do I test this?\n\
             Ada: write the prompt down first.\n\
             Ada: "
        );
    }

    #[test]
    fn generation_prompt_ends_with_the_primer_and_no_newline() {
        let prompt = build_generation_prompt(&character(), &[turn(Role::User, "You", "hi")]);
        assert!(prompt.ends_with("Ada: "));
        assert!(!prompt.ends_with('\n'));
    }

    #[test]
    fn greeting_is_skipped_when_the_character_has_none() {
        let mut no_greeting = character();
        no_greeting.greeting = None;

        let prompt = build_generation_prompt(&no_greeting, &[turn(Role::User, "You", "hi")]);

        assert_eq!(
            prompt,
            "Ada is a meticulous engineer.\n\nYou: hi\nAda: hello!\nYou: hi\nAda: "
        );
    }

    #[test]
    fn greeting_appears_once_regardless_of_transcript_length() {
        let history: Vec<Message> = (0..5)
            .map(|i| turn(Role::User, "You", &format!("line {i}")))
            .collect();
        let prompt = build_generation_prompt(&character(), &history);
        assert_eq!(prompt.matches("Hello! Ready to build something?").count(), 1);
    }

    #[test]
    fn generation_request_pairs_prompt_with_sampling_record() {
        let params = SamplingParams::default();
        let request = build_generation_request(&params, "the prompt".to_string());
        assert_eq!(request.prompt, "the prompt");
        assert_eq!(request.params, params);
    }
}
