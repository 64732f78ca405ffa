//! Session orchestration: command dispatch, reply-thread routing, and
//! per-conversation serialization.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::api::{CompletionRequest, SamplingParams};
use crate::character::{Character, CharacterCatalog};
use crate::commands::{self, Command, ModelMode, ParsedInput};
use crate::core::config::Config;
use crate::core::error::Error;
use crate::core::history::HistoryStore;
use crate::core::message::{Message, Provider, Role};
use crate::core::prompt;
use crate::logging::TranscriptLogger;
use crate::providers::{ChatCompletionApi, OpenAiClient, TextGenerationApi, WebUiClient};
use crate::transport::{IncomingMessage, ReplyTransport};
use crate::utils::name::sanitize_display_name;

/// Mutable per-provider settings, owned by the session and passed by
/// reference into prompt construction. Mutation is global to the session,
/// not per-chat, and is visible to the next request immediately.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub chat_model: String,
    pub completion_model: String,
    pub sampling: SamplingParams,
}

impl ProviderSettings {
    fn from_config(config: &Config) -> Self {
        ProviderSettings {
            chat_model: config.chat_model(),
            completion_model: config.completion_model(),
            sampling: SamplingParams::default(),
        }
    }
}

/// One active binding of a chat identity to the pair of backend clients and
/// their shared history store.
///
/// A session is `Sync`; the transport may drive any number of concurrent
/// [`handle_message`](Session::handle_message) tasks against it. History
/// mutations for one `(chat, provider)` scope are serialized so transcript
/// order always matches arrival order, even when tasks interleave around
/// backend calls.
pub struct Session {
    name: String,
    chat_api: Box<dyn ChatCompletionApi>,
    generation_api: Box<dyn TextGenerationApi>,
    catalog: CharacterCatalog,
    history: HistoryStore,
    settings: Mutex<ProviderSettings>,
    active_character: Mutex<Option<Character>>,
    scope_locks: Mutex<HashMap<(String, Provider), Arc<tokio::sync::Mutex<()>>>>,
    transcript: TranscriptLogger,
    signed_out: AtomicBool,
}

/// Factory the persistence collaborator calls once per registration record.
pub fn create_session(name: &str, config: &Config, api_key: &str) -> Session {
    Session::new(name, config, api_key)
}

impl Session {
    pub fn new(name: impl Into<String>, config: &Config, api_key: impl Into<String>) -> Self {
        let http = reqwest::Client::new();
        let chat_api = OpenAiClient::new(http.clone(), config.openai_base_url(), api_key);
        let generation_api = WebUiClient::new(http, config.webui_base_url());
        Self::with_backends(name, config, Box::new(chat_api), Box::new(generation_api))
    }

    /// Build a session over explicit backend implementations.
    pub fn with_backends(
        name: impl Into<String>,
        config: &Config,
        chat_api: Box<dyn ChatCompletionApi>,
        generation_api: Box<dyn TextGenerationApi>,
    ) -> Self {
        let session = Session {
            name: name.into(),
            chat_api,
            generation_api,
            catalog: CharacterCatalog::new(config.characters_path()),
            history: HistoryStore::new(),
            settings: Mutex::new(ProviderSettings::from_config(config)),
            active_character: Mutex::new(None),
            scope_locks: Mutex::new(HashMap::new()),
            transcript: TranscriptLogger::new(config.transcript_file.clone()),
            signed_out: AtomicBool::new(false),
        };

        if let Some(default) = config.default_character.as_deref() {
            match session.catalog.find_by_name(default) {
                Ok(Some(character)) => {
                    *session.lock_character() = Some(character);
                }
                Ok(None) => {
                    warn!(character = default, "default character not in catalog; starting without one");
                }
                Err(err) => {
                    warn!(error = %err, "character store unreadable; starting without a character");
                }
            }
        }

        session
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn transcript(&self) -> &TranscriptLogger {
        &self.transcript
    }

    /// Snapshot of the current provider settings.
    pub fn settings(&self) -> ProviderSettings {
        self.lock_settings().clone()
    }

    /// Currently selected character, if any.
    pub fn active_character(&self) -> Option<Character> {
        self.lock_character().clone()
    }

    /// Mutate the generation sampling record in place.
    pub fn update_sampling(&self, update: impl FnOnce(&mut SamplingParams)) {
        update(&mut self.lock_settings().sampling);
    }

    /// End this binding. Handled messages become no-ops; the persistence
    /// collaborator is expected to drop the registration record.
    pub fn sign_out(&self) {
        self.signed_out.store(true, Ordering::SeqCst);
        debug!(session = %self.name, "session signed out");
    }

    /// Handle one inbound message, delivering any reply through `transport`.
    ///
    /// Unrecognized commands and unresolvable free-form messages return
    /// `Ok(())` without observable effect; configuration errors reject the
    /// operation without partial application.
    pub async fn handle_message(
        &self,
        transport: &dyn ReplyTransport,
        message: IncomingMessage,
    ) -> Result<(), Error> {
        if self.signed_out.load(Ordering::SeqCst) {
            return Ok(());
        }

        let author = sanitize_display_name(message.sender_name.as_deref());
        match commands::parse(&message.body)? {
            ParsedInput::Freeform => {
                self.resolve_threaded_reply(transport, &message, &author)
                    .await
            }
            ParsedInput::Unrecognized => {
                debug!(session = %self.name, chat = %message.chat_id, "ignoring unrecognized command");
                Ok(())
            }
            ParsedInput::Command(command) => {
                self.dispatch(transport, &message, &author, command).await
            }
        }
    }

    async fn dispatch(
        &self,
        transport: &dyn ReplyTransport,
        message: &IncomingMessage,
        author: &str,
        command: Command,
    ) -> Result<(), Error> {
        match command {
            Command::Chat(text) => {
                self.run_chat_turn(transport, message, author, Role::User, text)
                    .await
            }
            Command::System(text) => {
                self.run_chat_turn(transport, message, author, Role::System, text)
                    .await
            }
            Command::Completion(text) => {
                let model = self.lock_settings().completion_model.clone();
                let request = CompletionRequest {
                    model,
                    prompt: text,
                };
                let reply = self.chat_api.complete(&request).await?;
                transport.send_reply(&message.chat_id, &reply).await?;
                Ok(())
            }
            Command::Models => {
                let listing = self.chat_api.list_models().await?;
                transport.send_reply(&message.chat_id, &listing).await?;
                Ok(())
            }
            Command::SetModel { mode, model } => {
                {
                    let mut settings = self.lock_settings();
                    match mode {
                        ModelMode::Chat => settings.chat_model = model.clone(),
                        ModelMode::Completions => settings.completion_model = model.clone(),
                    }
                }
                transport
                    .send_reply(&message.chat_id, &format!("Model set: {}", model))
                    .await?;
                Ok(())
            }
            Command::Clear(provider) => {
                self.history.clear_chat(&message.chat_id, provider);
                Ok(())
            }
            Command::ClearAll(provider) => {
                self.history.clear_all(provider);
                Ok(())
            }
            Command::Web(text) => self.run_generation_turn(transport, message, text).await,
            Command::ListCharacters => {
                let listing = self.catalog.format_listing()?;
                transport.send_reply(&message.chat_id, &listing).await?;
                Ok(())
            }
            Command::SelectCharacter(name) => {
                let character = self
                    .catalog
                    .find_by_name(&name)?
                    .ok_or(Error::CharacterNotFound(name))?;
                *self.lock_character() = Some(character);
                self.history.clear_chat(&message.chat_id, Provider::WebUi);
                Ok(())
            }
            Command::Help => {
                transport
                    .send_reply(&message.chat_id, &commands::help_text())
                    .await?;
                Ok(())
            }
        }
    }

    /// Route a non-command message by the message it quotes: a reply to an
    /// assistant turn continues that turn's conversation on the same
    /// backend. Anything else is silently ignored.
    async fn resolve_threaded_reply(
        &self,
        transport: &dyn ReplyTransport,
        message: &IncomingMessage,
        author: &str,
    ) -> Result<(), Error> {
        let Some(quoted) = message.quoted_message_id.as_deref() else {
            return Ok(());
        };
        match self.history.find_assistant_reply(quoted, &message.chat_id) {
            Some(Provider::OpenAi) => {
                self.run_chat_turn(transport, message, author, Role::User, message.body.clone())
                    .await
            }
            Some(Provider::WebUi) => {
                self.run_generation_turn(transport, message, message.body.clone())
                    .await
            }
            None => {
                debug!(chat = %message.chat_id, quoted, "quoted message not ours; ignoring");
                Ok(())
            }
        }
    }

    /// The append, generate, reply, append sequence against the hosted chat
    /// backend. A failed backend call is logged and recorded as an empty
    /// assistant turn so the transcript stays turn-balanced.
    async fn run_chat_turn(
        &self,
        transport: &dyn ReplyTransport,
        message: &IncomingMessage,
        author: &str,
        role: Role,
        text: String,
    ) -> Result<(), Error> {
        let scope = self.scope_lock(&message.chat_id, Provider::OpenAi);
        let _guard = scope.lock().await;

        let user_turn = Message::new(role, text, &message.chat_id, Provider::OpenAi)
            .with_id(message.id.clone())
            .with_author(author);
        self.log_turn(&user_turn);
        self.history.append(user_turn);

        let request = {
            let settings = self.lock_settings();
            let transcript = self.history.list_by_chat(&message.chat_id, Provider::OpenAi);
            prompt::build_chat_request(&settings.chat_model, &transcript)
        };

        let reply = match self.chat_api.chat(&request).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, chat = %message.chat_id, "chat completion failed; recording empty turn");
                String::new()
            }
        };

        let reply_id = transport.send_reply(&message.chat_id, &reply).await?;

        let assistant_turn = Message::new(Role::Assistant, reply, &message.chat_id, Provider::OpenAi)
            .with_id(reply_id);
        self.log_turn(&assistant_turn);
        self.history.append(assistant_turn);
        Ok(())
    }

    /// The same sequence against the local generation backend, voiced by the
    /// active character. Backend failures propagate; there is no balancing
    /// assistant turn for this provider.
    async fn run_generation_turn(
        &self,
        transport: &dyn ReplyTransport,
        message: &IncomingMessage,
        text: String,
    ) -> Result<(), Error> {
        let character = self
            .active_character()
            .ok_or(Error::NoCharacterSelected)?;

        let scope = self.scope_lock(&message.chat_id, Provider::WebUi);
        let _guard = scope.lock().await;

        let user_turn = Message::new(Role::User, text, &message.chat_id, Provider::WebUi)
            .with_id(message.id.clone())
            .with_author(character.user_author_name());
        self.log_turn(&user_turn);
        self.history.append(user_turn);

        let request = {
            let settings = self.lock_settings();
            let transcript = self.history.list_by_chat(&message.chat_id, Provider::WebUi);
            let prompt = prompt::build_generation_prompt(&character, &transcript);
            prompt::build_generation_request(&settings.sampling, prompt)
        };

        let reply = self.generation_api.generate(&request).await?;
        let reply_id = transport.send_reply(&message.chat_id, &reply).await?;

        let assistant_turn = Message::new(Role::Assistant, reply, &message.chat_id, Provider::WebUi)
            .with_id(reply_id)
            .with_author(character.name.clone());
        self.log_turn(&assistant_turn);
        self.history.append(assistant_turn);
        Ok(())
    }

    fn scope_lock(&self, chat_id: &str, provider: Provider) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.scope_locks.lock().expect("scope lock table poisoned");
        locks
            .entry((chat_id.to_string(), provider))
            .or_default()
            .clone()
    }

    fn log_turn(&self, message: &Message) {
        let author = message
            .author_name
            .as_deref()
            .unwrap_or(message.role.as_str());
        if let Err(err) = self.transcript.append_turn(author, &message.content) {
            warn!(error = %err, "transcript logging failed");
        }
    }

    fn lock_settings(&self) -> std::sync::MutexGuard<'_, ProviderSettings> {
        self.settings.lock().expect("settings lock poisoned")
    }

    fn lock_character(&self) -> std::sync::MutexGuard<'_, Option<Character>> {
        self.active_character.lock().expect("character lock poisoned")
    }
}
