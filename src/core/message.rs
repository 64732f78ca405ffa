use std::fmt;

/// Role of a transcript turn, as the hosted backend understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    System,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::System => "system",
            Role::Assistant => "assistant",
        }
    }

    pub fn is_assistant(self) -> bool {
        self == Role::Assistant
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two interchangeable text-generation backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// The hosted chat/completion API.
    OpenAi,
    /// The local persona-driven generation API.
    WebUi,
}

impl Provider {
    /// Spelling used on the command surface (`/clear OPENAI`).
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI",
            Provider::WebUi => "WEBUI",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transcript message. Immutable once appended to the history store.
///
/// `chat_id` is an internal correlation key partitioning conversations; it
/// never reaches a backend. `id` is assigned by the messaging transport and
/// may be absent, in which case the message can never anchor a threaded
/// reply.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: Option<String>,
    pub role: Role,
    pub content: String,
    pub author_name: Option<String>,
    pub chat_id: String,
    pub provider: Provider,
}

impl Message {
    pub fn new(
        role: Role,
        content: impl Into<String>,
        chat_id: impl Into<String>,
        provider: Provider,
    ) -> Self {
        Message {
            id: None,
            role,
            content: content.into(),
            author_name: None,
            chat_id: chat_id.into(),
            provider,
        }
    }

    pub fn with_id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }

    pub fn with_author(mut self, name: impl Into<String>) -> Self {
        self.author_name = Some(name.into());
        self
    }
}
