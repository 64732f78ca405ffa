//! Append-only conversation history, partitioned by `(chat id, provider)`.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::core::message::{Message, Provider, Role};

/// Shared store of every retained transcript message.
///
/// `append` is the only mutator and never rejects a well-formed message.
/// Appends also maintain an index from transport message id to the turn's
/// partition, so threaded replies resolve without scanning both transcripts.
#[derive(Default)]
pub struct HistoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    messages: Vec<Message>,
    index: HashMap<String, IndexEntry>,
}

struct IndexEntry {
    provider: Provider,
    chat_id: String,
    role: Role,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, message: Message) {
        let mut inner = self.inner.lock().expect("history lock poisoned");
        if let Some(id) = message.id.clone() {
            inner.index.insert(
                id,
                IndexEntry {
                    provider: message.provider,
                    chat_id: message.chat_id.clone(),
                    role: message.role,
                },
            );
        }
        inner.messages.push(message);
    }

    /// Snapshot of one chat partition, in exact append order.
    pub fn list_by_chat(&self, chat_id: &str, provider: Provider) -> Vec<Message> {
        let inner = self.inner.lock().expect("history lock poisoned");
        inner
            .messages
            .iter()
            .filter(|m| m.provider == provider && m.chat_id == chat_id)
            .cloned()
            .collect()
    }

    /// Erase one chat's partition for the given provider.
    pub fn clear_chat(&self, chat_id: &str, provider: Provider) {
        let mut inner = self.inner.lock().expect("history lock poisoned");
        inner
            .messages
            .retain(|m| !(m.provider == provider && m.chat_id == chat_id));
        inner
            .index
            .retain(|_, e| !(e.provider == provider && e.chat_id == chat_id));
    }

    /// Erase every chat's partition for the given provider.
    pub fn clear_all(&self, provider: Provider) {
        let mut inner = self.inner.lock().expect("history lock poisoned");
        inner.messages.retain(|m| m.provider != provider);
        inner.index.retain(|_, e| e.provider != provider);
    }

    /// Resolve a quoted message id to the provider whose assistant turn it
    /// identifies, restricted to the given chat scope. User turns and other
    /// chats' messages never match.
    pub fn find_assistant_reply(&self, message_id: &str, chat_id: &str) -> Option<Provider> {
        let inner = self.inner.lock().expect("history lock poisoned");
        inner
            .index
            .get(message_id)
            .filter(|e| e.chat_id == chat_id && e.role.is_assistant())
            .map(|e| e.provider)
    }
}
