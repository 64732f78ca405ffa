//! Boundary with the external messaging transport.
//!
//! The transport delivers inbound messages by calling
//! [`crate::core::session::Session::handle_message`] and carries replies
//! back out through [`ReplyTransport`]. Everything the core needs to know
//! about the messaging layer lives here.

use async_trait::async_trait;

use crate::core::error::Error;

/// An inbound message as the transport reports it.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Transport-assigned message id, when the transport provides one.
    pub id: Option<String>,
    /// Chat-scope identifier partitioning conversations.
    pub chat_id: String,
    /// Sender display name; validated and possibly replaced before use.
    pub sender_name: Option<String>,
    /// Raw message text.
    pub body: String,
    /// Id of the message this one quotes, for threaded replies.
    pub quoted_message_id: Option<String>,
}

/// Outbound side of the messaging transport.
#[async_trait]
pub trait ReplyTransport: Send + Sync {
    /// Deliver a reply into the given chat and return the message id the
    /// transport assigned to it, if any. The session records assistant
    /// turns under that id so later threaded replies can resolve to them.
    async fn send_reply(&self, chat_id: &str, text: &str) -> Result<Option<String>, Error>;
}
