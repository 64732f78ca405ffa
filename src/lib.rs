//! Ponte is a conversation orchestration core that bridges a chat-style
//! messaging surface to two interchangeable text-generation backends: a
//! hosted chat/completion API and a locally hosted, persona-driven
//! generation API.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns session state: history partitions, provider settings,
//!   prompt construction, and command dispatch.
//! - [`commands`] parses inbound text into a closed command set.
//! - [`providers`] implements the backend clients behind async traits.
//! - [`character`] loads persona definitions from an external JSON store.
//! - [`transport`] is the boundary with the external messaging transport,
//!   which delivers inbound messages and carries replies back out.
//!
//! The binary (`src/main.rs`) wires a stdin/stdout stand-in transport to a
//! [`core::session::Session`] for working with both backends from a
//! terminal.

pub mod api;
pub mod character;
pub mod commands;
pub mod core;
pub mod logging;
pub mod providers;
pub mod transport;
pub mod utils;

pub use crate::character::{Character, CharacterCatalog};
pub use crate::core::config::Config;
pub use crate::core::error::Error;
pub use crate::core::session::{create_session, ProviderSettings, Session};
pub use crate::transport::{IncomingMessage, ReplyTransport};
