use std::fmt;
use std::path::PathBuf;

/// Errors surfaced by the orchestration core.
///
/// Validation failures (bad display names) are recovered locally and never
/// appear here, and reply-thread misses are silently ignored; everything
/// else a caller can observe is one of these variants.
#[derive(Debug)]
pub enum Error {
    /// Network-level failure reaching a backend.
    Transport(reqwest::Error),
    /// A backend answered with a non-success status.
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    /// The messaging transport failed to deliver a reply.
    Delivery(String),
    /// A generation call was made with no character selected.
    NoCharacterSelected,
    /// `/select-character` named a character absent from the catalog.
    CharacterNotFound(String),
    /// `/set-model` was given a mode other than `chat` or `completions`.
    UnknownModelMode(String),
    /// A clear command was given a provider other than `OPENAI` or `WEBUI`.
    UnknownProviderName(String),
    /// A command was missing a required argument.
    MissingArgument(&'static str),
    /// The character store exists but could not be decoded.
    InvalidCharacterStore {
        path: PathBuf,
        source: serde_json::Error,
    },
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(err) => write!(f, "backend request failed: {}", err),
            Error::Api { status, body } => {
                write!(f, "backend request failed with status {}: {}", status, body)
            }
            Error::Delivery(msg) => write!(f, "reply delivery failed: {}", msg),
            Error::NoCharacterSelected => {
                write!(f, "no character selected; use /select-character first")
            }
            Error::CharacterNotFound(name) => {
                write!(f, "character '{}' not found in the catalog", name)
            }
            Error::UnknownModelMode(mode) => {
                write!(f, "unknown model mode '{}'; expected chat or completions", mode)
            }
            Error::UnknownProviderName(name) => {
                write!(f, "unknown provider '{}'; expected OPENAI or WEBUI", name)
            }
            Error::MissingArgument(usage) => write!(f, "missing argument; usage: {}", usage),
            Error::InvalidCharacterStore { path, source } => {
                write!(f, "invalid character store {}: {}", path.display(), source)
            }
            Error::Io(err) => write!(f, "io error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Transport(err) => Some(err),
            Error::InvalidCharacterStore { source, .. } => Some(source),
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
