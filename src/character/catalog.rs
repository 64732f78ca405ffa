//! Character personas for the local generation backend.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::Error;

/// A named persona shaping the local backend's voice. Read-only after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeting: Option<String>,
    pub example_dialogue: String,
    /// Locale tag (e.g. `PT_BR`); drives the human-side author name in
    /// generated transcripts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Character {
    /// Author name for the human side of this character's transcripts.
    pub fn user_author_name(&self) -> &'static str {
        match self.language.as_deref() {
            Some("PT_BR") => "Você",
            _ => "You",
        }
    }
}

/// Catalog over an external JSON store (an array of characters).
///
/// The store is re-read at lookup time rather than cached; a missing file
/// degrades to an empty catalog, while a present-but-undecodable file is an
/// error.
pub struct CharacterCatalog {
    path: PathBuf,
}

impl CharacterCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CharacterCatalog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All characters in store order.
    pub fn list(&self) -> Result<Vec<Character>, Error> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return Ok(Vec::new()),
        };
        serde_json::from_str(&contents).map_err(|source| Error::InvalidCharacterStore {
            path: self.path.clone(),
            source,
        })
    }

    /// Case-sensitive exact-match lookup.
    pub fn find_by_name(&self, name: &str) -> Result<Option<Character>, Error> {
        Ok(self.list()?.into_iter().find(|c| c.name == name))
    }

    /// Reply body for `/list-characters`: one `name - context` entry per
    /// character, blank-line separated.
    pub fn format_listing(&self) -> Result<String, Error> {
        let entries: Vec<String> = self
            .list()?
            .iter()
            .map(|c| format!("{} - {}", c.name, c.context))
            .collect();
        Ok(entries.join("\n\n"))
    }
}
