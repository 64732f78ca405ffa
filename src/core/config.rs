use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_WEBUI_BASE_URL: &str = "http://127.0.0.1:5000/api/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_COMPLETION_MODEL: &str = "ada";

/// On-disk configuration.
///
/// Every field is optional; accessors fall back to environment variables
/// (`OPENAI_BASE_URL`, `WEBUI_URL`) and then to built-in defaults. The API
/// key is deliberately not part of the file and always comes from the
/// environment.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Base URL for the hosted chat/completion API.
    pub openai_base_url: Option<String>,
    /// Base URL for the local generation API.
    pub webui_base_url: Option<String>,
    /// Model used by `/chat` and `/system` until `/set-model chat` changes it.
    pub chat_model: Option<String>,
    /// Model used by `/completion` until `/set-model completions` changes it.
    pub completion_model: Option<String>,
    /// Character selected when a session starts.
    pub default_character: Option<String>,
    /// Path to the character store (a JSON array of characters).
    pub characters_file: Option<PathBuf>,
    /// Append transcripts to this file when set.
    pub transcript_file: Option<String>,
}

impl Config {
    pub fn load() -> Result<Config, Box<dyn std::error::Error>> {
        Self::load_from_path(&Self::config_path())
    }

    pub fn load_from_path(config_path: &PathBuf) -> Result<Config, Box<dyn std::error::Error>> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to_path(&self, config_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    fn project_dirs() -> ProjectDirs {
        ProjectDirs::from("org", "ponte", "ponte").expect("failed to determine config directory")
    }

    fn config_path() -> PathBuf {
        Self::project_dirs().config_dir().join("config.toml")
    }

    pub fn openai_base_url(&self) -> String {
        std::env::var("OPENAI_BASE_URL")
            .ok()
            .or_else(|| self.openai_base_url.clone())
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string())
    }

    pub fn webui_base_url(&self) -> String {
        std::env::var("WEBUI_URL")
            .ok()
            .or_else(|| self.webui_base_url.clone())
            .unwrap_or_else(|| DEFAULT_WEBUI_BASE_URL.to_string())
    }

    pub fn chat_model(&self) -> String {
        self.chat_model
            .clone()
            .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string())
    }

    pub fn completion_model(&self) -> String {
        self.completion_model
            .clone()
            .unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.to_string())
    }

    /// Path to the character store, defaulting to `characters.json` next to
    /// the config file.
    pub fn characters_path(&self) -> PathBuf {
        self.characters_file.clone().unwrap_or_else(|| {
            Self::project_dirs().config_dir().join("characters.json")
        })
    }
}
