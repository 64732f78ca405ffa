//! Inbound command parsing.
//!
//! Raw inbound text splits on the first whitespace run into a command word
//! and argument text. Text without the leading `/` marker is free-form and
//! falls through to reply-thread resolution; a `/`-prefixed word with no
//! table entry is a silent no-op, not an error. Recognized commands with
//! malformed arguments are configuration errors, surfaced to the caller and
//! never partially applied.

mod registry;

pub use registry::{help_text, CommandSpec, COMMANDS};

use crate::core::error::Error;
use crate::core::message::Provider;

/// Model slot addressed by `/set-model`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelMode {
    Chat,
    Completions,
}

/// The closed set of commands the dispatcher handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Chat(String),
    System(String),
    Completion(String),
    Models,
    SetModel { mode: ModelMode, model: String },
    Clear(Provider),
    ClearAll(Provider),
    Web(String),
    ListCharacters,
    SelectCharacter(String),
    Help,
}

/// What an inbound message body parses to.
#[derive(Debug, PartialEq, Eq)]
pub enum ParsedInput {
    Command(Command),
    /// No leading marker; candidate for reply-thread resolution.
    Freeform,
    /// Leading marker but no matching command; ignored without a reply.
    Unrecognized,
}

pub fn parse(body: &str) -> Result<ParsedInput, Error> {
    let Some(rest) = body.strip_prefix('/') else {
        return Ok(ParsedInput::Freeform);
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    let command = match name {
        "chat" => Command::Chat(args.to_string()),
        "system" => Command::System(args.to_string()),
        "completion" => Command::Completion(args.to_string()),
        "models" => Command::Models,
        "set-model" => parse_set_model(args)?,
        "clear" => Command::Clear(parse_provider(args, "/clear <OPENAI|WEBUI>")?),
        "clearAll" => Command::ClearAll(parse_provider(args, "/clearAll <OPENAI|WEBUI>")?),
        "web" => Command::Web(args.to_string()),
        "list-characters" => Command::ListCharacters,
        "select-character" => {
            if args.is_empty() {
                return Err(Error::MissingArgument("/select-character <name>"));
            }
            Command::SelectCharacter(args.to_string())
        }
        "help" => Command::Help,
        _ => return Ok(ParsedInput::Unrecognized),
    };

    Ok(ParsedInput::Command(command))
}

fn parse_set_model(args: &str) -> Result<Command, Error> {
    const USAGE: &str = "/set-model <chat|completions> <model>";
    let mut words = args.split_whitespace();
    let mode = words.next().ok_or(Error::MissingArgument(USAGE))?;
    let model = words.next().ok_or(Error::MissingArgument(USAGE))?;

    let mode = match mode {
        "chat" => ModelMode::Chat,
        "completions" => ModelMode::Completions,
        other => return Err(Error::UnknownModelMode(other.to_string())),
    };

    Ok(Command::SetModel {
        mode,
        model: model.to_string(),
    })
}

fn parse_provider(args: &str, usage: &'static str) -> Result<Provider, Error> {
    match args {
        "OPENAI" => Ok(Provider::OpenAi),
        "WEBUI" => Ok(Provider::WebUi),
        "" => Err(Error::MissingArgument(usage)),
        other => Err(Error::UnknownProviderName(other.to_string())),
    }
}
