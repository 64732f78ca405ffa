use std::env;
use std::error::Error;
use std::io::{self, BufRead};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ponte::core::config::Config;
use ponte::core::session::Session;
use ponte::logging::default_transcript_filename;
use ponte::transport::{IncomingMessage, ReplyTransport};

#[derive(Parser)]
#[command(name = "ponte")]
#[command(about = "Chat with hosted and local text-generation backends from the terminal")]
#[command(long_about = "Ponte bridges a chat surface to two text-generation backends: an \
OpenAI-compatible hosted API and a local text-generation-webui instance. This binary stands \
in for the messaging transport: each stdin line is handled as an inbound message and replies \
are printed with the id they would carry on a real transport.\n\n\
Environment Variables:\n\
  OPENAI_API_KEY    API key for the hosted backend (required)\n\
  OPENAI_BASE_URL   Custom hosted API base URL (optional)\n\
  WEBUI_URL         Local generation API base URL (optional)\n\n\
Usage:\n\
  /help             List the available commands\n\
  @<id> <text>      Continue the reply that was printed with [<id>]")]
struct Args {
    /// Session name for this binding.
    #[arg(short, long, default_value = "local")]
    name: String,

    /// Select a character at startup, overriding the configured default.
    #[arg(short, long)]
    character: Option<String>,

    /// Append the conversation transcript to FILE (dated filename when
    /// FILE is omitted).
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    log: Option<Option<String>>,
}

/// Stand-in transport: replies go to stdout, tagged with a synthetic
/// message id the user can quote with `@<id>`.
#[derive(Default)]
struct StdioTransport {
    counter: AtomicU64,
}

#[async_trait]
impl ReplyTransport for StdioTransport {
    async fn send_reply(&self, _chat_id: &str, text: &str) -> Result<Option<String>, ponte::Error> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        println!("[r{}] {}", n, text);
        Ok(Some(format!("r{}", n)))
    }
}

fn split_quote_prefix(line: &str) -> (Option<String>, &str) {
    if let Some(rest) = line.strip_prefix('@') {
        if let Some((id, body)) = rest.split_once(char::is_whitespace) {
            if !id.is_empty() {
                return (Some(id.to_string()), body.trim_start());
            }
        }
    }
    (None, line)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
        "OPENAI_API_KEY environment variable not set

Please set the API key for the hosted backend:
export OPENAI_API_KEY=\"your-api-key-here\"

Optionally, you can also set custom base URLs:
export OPENAI_BASE_URL=\"https://api.openai.com/v1\"
export WEBUI_URL=\"http://127.0.0.1:5000/api/v1\""
    })?;

    let mut config = Config::load()?;
    if args.character.is_some() {
        config.default_character = args.character.clone();
    }
    if let Some(log) = args.log {
        config.transcript_file = Some(log.unwrap_or_else(default_transcript_filename));
    }

    let session = Session::new(&args.name, &config, api_key);

    eprintln!("ponte session '{}' ready", session.name());
    eprintln!("type /help for commands; prefix a line with @<id> to continue an earlier reply; Ctrl+D exits");

    let transport = StdioTransport::default();
    let sender_name = env::var("USER").ok();
    let stdin = io::stdin();
    let mut line_no = 0u64;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        line_no += 1;

        let (quoted_message_id, body) = split_quote_prefix(&line);
        let message = IncomingMessage {
            id: Some(format!("u{}", line_no)),
            chat_id: "local".to_string(),
            sender_name: sender_name.clone(),
            body: body.to_string(),
            quoted_message_id,
        };

        if let Err(err) = session.handle_message(&transport, message).await {
            eprintln!("error: {}", err);
        }
    }

    Ok(())
}
