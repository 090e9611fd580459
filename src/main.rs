use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use gemchat::core::app::App;
use gemchat::core::config::Config;
use gemchat::core::constants::{DEFAULT_SERVER_URL, DEFAULT_VOICE_LOCALE};
use gemchat::core::history::HistoryStore;
use gemchat::logging;
use gemchat::ui::chat_loop::run_chat_loop;
use gemchat::voice::VoiceCapture;

#[derive(Parser)]
#[command(name = "gemchat")]
#[command(about = "A terminal chat client for a Gemini chat relay")]
#[command(
    long_about = "Gemchat is a full-screen terminal chat client that talks to a Gemini chat \
relay over HTTP. Conversation history is kept in a local file and restored on startup.\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message (or run a /command)\n\
  Up/Down/Mouse     Scroll through chat history\n\
  Ctrl+C            Quit the application\n\n\
Commands:\n\
  /clear            Delete the conversation (asks for confirmation)\n\
  /export           Save the transcript to a text file\n\
  /voice            Toggle voice input (needs a configured recognizer)\n\
  /attach <file>    Attach a file (upload is not implemented yet)"
)]
struct Args {
    /// Base URL of the chat relay
    #[arg(short, long)]
    server: Option<String>,

    /// History file location
    #[arg(long)]
    history: Option<PathBuf>,

    /// Write diagnostics to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = Config::load()?;

    logging::init(args.log_file.or(config.log_file.clone()))?;

    let server_url = args
        .server
        .or(config.server_url.clone())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
    let history_path = args
        .history
        .or(config.history_file.clone())
        .unwrap_or_else(Config::default_history_path);
    let voice_locale = config
        .voice_locale
        .clone()
        .unwrap_or_else(|| DEFAULT_VOICE_LOCALE.to_string());

    let history = HistoryStore::new(history_path);
    let voice = VoiceCapture::new(config.voice_command.clone(), voice_locale);
    let app = App::new(server_url, history, voice);

    run_chat_loop(app).await
}
