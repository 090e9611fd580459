use std::path::Path;

use reqwest::Client;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::api::ChatOutcome;
use crate::core::constants::{
    ATTACH_STUB_REPLY, CLEAR_CONFIRM_PROMPT, CONNECTION_ERROR_MESSAGE, EXPORT_EMPTY_NOTICE,
    SERVER_ERROR_PREFIX, STATUS_CLEARED, STATUS_CONNECTION_ERROR, STATUS_ERROR, STATUS_PROCESSING,
    STATUS_READY, STATUS_RECORDING, VOICE_UNSUPPORTED_NOTICE,
};
use crate::core::export::export_transcript;
use crate::core::history::HistoryStore;
use crate::core::message::Message;
use crate::voice::{VoiceCapture, VoiceEvent, VoiceEventKind};

/// The chat session controller. It owns the in-memory history, the input
/// field, the status line, and the single pending-request flag; everything
/// the UI shows is derived from this state.
pub struct App {
    pub messages: Vec<Message>,
    pub input: String,
    pub status: String,
    /// One request in flight at a time; submits are refused while set.
    /// Doubles as the typing indicator.
    pub waiting: bool,
    /// Clear has been requested and awaits a y/n answer.
    pub pending_clear: bool,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    pub client: Client,
    pub server_url: String,
    pub history: HistoryStore,
    pub voice: VoiceCapture,
}

impl App {
    /// Builds the session and hydrates history from the store. Corrupt or
    /// missing history comes back as an empty list, never as an error.
    pub fn new(server_url: String, history: HistoryStore, voice: VoiceCapture) -> Self {
        let messages = history.load();
        App {
            messages,
            input: String::new(),
            status: STATUS_READY.to_string(),
            waiting: false,
            pending_clear: false,
            scroll_offset: 0,
            auto_scroll: true,
            client: Client::new(),
            server_url,
            history,
            voice,
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Appends a message and rewrites the history file. A failed write is
    /// logged and swallowed; it never interrupts the flow.
    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.history.save(&self.messages) {
            warn!(error = %e, "failed to persist chat history");
        }
    }

    /// Validates and records a user turn. Blank input and re-entry while a
    /// request is pending are silent no-ops. Returns the text to send.
    pub fn begin_turn(&mut self) -> Option<String> {
        if self.waiting {
            return None;
        }
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return None;
        }

        self.push_message(Message::user(text.clone()));
        self.input.clear();
        self.waiting = true;
        self.auto_scroll = true;
        self.set_status(STATUS_PROCESSING);
        Some(text)
    }

    /// Lands the outcome of a turn in the transcript. The typing indicator
    /// disappears with `waiting`, exactly once per turn.
    pub fn finish_turn(&mut self, outcome: ChatOutcome) {
        self.waiting = false;
        match outcome {
            ChatOutcome::Reply(text) => {
                self.push_message(Message::assistant(text));
                self.set_status(STATUS_READY);
            }
            ChatOutcome::ServerError(text) => {
                self.push_message(Message::assistant_error(format!(
                    "{SERVER_ERROR_PREFIX}{text}"
                )));
                self.set_status(STATUS_ERROR);
            }
            ChatOutcome::ConnectionFailed => {
                self.push_message(Message::assistant_error(CONNECTION_ERROR_MESSAGE));
                self.set_status(STATUS_CONNECTION_ERROR);
            }
        }
        self.auto_scroll = true;
    }

    /// Arms the clear confirmation; nothing is deleted until the user
    /// answers via [`App::resolve_clear`].
    pub fn request_clear(&mut self) {
        self.pending_clear = true;
        self.set_status(CLEAR_CONFIRM_PROMPT);
    }

    pub fn resolve_clear(&mut self, confirmed: bool) {
        self.pending_clear = false;
        if confirmed {
            self.messages.clear();
            self.persist();
            self.scroll_offset = 0;
            self.auto_scroll = true;
            self.set_status(STATUS_CLEARED);
        } else {
            self.set_status(STATUS_READY);
        }
    }

    /// Exports the transcript to the working directory. An empty history
    /// is a status notice, not a file.
    pub fn export(&mut self) {
        self.export_to(Path::new("."));
    }

    pub fn export_to(&mut self, dir: &Path) {
        if self.messages.is_empty() {
            self.set_status(EXPORT_EMPTY_NOTICE);
            return;
        }
        match export_transcript(&self.messages, dir) {
            Ok(path) => self.set_status(format!("Đã xuất: {}", path.display())),
            Err(e) => {
                warn!(error = %e, "failed to export transcript");
                self.set_status(STATUS_ERROR);
            }
        }
    }

    /// Records a file selection. Upload is an intentional stub: the pair
    /// of messages below is the whole feature.
    pub fn attach(&mut self, path: &str) {
        let path = Path::new(path.trim());
        if !path.exists() {
            self.set_status(format!("Không tìm thấy file: {}", path.display()));
            return;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.push_message(Message::user(format!("Đã chọn file: {name}")));
        self.push_message(Message::assistant(ATTACH_STUB_REPLY));
        self.auto_scroll = true;
    }

    /// Toggles voice capture. Without a configured recognizer this is a
    /// status notice; while recording it stops rather than starting a
    /// second session.
    pub fn toggle_voice(&mut self, events: &UnboundedSender<VoiceEvent>) {
        if !self.voice.is_supported() {
            self.set_status(VOICE_UNSUPPORTED_NOTICE);
            return;
        }
        if self.voice.is_recording() {
            self.voice.stop();
            self.set_status(STATUS_READY);
        } else {
            self.voice.start(events.clone());
            self.set_status(STATUS_RECORDING);
        }
    }

    /// Recognizer callback: a transcript fills the input field, and every
    /// event returns the recorder to idle with the status restored.
    /// Events from a superseded session are dropped entirely.
    pub fn on_voice_event(&mut self, event: VoiceEvent) {
        if !self.voice.on_event(&event) {
            return;
        }
        if let VoiceEventKind::Transcript(text) = &event.kind {
            self.input = text.clone();
        }
        if self.status == STATUS_RECORDING {
            self.set_status(STATUS_READY);
        }
    }
}
