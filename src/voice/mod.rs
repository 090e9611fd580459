//! Voice input via an external speech-to-text command.
//!
//! The recognizer is whatever program the user configured; it is invoked
//! with the spoken-language locale as its final argument and its stdout is
//! taken as the transcript. Events mirror the recognizer callbacks the
//! session controller reacts to: a result, an error, and end-of-session.
//! Each capture session carries an id so events from a stopped session
//! cannot disturb a newer one.

use std::process::Stdio;

use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Idle,
    Recording,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceEvent {
    pub session_id: u64,
    pub kind: VoiceEventKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceEventKind {
    /// Recognizer produced text; it goes into the input field.
    Transcript(String),
    /// Recognizer failed. Logged, never shown in the transcript.
    Error(String),
    /// Recognizer session ended, with or without a result.
    Ended,
}

impl VoiceEvent {
    pub fn transcript(session_id: u64, text: impl Into<String>) -> Self {
        VoiceEvent {
            session_id,
            kind: VoiceEventKind::Transcript(text.into()),
        }
    }

    pub fn error(session_id: u64, message: impl Into<String>) -> Self {
        VoiceEvent {
            session_id,
            kind: VoiceEventKind::Error(message.into()),
        }
    }

    pub fn ended(session_id: u64) -> Self {
        VoiceEvent {
            session_id,
            kind: VoiceEventKind::Ended,
        }
    }
}

pub struct VoiceCapture {
    command: Option<String>,
    locale: String,
    state: VoiceState,
    cancel_token: Option<CancellationToken>,
    /// Bumped on every start; events from older sessions are stale.
    current_session_id: u64,
}

impl VoiceCapture {
    pub fn new(command: Option<String>, locale: String) -> Self {
        VoiceCapture {
            command,
            locale,
            state: VoiceState::Idle,
            cancel_token: None,
            current_session_id: 0,
        }
    }

    /// Whether a recognizer command is configured at all.
    pub fn is_supported(&self) -> bool {
        self.command.is_some()
    }

    pub fn is_recording(&self) -> bool {
        self.state == VoiceState::Recording
    }

    pub fn current_session_id(&self) -> u64 {
        self.current_session_id
    }

    /// Starts a capture session. Returns false when no recognizer is
    /// configured; a second start while recording is a no-op.
    pub fn start(&mut self, events: UnboundedSender<VoiceEvent>) -> bool {
        let Some(command) = self.command.clone() else {
            return false;
        };
        if self.state == VoiceState::Recording {
            return true;
        }

        let token = CancellationToken::new();
        self.cancel_token = Some(token.clone());
        self.state = VoiceState::Recording;
        self.current_session_id += 1;

        let session_id = self.current_session_id;
        let locale = self.locale.clone();
        tokio::spawn(async move {
            run_recognizer(session_id, command, locale, token, events).await;
        });
        true
    }

    /// Stops an in-flight session. The spawned task still delivers its
    /// terminal `Ended` event.
    pub fn stop(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        self.state = VoiceState::Idle;
    }

    /// Handles a recognizer event. Events from a superseded session are
    /// ignored and `false` is returned; a current-session event ends the
    /// session and returns `true`.
    pub fn on_event(&mut self, event: &VoiceEvent) -> bool {
        if event.session_id != self.current_session_id {
            debug!(
                stale = event.session_id,
                current = self.current_session_id,
                "ignoring event from superseded voice session"
            );
            return false;
        }
        match &event.kind {
            VoiceEventKind::Error(e) => warn!(error = %e, "speech recognition error"),
            VoiceEventKind::Transcript(_) | VoiceEventKind::Ended => {}
        }
        self.cancel_token = None;
        self.state = VoiceState::Idle;
        true
    }
}

async fn run_recognizer(
    session_id: u64,
    command: String,
    locale: String,
    token: CancellationToken,
    events: UnboundedSender<VoiceEvent>,
) {
    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        let _ = events.send(VoiceEvent::error(session_id, "empty recognizer command"));
        let _ = events.send(VoiceEvent::ended(session_id));
        return;
    };

    debug!(%program, %locale, session_id, "starting speech recognizer");
    let spawned = Command::new(program)
        .args(parts)
        .arg(&locale)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            let _ = events.send(VoiceEvent::error(session_id, e.to_string()));
            let _ = events.send(VoiceEvent::ended(session_id));
            return;
        }
    };

    let mut transcript = String::new();
    let mut stdout = child.stdout.take();
    let read = async {
        if let Some(out) = stdout.as_mut() {
            let _ = out.read_to_string(&mut transcript).await;
        }
    };

    tokio::select! {
        _ = token.cancelled() => {
            let _ = child.kill().await;
            let _ = events.send(VoiceEvent::ended(session_id));
            return;
        }
        _ = read => {}
    }

    match child.wait().await {
        Ok(status) if status.success() => {
            let text = transcript.trim();
            if !text.is_empty() {
                let _ = events.send(VoiceEvent::transcript(session_id, text));
            }
        }
        Ok(status) => {
            let _ = events.send(VoiceEvent::error(
                session_id,
                format!("recognizer exited with {status}"),
            ));
        }
        Err(e) => {
            let _ = events.send(VoiceEvent::error(session_id, e.to_string()));
        }
    }
    let _ = events.send(VoiceEvent::ended(session_id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn start_without_command_reports_unsupported() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut voice = VoiceCapture::new(None, "vi-VN".to_string());

        assert!(!voice.is_supported());
        assert!(!voice.start(tx));
        assert!(!voice.is_recording());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn second_start_does_not_spawn_again() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut voice = VoiceCapture::new(Some("sleep 5".to_string()), "vi-VN".to_string());

        assert!(voice.start(tx.clone()));
        let first_token = voice.cancel_token.clone().unwrap();
        let first_session = voice.current_session_id();
        assert!(voice.start(tx));
        assert_eq!(voice.current_session_id(), first_session);
        voice.stop();
        // Same session throughout: stopping cancelled the original token.
        assert!(first_token.is_cancelled());
    }

    #[tokio::test]
    async fn events_return_state_to_idle() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut voice = VoiceCapture::new(Some("sleep 5".to_string()), "vi-VN".to_string());
        voice.start(tx);
        assert!(voice.is_recording());

        let session = voice.current_session_id();
        assert!(voice.on_event(&VoiceEvent::transcript(session, "xin chào")));
        assert!(!voice.is_recording());
    }

    #[tokio::test]
    async fn stale_ended_does_not_reset_newer_session() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut voice = VoiceCapture::new(Some("sleep 30".to_string()), "vi-VN".to_string());

        voice.start(tx.clone());
        let first_session = voice.current_session_id();
        voice.stop();
        voice.start(tx);
        let second_token = voice.cancel_token.clone().unwrap();

        // The stopped session's end event arrives after the restart.
        assert!(!voice.on_event(&VoiceEvent::ended(first_session)));
        assert!(voice.is_recording());
        assert!(!second_token.is_cancelled());

        // The live session still ends normally.
        let current = voice.current_session_id();
        assert!(voice.on_event(&VoiceEvent::ended(current)));
        assert!(!voice.is_recording());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn recognizer_output_becomes_transcript() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut voice = VoiceCapture::new(Some("echo xin".to_string()), "chào".to_string());
        voice.start(tx);
        let session = voice.current_session_id();

        // The recognizer here is `echo xin chào`, so stdout is the transcript.
        assert_eq!(
            rx.recv().await,
            Some(VoiceEvent::transcript(session, "xin chào"))
        );
        assert_eq!(rx.recv().await, Some(VoiceEvent::ended(session)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stop_kills_recognizer_and_ends_session() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut voice = VoiceCapture::new(Some("sleep 30".to_string()), "vi-VN".to_string());
        voice.start(tx);
        let session = voice.current_session_id();

        voice.stop();
        assert!(!voice.is_recording());
        assert_eq!(rx.recv().await, Some(VoiceEvent::ended(session)));
    }

    #[tokio::test]
    async fn unspawnable_recognizer_reports_error_then_end() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut voice = VoiceCapture::new(
            Some("gemchat-no-such-recognizer".to_string()),
            "vi-VN".to_string(),
        );
        voice.start(tx);

        match rx.recv().await.map(|event| event.kind) {
            Some(VoiceEventKind::Error(_)) => {}
            other => panic!("expected error event, got {other:?}"),
        }
        assert_eq!(
            rx.recv().await.map(|event| event.kind),
            Some(VoiceEventKind::Ended)
        );
    }
}
