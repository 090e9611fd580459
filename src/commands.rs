use tokio::sync::mpsc::UnboundedSender;

use crate::core::app::App;
use crate::voice::VoiceEvent;

pub enum CommandResult {
    Continue,
    ProcessAsMessage(String),
}

/// Routes submitted input. Slash commands map onto the session controller
/// operations; anything else (including unknown commands) is chat text.
pub fn process_input(
    app: &mut App,
    input: &str,
    voice_events: &UnboundedSender<VoiceEvent>,
) -> CommandResult {
    let trimmed = input.trim();

    if !trimmed.starts_with('/') {
        return CommandResult::ProcessAsMessage(input.to_string());
    }

    let mut parts = trimmed[1..].splitn(2, ' ');
    let command_name = match parts.next() {
        Some(name) if !name.is_empty() => name,
        _ => return CommandResult::ProcessAsMessage(input.to_string()),
    };
    let args = parts.next().unwrap_or("").trim();

    match command_name {
        "clear" => {
            app.request_clear();
            CommandResult::Continue
        }
        "export" => {
            app.export();
            CommandResult::Continue
        }
        "voice" => {
            app.toggle_voice(voice_events);
            CommandResult::Continue
        }
        "attach" => {
            if args.is_empty() {
                app.set_status("Cách dùng: /attach <file>");
            } else {
                app.attach(args);
            }
            CommandResult::Continue
        }
        "help" => {
            app.set_status("Lệnh: /clear /export /voice /attach <file> /help");
            CommandResult::Continue
        }
        _ => CommandResult::ProcessAsMessage(input.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{CLEAR_CONFIRM_PROMPT, EXPORT_EMPTY_NOTICE};
    use crate::utils::test_utils::create_test_app;
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    #[test]
    fn plain_text_passes_through() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = create_test_app(temp_dir.path());
        let (tx, _rx) = mpsc::unbounded_channel();

        match process_input(&mut app, "Hello there", &tx) {
            CommandResult::ProcessAsMessage(text) => assert_eq!(text, "Hello there"),
            CommandResult::Continue => panic!("plain text should be a message"),
        }
    }

    #[test]
    fn unknown_command_falls_through_as_text() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = create_test_app(temp_dir.path());

        let (tx, _rx) = mpsc::unbounded_channel();
        match process_input(&mut app, "/frobnicate now", &tx) {
            CommandResult::ProcessAsMessage(text) => assert_eq!(text, "/frobnicate now"),
            CommandResult::Continue => panic!("unknown command should be a message"),
        }
    }

    #[test]
    fn bare_slash_is_treated_as_text() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = create_test_app(temp_dir.path());

        let (tx, _rx) = mpsc::unbounded_channel();
        assert!(matches!(
            process_input(&mut app, "/", &tx),
            CommandResult::ProcessAsMessage(_)
        ));
    }

    #[test]
    fn clear_command_arms_confirmation_only() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = create_test_app(temp_dir.path());
        app.push_message(crate::core::message::Message::user("hi"));

        let (tx, _rx) = mpsc::unbounded_channel();
        assert!(matches!(
            process_input(&mut app, "/clear", &tx),
            CommandResult::Continue
        ));
        assert!(app.pending_clear);
        assert_eq!(app.status, CLEAR_CONFIRM_PROMPT);
        // Nothing deleted until the prompt is answered.
        assert_eq!(app.messages.len(), 1);
    }

    #[test]
    fn export_command_reports_empty_history() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = create_test_app(temp_dir.path());

        let (tx, _rx) = mpsc::unbounded_channel();
        process_input(&mut app, "/export", &tx);
        assert_eq!(app.status, EXPORT_EMPTY_NOTICE);
    }

    #[test]
    fn attach_without_argument_shows_usage() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = create_test_app(temp_dir.path());

        let (tx, _rx) = mpsc::unbounded_channel();
        process_input(&mut app, "/attach", &tx);
        assert!(app.status.starts_with("Cách dùng"));
        assert!(app.messages.is_empty());
    }

    #[test]
    fn attach_with_argument_hits_the_stub() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = create_test_app(temp_dir.path());
        let file_path = temp_dir.path().join("bài tập.pdf");
        std::fs::write(&file_path, "x").unwrap();

        let (tx, _rx) = mpsc::unbounded_channel();
        process_input(&mut app, &format!("/attach {}", file_path.display()), &tx);
        assert_eq!(app.messages.len(), 2);
        assert_eq!(app.messages[0].content, "Đã chọn file: bài tập.pdf");
    }
}
