use chrono::Local;
use unicode_width::UnicodeWidthStr;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::core::app::App;
use crate::core::constants::{EMPTY_STATE_HINT, EMPTY_STATE_TITLE, TYPING_INDICATOR};
use crate::core::message::Message;

/// Builds the transcript as styled lines: empty-state placeholder when
/// there is nothing to show, otherwise one block per message plus the
/// typing indicator while a request is pending.
pub fn build_display_lines(app: &App) -> Vec<Line<'_>> {
    let mut lines = Vec::new();

    if app.messages.is_empty() && !app.waiting {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            EMPTY_STATE_TITLE,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            EMPTY_STATE_HINT,
            Style::default().fg(Color::DarkGray),
        )));
        return lines;
    }

    for msg in &app.messages {
        push_message_lines(&mut lines, msg);
    }

    if app.waiting {
        lines.push(Line::from(Span::styled(
            TYPING_INDICATOR,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(""));
    }

    lines
}

fn push_message_lines<'a>(lines: &mut Vec<Line<'a>>, msg: &'a Message) {
    let time = msg.timestamp.with_timezone(&Local).format("%H:%M");
    let time_span = Span::styled(format!("[{time}] "), Style::default().fg(Color::DarkGray));

    if msg.sender.is_user() {
        lines.push(Line::from(vec![
            time_span,
            Span::styled(
                format!("{}: ", msg.sender.label()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(msg.content.as_str(), Style::default().fg(Color::Cyan)),
        ]));
    } else {
        let style = if msg.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::White)
        };
        let mut first = true;
        for content_line in msg.content.lines() {
            if first {
                lines.push(Line::from(vec![
                    time_span.clone(),
                    Span::styled(content_line, style),
                ]));
                first = false;
            } else if content_line.trim().is_empty() {
                lines.push(Line::from(""));
            } else {
                lines.push(Line::from(Span::styled(content_line, style)));
            }
        }
        if first {
            // Empty reply still occupies a line.
            lines.push(Line::from(time_span));
        }
    }
    lines.push(Line::from(""));
}

pub fn calculate_max_scroll_offset(app: &App, available_height: u16) -> u16 {
    let total_lines = build_display_lines(app).len() as u16;
    total_lines.saturating_sub(available_height)
}

pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    let lines = build_display_lines(app);

    // Account for the title row; the transcript has no borders.
    let available_height = chunks[0].height.saturating_sub(1);
    let total_lines = lines.len() as u16;
    let max_offset = total_lines.saturating_sub(available_height);
    let scroll_offset = if app.auto_scroll {
        max_offset
    } else {
        app.scroll_offset.min(max_offset)
    };

    let transcript = Paragraph::new(lines)
        .block(Block::default().title("Gemini Chat"))
        .wrap(Wrap { trim: true })
        .scroll((scroll_offset, 0));
    f.render_widget(transcript, chunks[0]);

    let input_title = if app.pending_clear {
        app.status.as_str()
    } else {
        "Nhập tin nhắn (Enter để gửi, Ctrl+C để thoát)"
    };
    let input = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(input_title))
        .wrap(Wrap { trim: true });
    f.render_widget(input, chunks[1]);

    let status = Paragraph::new(app.status.as_str()).style(Style::default().fg(Color::DarkGray));
    f.render_widget(status, chunks[2]);

    if !app.pending_clear {
        let inner_width = chunks[1].width.saturating_sub(2);
        f.set_cursor_position((
            chunks[1].x + 1 + input_cursor_offset(&app.input, inner_width),
            chunks[1].y + 1,
        ));
    }
}

/// Cursor column within the input box: the display width of the text,
/// clamped so the cursor never walks past the border.
fn input_cursor_offset(input: &str, inner_width: u16) -> u16 {
    let width = input.width().min(u16::MAX as usize) as u16;
    width.min(inner_width.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ChatOutcome;
    use crate::utils::test_utils::create_test_app;
    use tempfile::TempDir;

    fn rendered_text(app: &App) -> String {
        build_display_lines(app)
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn empty_history_shows_placeholder() {
        let temp_dir = TempDir::new().unwrap();
        let app = create_test_app(temp_dir.path());

        let text = rendered_text(&app);
        assert!(text.contains(EMPTY_STATE_TITLE));
        assert!(text.contains(EMPTY_STATE_HINT));
    }

    #[test]
    fn pending_request_shows_typing_indicator() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = create_test_app(temp_dir.path());

        app.input = "Hello".to_string();
        app.begin_turn().unwrap();
        assert!(rendered_text(&app).contains(TYPING_INDICATOR));

        app.finish_turn(ChatOutcome::Reply("Hi there".to_string()));
        let text = rendered_text(&app);
        assert!(!text.contains(TYPING_INDICATOR));
        assert!(text.contains("You: Hello"));
        assert!(text.contains("Hi there"));
    }

    #[test]
    fn placeholder_disappears_once_messages_exist() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = create_test_app(temp_dir.path());

        app.input = "Hello".to_string();
        app.begin_turn().unwrap();
        assert!(!rendered_text(&app).contains(EMPTY_STATE_TITLE));
    }

    #[test]
    fn multiline_replies_become_multiple_lines() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = create_test_app(temp_dir.path());

        app.input = "hi".to_string();
        app.begin_turn().unwrap();
        app.finish_turn(ChatOutcome::Reply("one\n\ntwo".to_string()));

        let text = rendered_text(&app);
        assert!(text.contains("one"));
        assert!(text.contains("two"));
    }

    #[test]
    fn scroll_offset_is_clamped_to_content() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = create_test_app(temp_dir.path());
        for i in 0..10 {
            app.push_message(crate::core::message::Message::user(format!("msg {i}")));
        }

        // 10 messages render as 20 lines (content + spacing).
        assert_eq!(calculate_max_scroll_offset(&app, 5), 15);
        assert_eq!(calculate_max_scroll_offset(&app, 100), 0);
    }

    #[test]
    fn cursor_follows_display_width_not_char_count() {
        assert_eq!(input_cursor_offset("hello", 40), 5);
        // Two fullwidth characters occupy four cells.
        assert_eq!(input_cursor_offset("你好", 40), 4);
        assert_eq!(input_cursor_offset("chào", 40), 4);
    }

    #[test]
    fn cursor_stays_inside_the_input_box() {
        let long_input = "x".repeat(100);
        assert_eq!(input_cursor_offset(&long_input, 20), 19);
        assert_eq!(input_cursor_offset(&long_input, 0), 0);
    }
}
