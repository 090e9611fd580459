use std::{error::Error, io, time::Duration};

use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{
            self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
            KeyModifiers, MouseEventKind,
        },
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::api::{send_chat_request, ChatOutcome};
use crate::commands::{process_input, CommandResult};
use crate::core::app::App;
use crate::ui::renderer::{calculate_max_scroll_offset, ui};
use crate::voice::VoiceEvent;

/// Sets up the terminal, runs the interactive session, and restores the
/// terminal whatever the outcome.
pub async fn run_chat_loop(mut app: App) -> Result<(), Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let (chat_tx, mut chat_rx) = mpsc::unbounded_channel::<ChatOutcome>();
    let (voice_tx, mut voice_rx) = mpsc::unbounded_channel::<VoiceEvent>();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let available_height = transcript_height(terminal.size().unwrap_or_default().height);

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }

                    // The clear prompt captures the keyboard until answered.
                    if app.pending_clear {
                        match key.code {
                            KeyCode::Char('y') | KeyCode::Char('Y') => app.resolve_clear(true),
                            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                                app.resolve_clear(false)
                            }
                            _ => {}
                        }
                        continue;
                    }

                    match key.code {
                        KeyCode::Enter => handle_submit(app, &chat_tx, &voice_tx),
                        KeyCode::Char(c) => app.input.push(c),
                        KeyCode::Backspace => {
                            app.input.pop();
                        }
                        KeyCode::Up => scroll_up(app, 1, available_height),
                        KeyCode::Down => scroll_down(app, 1, available_height),
                        KeyCode::PageUp => scroll_up(app, available_height, available_height),
                        KeyCode::PageDown => scroll_down(app, available_height, available_height),
                        _ => {}
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => scroll_up(app, 3, available_height),
                    MouseEventKind::ScrollDown => scroll_down(app, 3, available_height),
                    _ => {}
                },
                _ => {}
            }
        }

        while let Ok(outcome) = chat_rx.try_recv() {
            app.finish_turn(outcome);
        }
        while let Ok(voice_event) = voice_rx.try_recv() {
            app.on_voice_event(voice_event);
        }
    }
}

/// Routes one Enter press: slash commands run in place, chat text starts a
/// turn and hands the network call to a spawned task. The unbounded
/// channel brings the outcome back to the loop.
fn handle_submit(
    app: &mut App,
    chat_tx: &UnboundedSender<ChatOutcome>,
    voice_tx: &UnboundedSender<VoiceEvent>,
) {
    let submitted = app.input.clone();
    match process_input(app, &submitted, voice_tx) {
        CommandResult::Continue => app.input.clear(),
        CommandResult::ProcessAsMessage(_) => {
            if let Some(text) = app.begin_turn() {
                let client = app.client.clone();
                let server_url = app.server_url.clone();
                let tx = chat_tx.clone();
                tokio::spawn(async move {
                    let outcome = send_chat_request(&client, &server_url, &text).await;
                    let _ = tx.send(outcome);
                });
            }
        }
    }
}

/// Lines of transcript visible below the title row and above the input
/// and status rows.
fn transcript_height(terminal_height: u16) -> u16 {
    terminal_height.saturating_sub(3).saturating_sub(1).saturating_sub(1)
}

fn scroll_up(app: &mut App, amount: u16, available_height: u16) {
    let max_offset = calculate_max_scroll_offset(app, available_height);
    if app.auto_scroll {
        app.scroll_offset = max_offset;
    }
    app.auto_scroll = false;
    app.scroll_offset = app.scroll_offset.saturating_sub(amount);
}

fn scroll_down(app: &mut App, amount: u16, available_height: u16) {
    let max_offset = calculate_max_scroll_offset(app, available_height);
    app.scroll_offset = app.scroll_offset.saturating_add(amount).min(max_offset);
    if app.scroll_offset >= max_offset {
        app.auto_scroll = true;
    }
}
