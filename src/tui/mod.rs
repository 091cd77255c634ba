// TUI module - Terminal User Interface
//
// Manages the terminal with ratatui: raw-mode setup and teardown, the
// event loop, key dispatch, and rendering. The loop is the single owner
// of all form state; spawned operations report back over the AppEvent
// channel and are committed here.

pub mod app;
pub mod clipboard;
pub mod theme;
pub mod ui;

use crate::config::Config;
use crate::events::AppEvent;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop until the user quits, and
/// restores the terminal even when the loop errors.
pub async fn run_tui(config: Config, log_buffer: LogBuffer) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Operation completions and copy-flash timers flow back over this channel
    let (event_tx, mut event_rx) = mpsc::channel(64);
    let mut app = App::new(&config, log_buffer, event_tx);

    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// tokio::select! waits on three sources at once: keyboard input,
/// a periodic tick that drives the loading spinner, and operation
/// completions from spawned tasks.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            // Periodic tick for spinner animation and redraws
            _ = tick_interval.tick() => {
                app.tick();
            }

            // Operation completions
            Some(event) = event_rx.recv() => {
                app.apply_event(event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
///
/// Control-chord actions first, then editing and navigation. Repeat events
/// are accepted for editing/navigation so held keys keep working.
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if !matches!(
        key_event.kind,
        KeyEventKind::Press | KeyEventKind::Repeat
    ) {
        return;
    }
    let pressed = key_event.kind == KeyEventKind::Press;

    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        if !pressed {
            return;
        }
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Char('c') => app.should_quit = true,
            KeyCode::Char('a') => app.shorten_all(),
            KeyCode::Char('n') => app.add_field(),
            KeyCode::Char('d') => app.remove_field(),
            KeyCode::Char('r') => app.clear_all(),
            KeyCode::Char('y') => app.copy_focused(),
            _ => {}
        }
        return;
    }

    match key_event.code {
        KeyCode::Esc => {
            if pressed {
                app.should_quit = true;
            }
        }
        KeyCode::Enter => {
            if pressed {
                app.shorten_focused();
            }
        }
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_prev(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Home => app.cursor_home(),
        KeyCode::End => app.cursor_end(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete(),
        KeyCode::Char(c) => app.insert_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app() -> App {
        let (tx, _rx) = mpsc::channel(16);
        App::new(&Config::default(), LogBuffer::new(), tx)
    }

    #[tokio::test]
    async fn esc_quits() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn typed_chars_reach_the_focused_slot() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Tab));
        for c in "https://a.com".chars() {
            handle_key_event(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(app.slots.slots()[1].original_url, "https://a.com");
    }

    #[tokio::test]
    async fn ctrl_chords_drive_field_actions() {
        let mut app = app();
        handle_key_event(&mut app, ctrl('d'));
        assert_eq!(app.status.text, "URL field removed.");
        assert_eq!(app.slots.len(), 5);

        handle_key_event(&mut app, ctrl('n'));
        assert_eq!(app.status.text, "Maximum 5 URL fields allowed.");

        handle_key_event(&mut app, ctrl('r'));
        assert_eq!(app.status.text, "All fields cleared.");
    }

    #[tokio::test]
    async fn release_events_are_ignored() {
        let mut app = app();
        let mut release = key(KeyCode::Char('x'));
        release.kind = KeyEventKind::Release;
        handle_key_event(&mut app, release);
        assert!(app.slots.slots()[0].original_url.is_empty());
    }
}
