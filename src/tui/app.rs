// TUI application state
//
// Owns the slot list, the status banner, and the editing state (focused
// slot, cursor position). Key handlers mutate the state directly; async
// completions arrive as AppEvents and are committed in apply_event. All
// mutation happens here, on the UI loop.

use super::clipboard;
use super::theme::{Theme, ThemeKind};
use crate::config::Config;
use crate::events::AppEvent;
use crate::form::{SlotId, SlotList, StatusMessage};
use crate::logging::LogBuffer;
use crate::runner::{self, ShortenRunner};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Frames for the loading spinner, advanced on every UI tick
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Main application state for the TUI
pub struct App {
    /// The form's slot list
    pub slots: SlotList,

    /// The status banner (last-write-wins)
    pub status: StatusMessage,

    /// Index of the focused slot row
    pub focused: usize,

    /// Cursor position within the focused slot's input, in chars
    pub cursor: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// True while a batch shorten is in flight (blocks re-trigger)
    pub batch_in_flight: bool,

    /// Current theme
    pub theme: Theme,

    /// Log buffer for the system-log panel
    pub log_buffer: LogBuffer,

    /// When the app started (for uptime display)
    pub start_time: Instant,

    /// Animation frame for the loading spinner
    pub spinner_frame: usize,

    /// Spawns simulated shorten calls
    runner: ShortenRunner,

    /// Channel the copy-flash timer reports back on
    event_tx: mpsc::Sender<AppEvent>,

    /// How long the copied indicator stays on
    copy_flash: Duration,
}

impl App {
    pub fn new(config: &Config, log_buffer: LogBuffer, event_tx: mpsc::Sender<AppEvent>) -> Self {
        let runner = ShortenRunner::new(
            event_tx.clone(),
            config.short_origin.clone(),
            config.delay_range(),
        );
        Self {
            slots: SlotList::new(),
            status: StatusMessage::none(),
            focused: 0,
            cursor: 0,
            should_quit: false,
            batch_in_flight: false,
            theme: ThemeKind::from_name(&config.theme).theme(),
            log_buffer,
            start_time: Instant::now(),
            spinner_frame: 0,
            runner,
            event_tx,
            copy_flash: Duration::from_millis(config.copy_flash_ms),
        }
    }

    /// Advance the spinner animation (called on every tick)
    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
    }

    /// Id of the focused slot
    pub fn focused_id(&self) -> SlotId {
        self.slots.slots()[self.focused.min(self.slots.len() - 1)].id
    }

    fn focused_text(&self) -> &str {
        &self.slots.slots()[self.focused].original_url
    }

    fn focused_is_loading(&self) -> bool {
        self.slots.slots()[self.focused].is_loading
    }

    fn clamp_focus(&mut self) {
        if self.focused >= self.slots.len() {
            self.focused = self.slots.len() - 1;
        }
        self.cursor = self.focused_text().chars().count();
    }

    /// Move focus to the next slot, wrapping
    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.slots.len();
        self.cursor = self.focused_text().chars().count();
    }

    /// Move focus to the previous slot, wrapping
    pub fn focus_prev(&mut self) {
        self.focused = (self.focused + self.slots.len() - 1) % self.slots.len();
        self.cursor = self.focused_text().chars().count();
    }

    // ── Editing ──────────────────────────────────────────────────────────

    /// Insert a character at the cursor. Editing a slot always goes through
    /// `edit_slot`, so validity/result/copied state resets apply, and the
    /// status banner is cleared. Input is frozen while the slot is loading.
    pub fn insert_char(&mut self, c: char) {
        if self.focused_is_loading() {
            return;
        }
        let mut text = self.focused_text().to_string();
        let at = byte_index(&text, self.cursor);
        text.insert(at, c);
        self.commit_edit(text);
        self.cursor += 1;
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.focused_is_loading() || self.cursor == 0 {
            return;
        }
        let mut text = self.focused_text().to_string();
        let at = byte_index(&text, self.cursor - 1);
        text.remove(at);
        self.commit_edit(text);
        self.cursor -= 1;
    }

    /// Delete the character under the cursor
    pub fn delete(&mut self) {
        if self.focused_is_loading() {
            return;
        }
        let mut text = self.focused_text().to_string();
        if self.cursor >= text.chars().count() {
            return;
        }
        let at = byte_index(&text, self.cursor);
        text.remove(at);
        self.commit_edit(text);
    }

    fn commit_edit(&mut self, text: String) {
        let id = self.focused_id();
        self.slots.edit_slot(id, text);
        self.status = StatusMessage::none();
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let len = self.focused_text().chars().count();
        if self.cursor < len {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.focused_text().chars().count();
    }

    // ── Field list actions ───────────────────────────────────────────────

    pub fn add_field(&mut self) {
        self.status = self.slots.add_slot();
    }

    /// Remove the focused slot. Mirrors the original's conditional remove
    /// control: only offered while more than one slot exists.
    pub fn remove_field(&mut self) {
        if self.slots.len() <= 1 {
            return;
        }
        let id = self.focused_id();
        self.status = self.slots.remove_slot(id);
        self.clamp_focus();
    }

    pub fn clear_all(&mut self) {
        self.status = self.slots.reset_all();
        self.focused = 0;
        self.cursor = 0;
    }

    // ── Shorten operations ───────────────────────────────────────────────

    pub fn shorten_focused(&mut self) {
        let id = self.focused_id();
        self.status = self.runner.shorten_one(&mut self.slots, id);
    }

    pub fn shorten_all(&mut self) {
        if self.batch_in_flight || self.slots.any_loading() {
            return;
        }
        self.batch_in_flight = true;
        self.status = self.runner.shorten_all(&self.slots);
    }

    // ── Clipboard ────────────────────────────────────────────────────────

    /// Copy the focused slot's shortened URL. No-op when there is no
    /// result yet. On success the copied indicator is set and a reset is
    /// scheduled, keyed by the slot's generation so a later edit or removal
    /// supersedes it.
    pub fn copy_focused(&mut self) {
        let id = self.focused_id();
        let text = match self.slots.get(id) {
            Some(slot) if !slot.shortened_url.is_empty() => slot.shortened_url.clone(),
            _ => return,
        };

        match clipboard::copy_to_clipboard(&text) {
            Ok(()) => {
                if let Some(generation) = self.slots.set_copied(id) {
                    self.status = StatusMessage::success("Copied to clipboard!");
                    let tx = self.event_tx.clone();
                    let flash = self.copy_flash;
                    tokio::spawn(async move {
                        tokio::time::sleep(flash).await;
                        let _ = tx.send(AppEvent::CopyFlashExpired { id, generation }).await;
                    });
                }
            }
            Err(e) => {
                tracing::error!("failed to copy: {e:#}");
                self.status = StatusMessage::error("Failed to copy URL.");
            }
        }
    }

    // ── Async completions ────────────────────────────────────────────────

    /// Commit an operation completion delivered over the event channel
    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ShortenComplete { id, result } => {
                self.status = runner::apply_one(&mut self.slots, id, result);
            }
            AppEvent::BatchComplete {
                results,
                had_candidates,
            } => {
                self.batch_in_flight = false;
                self.status = runner::apply_batch(&mut self.slots, results, had_candidates);
            }
            AppEvent::CopyFlashExpired { id, generation } => {
                self.slots.clear_copied_if_current(id, generation);
            }
        }
    }

    /// Get uptime as a formatted string
    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    }
}

/// Byte offset of the `char_idx`-th character (end of string when past it)
fn byte_index(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Severity;

    fn app() -> App {
        let (tx, _rx) = mpsc::channel(16);
        App::new(&Config::default(), LogBuffer::new(), tx)
    }

    #[tokio::test]
    async fn typing_edits_the_focused_slot_and_clears_status() {
        let mut app = app();
        app.status = StatusMessage::info("something");
        for c in "https://a.com".chars() {
            app.insert_char(c);
        }
        assert_eq!(app.slots.slots()[0].original_url, "https://a.com");
        assert_eq!(app.cursor, 13);
        assert!(app.status.is_empty());
    }

    #[tokio::test]
    async fn editing_resets_result_and_validity() {
        let mut app = app();
        {
            let slot = app.slots.get_mut(0).unwrap();
            slot.shortened_url = "https://short.url/abc123".into();
            slot.is_valid = false;
            slot.is_copied = true;
        }
        app.cursor_end();
        app.insert_char('x');
        let slot = app.slots.get(0).unwrap();
        assert!(slot.shortened_url.is_empty());
        assert!(slot.is_valid);
        assert!(!slot.is_copied);
    }

    #[tokio::test]
    async fn backspace_respects_char_boundaries() {
        let mut app = app();
        for c in "http://日本".chars() {
            app.insert_char(c);
        }
        app.backspace();
        assert_eq!(app.slots.slots()[0].original_url, "http://日");
        app.cursor_home();
        app.delete();
        assert_eq!(app.slots.slots()[0].original_url, "ttp://日");
    }

    #[tokio::test]
    async fn focus_wraps_and_snaps_cursor_to_end() {
        let mut app = app();
        app.slots.edit_slot(1, "https://a.com");
        app.focus_next();
        assert_eq!(app.focused, 1);
        assert_eq!(app.cursor, 13);
        for _ in 0..4 {
            app.focus_next();
        }
        assert_eq!(app.focused, 0);
        app.focus_prev();
        assert_eq!(app.focused, 4);
    }

    #[tokio::test]
    async fn remove_field_keeps_focus_in_range() {
        let mut app = app();
        app.focused = 4;
        app.remove_field();
        assert_eq!(app.slots.len(), 5);
        assert!(app.focused < app.slots.len());
        assert_eq!(app.status.severity, Severity::Info);
    }

    #[tokio::test]
    async fn stale_copy_flash_event_is_ignored() {
        let mut app = app();
        let generation = app.slots.set_copied(2).unwrap();
        app.slots.edit_slot(2, "https://b.com");
        app.slots.set_copied(2);
        app.apply_event(AppEvent::CopyFlashExpired { id: 2, generation });
        assert!(app.slots.get(2).unwrap().is_copied);
    }

    #[tokio::test]
    async fn batch_completion_releases_the_in_flight_guard() {
        let mut app = app();
        app.slots.edit_slot(0, "https://a.com");
        app.shorten_all();
        assert!(app.batch_in_flight);
        // A second trigger while in flight is ignored
        app.shorten_all();
        app.apply_event(AppEvent::BatchComplete {
            results: vec![(0, Ok("https://short.url/abc123".into()))],
            had_candidates: true,
        });
        assert!(!app.batch_in_flight);
        assert_eq!(app.status.text, "All valid URLs processed!");
    }

    #[tokio::test]
    async fn shorten_focused_empty_slot_reports_error() {
        let mut app = app();
        app.shorten_focused();
        assert_eq!(app.status.severity, Severity::Error);
        assert_eq!(app.status.text, "URL field cannot be empty.");
        assert!(!app.slots.slots()[0].is_valid);
    }
}
