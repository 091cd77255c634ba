// UI rendering logic
//
// All rendering for the form lives here. The layout is fixed: title bar,
// status banner, one bordered row per URL slot, a system-log panel fed by
// the tracing buffer, and a key-hint footer. Called on every frame.

use super::app::{App, SPINNER_FRAMES};
use crate::form::UrlSlot;
use crate::logging::LogLevel;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Height of one slot row: borders plus input line plus feedback line
const SLOT_ROW_HEIGHT: u16 = 4;

/// Placeholder shown in empty input fields
const PLACEHOLDER: &str = "Enter your long URL here (e.g., https://example.com/very/long/path)";

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    f.render_widget(
        Block::default().style(Style::default().bg(theme.bg).fg(theme.fg)),
        f.area(),
    );

    let slot_count = app.slots.len() as u16;
    let mut constraints = vec![
        Constraint::Length(3), // Title bar
        Constraint::Length(1), // Status banner
    ];
    constraints.extend((0..slot_count).map(|_| Constraint::Length(SLOT_ROW_HEIGHT)));
    constraints.push(Constraint::Min(3)); // System logs
    constraints.push(Constraint::Length(1)); // Key hints

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    render_title(f, chunks[0], app);
    render_banner(f, chunks[1], app);
    for (i, slot) in app.slots.slots().iter().enumerate() {
        render_slot(f, chunks[2 + i], app, slot, i);
    }
    render_logs(f, chunks[2 + slot_count as usize], app);
    render_hints(f, chunks[chunks.len() - 1], app);
}

fn render_title(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "🔗 URL Shortener",
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ·  up {}", app.uptime()),
            Style::default().fg(theme.hint),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    f.render_widget(title, area);
}

/// The status banner: one centered, severity-colored line. Blank when no
/// message is active.
fn render_banner(f: &mut Frame, area: Rect, app: &App) {
    if app.status.is_empty() {
        return;
    }
    let theme = &app.theme;
    let style = Style::default()
        .fg(theme.severity_color(app.status.severity))
        .add_modifier(Modifier::BOLD);
    let banner = Paragraph::new(Span::styled(app.status.text.clone(), style))
        .alignment(Alignment::Center);
    f.render_widget(banner, area);
}

fn render_slot(f: &mut Frame, area: Rect, app: &App, slot: &UrlSlot, index: usize) {
    let theme = &app.theme;
    let focused = index == app.focused;

    let border_color = if !slot.is_valid {
        theme.border_invalid
    } else if focused {
        theme.border_focused
    } else {
        theme.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" URL {} ", index + 1));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 {
        return;
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    render_input_line(f, rows[0], app, slot, focused);
    if rows.len() > 1 {
        render_feedback_line(f, rows[1], app, slot);
    }
}

/// The editable input line, with a cursor when focused and horizontal
/// scrolling when the text outgrows the row.
fn render_input_line(f: &mut Frame, area: Rect, app: &App, slot: &UrlSlot, focused: bool) {
    let theme = &app.theme;

    if slot.original_url.is_empty() && !focused {
        let placeholder =
            Paragraph::new(Span::styled(PLACEHOLDER, Style::default().fg(theme.placeholder)));
        f.render_widget(placeholder, area);
        return;
    }

    let line = if focused {
        let (before, under, after) = split_at_cursor(&slot.original_url, app.cursor);
        Line::from(vec![
            Span::styled(before.to_string(), Style::default().fg(theme.fg)),
            Span::styled(
                under.to_string(),
                Style::default().add_modifier(Modifier::REVERSED),
            ),
            Span::styled(after.to_string(), Style::default().fg(theme.fg)),
        ])
    } else {
        Line::from(Span::styled(
            slot.original_url.clone(),
            Style::default().fg(theme.fg),
        ))
    };

    // Keep the cursor in view: scroll right once the prefix outgrows the row
    let scroll_x = if focused {
        let (before, _, _) = split_at_cursor(&slot.original_url, app.cursor);
        (before.width() as u16).saturating_sub(area.width.saturating_sub(1))
    } else {
        0
    };

    f.render_widget(Paragraph::new(line).scroll((0, scroll_x)), area);
}

/// The second line of a slot row: spinner, validity hint, or result
fn render_feedback_line(f: &mut Frame, area: Rect, app: &App, slot: &UrlSlot) {
    let theme = &app.theme;

    let line = if slot.is_loading {
        Line::from(vec![
            Span::styled(
                SPINNER_FRAMES[app.spinner_frame],
                Style::default().fg(theme.spinner),
            ),
            Span::styled(" shortening...", Style::default().fg(theme.hint)),
        ])
    } else if !slot.is_valid {
        Line::from(Span::styled(
            "Please enter a valid URL.",
            Style::default().fg(theme.error),
        ))
    } else if !slot.shortened_url.is_empty() {
        let mut spans = vec![
            Span::styled("→ ", Style::default().fg(theme.hint)),
            Span::styled(
                slot.shortened_url.clone(),
                Style::default()
                    .fg(theme.result)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if slot.is_copied {
            spans.push(Span::styled(
                "  ✓ Copied",
                Style::default().fg(theme.copied),
            ));
        } else {
            spans.push(Span::styled(
                "  (Ctrl+Y to copy)",
                Style::default().fg(theme.hint),
            ));
        }
        Line::from(spans)
    } else {
        Line::default()
    };

    f.render_widget(Paragraph::new(line), area);
}

fn render_logs(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Logs ");
    let inner_height = area.height.saturating_sub(2) as usize;
    let entries = app.log_buffer.tail(inner_height);

    let lines: Vec<Line> = entries
        .iter()
        .map(|entry| {
            let level_color = match entry.level {
                LogLevel::Error => theme.error,
                LogLevel::Warn => theme.warning,
                LogLevel::Info => theme.info,
                LogLevel::Debug | LogLevel::Trace => theme.hint,
            };
            Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(theme.hint),
                ),
                Span::styled(
                    format!("{:5} ", entry.level.as_str()),
                    Style::default().fg(level_color),
                ),
                Span::styled(entry.message.clone(), Style::default().fg(theme.fg)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_hints(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let hints = " Enter shorten │ Ctrl+A shorten all │ Ctrl+N add │ Ctrl+D remove │ \
                 Ctrl+R clear │ Ctrl+Y copy │ Tab/↑↓ move │ Esc quit";
    f.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(theme.hint))),
        area,
    );
}

/// Split `text` around the `cursor`-th character. The middle part is the
/// character under the cursor, or a space when the cursor sits at the end.
fn split_at_cursor(text: &str, cursor: usize) -> (&str, &str, &str) {
    let mut indices = text.char_indices().skip(cursor);
    match indices.next() {
        Some((start, c)) => {
            let end = start + c.len_utf8();
            (&text[..start], &text[start..end], &text[end..])
        }
        None => (text, " ", ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_at_cursor_handles_ascii_and_wide_chars() {
        assert_eq!(split_at_cursor("abc", 1), ("a", "b", "c"));
        assert_eq!(split_at_cursor("abc", 3), ("abc", " ", ""));
        assert_eq!(split_at_cursor("", 0), ("", " ", ""));
        assert_eq!(split_at_cursor("日本語", 1), ("日", "本", "語"));
    }
}
