// Theme system for the TUI
//
// Small fixed palette table selected by name from config. Each theme
// defines colors for the form chrome plus one color per banner severity.

use crate::form::Severity;
use ratatui::style::Color;

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    /// Inherit the terminal's own palette
    Terminal,
}

impl ThemeKind {
    /// Resolve a config string to a theme, defaulting to Dark
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "light" => ThemeKind::Light,
            "terminal" => ThemeKind::Terminal,
            _ => ThemeKind::Dark,
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
            ThemeKind::Terminal => Theme::terminal(),
        }
    }
}

/// Complete theme definition
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub title: Color,
    pub border: Color,
    pub border_focused: Color,
    pub border_invalid: Color,
    pub placeholder: Color,
    pub result: Color,
    pub copied: Color,
    pub spinner: Color,
    pub hint: Color,

    // Banner severity colors
    pub success: Color,
    pub error: Color,
    pub info: Color,
    pub warning: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(24, 24, 32),
            fg: Color::Rgb(220, 220, 225),
            title: Color::Rgb(170, 130, 255),
            border: Color::Rgb(90, 90, 110),
            border_focused: Color::Rgb(170, 130, 255),
            border_invalid: Color::Rgb(235, 80, 80),
            placeholder: Color::Rgb(110, 110, 125),
            result: Color::Rgb(140, 190, 255),
            copied: Color::Rgb(120, 220, 120),
            spinner: Color::Rgb(170, 130, 255),
            hint: Color::Rgb(130, 130, 145),
            success: Color::Rgb(120, 220, 120),
            error: Color::Rgb(235, 80, 80),
            info: Color::Rgb(120, 170, 255),
            warning: Color::Rgb(235, 190, 80),
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(248, 248, 250),
            fg: Color::Rgb(40, 40, 48),
            title: Color::Rgb(110, 60, 200),
            border: Color::Rgb(170, 170, 185),
            border_focused: Color::Rgb(110, 60, 200),
            border_invalid: Color::Rgb(200, 40, 40),
            placeholder: Color::Rgb(150, 150, 160),
            result: Color::Rgb(30, 90, 190),
            copied: Color::Rgb(30, 140, 60),
            spinner: Color::Rgb(110, 60, 200),
            hint: Color::Rgb(120, 120, 130),
            success: Color::Rgb(30, 140, 60),
            error: Color::Rgb(200, 40, 40),
            info: Color::Rgb(30, 90, 190),
            warning: Color::Rgb(180, 130, 20),
        }
    }

    pub fn terminal() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::Reset,
            title: Color::Magenta,
            border: Color::DarkGray,
            border_focused: Color::Magenta,
            border_invalid: Color::Red,
            placeholder: Color::DarkGray,
            result: Color::Cyan,
            copied: Color::Green,
            spinner: Color::Magenta,
            hint: Color::DarkGray,
            success: Color::Green,
            error: Color::Red,
            info: Color::Blue,
            warning: Color::Yellow,
        }
    }

    /// Banner color for a severity; `None` severity renders nothing anyway
    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Success => self.success,
            Severity::Error => self.error,
            Severity::Info => self.info,
            Severity::Warning => self.warning,
            Severity::None => self.fg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_falls_back_to_dark() {
        assert_eq!(ThemeKind::from_name("nope"), ThemeKind::Dark);
        assert_eq!(ThemeKind::from_name("LIGHT"), ThemeKind::Light);
        assert_eq!(ThemeKind::from_name("terminal"), ThemeKind::Terminal);
    }
}
