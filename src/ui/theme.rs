//! Colour palette and text styles used across the console UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── listing table ──────────────────────────────────────────
    pub fn dir_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn file_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn index_style() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn kind_style() -> Style {
        Style::default().fg(Color::Magenta)
    }

    pub fn meta_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn header_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn prompt_style() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    // ── messages ───────────────────────────────────────────────
    pub fn success_style() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn warning_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn error_style() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn progress_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }
}
