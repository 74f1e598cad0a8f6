//! TUI styling

use netcounter_client::Status;
use ratatui::style::{Color, Modifier, Style};

/// Status colors
pub fn status_color(status: &Status) -> Color {
    match status {
        Status::Idle => Color::DarkGray,
        Status::Fetching | Status::Incrementing | Status::Decrementing => Color::Yellow,
        Status::Updated | Status::Incremented | Status::Decremented => Color::Green,
        Status::Error(_) => Color::Red,
    }
}

/// Status symbol
pub fn status_symbol(status: &Status, tick: u64) -> &'static str {
    match status {
        Status::Idle => "○",
        Status::Fetching | Status::Incrementing | Status::Decrementing => match tick % 4 {
            0 => "◐",
            1 => "◓",
            2 => "◑",
            _ => "◒",
        },
        Status::Updated | Status::Incremented | Status::Decremented => "●",
        Status::Error(_) => "✗",
    }
}

/// Counter value style
pub fn value_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Style for a value that is not a number
pub fn suspect_value_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Border style for focused panel
pub fn focused_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Border style for unfocused panel
pub fn unfocused_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}
