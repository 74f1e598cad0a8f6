//! Layout calculations for the TUI

use ratatui::prelude::*;

/// Layout areas for the UI
pub struct LayoutAreas {
    pub address: Rect,
    pub counter: Rect,
    pub events: Rect,
    pub statusbar: Rect,
}

/// Calculate layout areas based on terminal size
pub fn calculate_layout(area: Rect) -> LayoutAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Address input
            Constraint::Min(7),    // Counter + events
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    // Counter (left) + event log (right)
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(vertical[1]);

    LayoutAreas {
        address: vertical[0],
        counter: horizontal[0],
        events: horizontal[1],
        statusbar: vertical[2],
    }
}
