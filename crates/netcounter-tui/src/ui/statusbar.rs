//! Status bar widget

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let activity = if app.busy() {
        ("◐ Busy", Color::Yellow)
    } else {
        ("● Ready", Color::Green)
    };

    let keybindings = if app.editing {
        "[Enter] Confirm  [Ctrl-U] Clear  [Esc] Done"
    } else {
        "[r] Refresh  [+] Increment  [-] Decrement  [e] Address  [?] Help  [q] Quit"
    };

    let status_line = Line::from(vec![
        Span::styled(activity.0, Style::default().fg(activity.1)),
        Span::raw("  │  "),
        Span::styled(keybindings, Style::default().fg(Color::DarkGray)),
    ]);

    let paragraph = Paragraph::new(status_line);
    frame.render_widget(paragraph, area);
}
