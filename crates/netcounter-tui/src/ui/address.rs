//! Device address input

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;
use crate::config;

/// Render the address field
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let (border_style, title) = if app.editing {
        (config::focused_border_style(), " Device address (Enter to confirm) ")
    } else {
        (config::unfocused_border_style(), " Device address ")
    };

    let text = if app.address_input.is_empty() && !app.editing {
        Line::from(Span::styled(
            "press e to set an address",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(format!("http://{}", app.address_input))
    };

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(paragraph, area);

    if app.editing {
        // Cursor after the typed text, inside the border
        let typed = u16::try_from("http://".len() + app.address_input.chars().count())
            .unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(typed)
            .min(area.right().saturating_sub(2));
        frame.set_cursor_position((x, area.y + 1));
    }
}
