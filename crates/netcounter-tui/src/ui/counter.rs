//! Counter value panel

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::config;

/// Render the counter value and the status of the last operation
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let state = &app.state;
    let status = &state.status;

    let value_line = match &state.value {
        Some(value) => match value.parse() {
            Ok(number) => Line::styled(number.to_string(), config::value_style()),
            // Show what the device sent rather than hiding it
            Err(_) => Line::styled(format!("{:?}", value.as_str()), config::suspect_value_style()),
        },
        None => Line::styled("--", Style::default().fg(Color::DarkGray)),
    };

    let mut lines = vec![Line::default(), value_line.centered(), Line::default()];

    if let Some(Err(e)) = state.value.as_ref().map(|v| v.parse()) {
        lines.push(Line::styled(e.to_string(), Style::default().fg(Color::Yellow)).centered());
    }

    let symbol = config::status_symbol(status, app.tick);
    lines.push(
        Line::styled(
            format!("{symbol} {status}"),
            Style::default().fg(config::status_color(status)),
        )
        .centered(),
    );

    if let Some(at) = state.last_updated {
        let at = at.with_timezone(&chrono::Local).format("%H:%M:%S");
        lines.push(
            Line::styled(
                format!("last read {at}"),
                Style::default().fg(Color::DarkGray),
            )
            .centered(),
        );
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Counter ")
                .borders(Borders::ALL)
                .border_style(config::unfocused_border_style()),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
