//! UI rendering modules

mod address;
mod counter;
mod events;
mod help;
mod layout;
mod statusbar;

use ratatui::prelude::*;

use crate::app::App;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let areas = layout::calculate_layout(frame.area());

    address::render(frame, app, areas.address);
    counter::render(frame, app, areas.counter);
    events::render(frame, app, areas.events);
    statusbar::render(frame, app, areas.statusbar);

    if app.show_help {
        help::render(frame);
    }
}
