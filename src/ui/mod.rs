//! UI module for rendering the TUI

mod dashboard;
mod dialog;
mod forms;
mod layout;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    // Draw main content based on current view
    match app.state.current_view {
        View::Login | View::Register | View::Profile => forms::draw(frame, main_area, app),
        View::Dashboard => dashboard::draw(frame, main_area, app),
    }

    // Draw status bar
    layout::draw_status_bar(frame, status_area, app);

    // Error dialog on top of everything
    if let Some(message) = app.state.current_error() {
        dialog::render_error_dialog(frame, message);
    }
}
