//! Layout components (content area, status bar)

use crate::app::App;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into content and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Rect of at most `width` x `height`, centered in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draw the status bar: flash message if any, otherwise key help
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status_message {
        Some(message) => Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Green),
        )),
        None => {
            let help = if app.state.form.is_active_field_secret() {
                " Tab/Shift+Tab move · Ctrl+T show/hide password · Ctrl+C quit"
            } else if app.state.current_view.is_form_view() {
                " Tab/Shift+Tab move · Enter submit · Ctrl+C quit"
            } else if matches!(app.state.current_view, View::Dashboard) {
                " p profile · l log out · q quit"
            } else {
                ""
            };
            Line::from(Span::styled(help, Style::default().fg(Color::DarkGray)))
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_centers() {
        let rect = centered_rect(20, 10, Rect::new(0, 0, 80, 24));
        assert_eq!(rect, Rect::new(30, 7, 20, 10));
    }

    #[test]
    fn test_centered_rect_shrinks_to_area() {
        let area = Rect::new(5, 5, 10, 4);
        assert_eq!(centered_rect(20, 10, area), area);
    }

    #[test]
    fn test_create_layout_reserves_status_line() {
        let (content, status) = create_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(content.height, 23);
        assert_eq!(status, Rect::new(0, 23, 80, 1));
    }
}
