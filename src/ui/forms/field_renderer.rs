//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field: bordered input plus the error line
pub const FIELD_HEIGHT: u16 = 4;

/// Draw a form field with its error indicator underneath
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let border_style = if field.has_error() {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let value_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    let cursor = if is_active { "▌" } else { "" };

    let title = match field.visibility {
        Some(visibility) => format!(" {} [Ctrl+T {}] ", field.label, visibility.icon()),
        None => format!(" {} ", field.label),
    };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(field.display_value(), value_style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.block(block), chunks[0]);

    if field.has_error() {
        let error = Paragraph::new(Line::from(Span::styled(
            format!(" {}", field.error.message),
            Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        )));
        frame.render_widget(error, chunks[1]);
    }
}
