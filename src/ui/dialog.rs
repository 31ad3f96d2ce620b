//! Modal error dialog

use crate::ui::layout::centered_rect;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Maximum width of the dialog
const MAX_WIDTH: u16 = 60;

/// Render an error dialog overlay centered on the screen
pub fn render_error_dialog(frame: &mut Frame, message: &str) {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let content = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("Enter", key),
            Span::raw(" or "),
            Span::styled("Esc", key),
            Span::raw(" to dismiss"),
        ]),
    ];

    // Rough line count after wrapping inside borders and padding
    let inner_width = (MAX_WIDTH - 4) as usize;
    let message_lines = message.chars().count().div_ceil(inner_width).max(1) as u16;
    let area = centered_rect(MAX_WIDTH, message_lines + 4, frame.area());

    let dialog = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(
                    " Error ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .style(Style::default().bg(Color::Black)),
        );

    // Clear the area behind the dialog
    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}
