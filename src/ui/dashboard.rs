//! Signed-in dashboard

use crate::app::App;
use crate::ui::layout::centered_rect;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(account) = &app.state.session else {
        return;
    };

    let label = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(Span::styled(
            format!("Welcome back, {}", account.username),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Email         ", label),
            Span::raw(account.email.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Phone         ", label),
            Span::raw(account.phone.as_deref().unwrap_or("-")),
        ]),
        Line::from(vec![
            Span::styled("Member since  ", label),
            Span::raw(account.created_at.format("%Y-%m-%d").to_string()),
        ]),
    ];

    let block = Block::default()
        .title(" Dashboard ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let panel = centered_rect(52, lines.len() as u16 + 4, area);
    frame.render_widget(Paragraph::new(lines).block(block), panel);
}
