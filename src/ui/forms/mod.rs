//! Form rendering module
//!
//! - `field_renderer`: single field with its error line
//! - the form panel below: centered box that shifts sideways while shaking

mod field_renderer;

use crate::app::App;
use crate::state::{Form, View};
use crate::ui::layout::centered_rect;
use field_renderer::{draw_field, FIELD_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of the form panel
const PANEL_WIDTH: u16 = 52;

/// Draw the form of the current view
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(form) = app.state.form.as_form() else {
        return;
    };
    let hint = match app.state.current_view {
        View::Login => "Enter sign in · Ctrl+R register · Esc quit",
        View::Register => "Enter register · Esc back",
        _ => "Enter save · Esc back",
    };
    let offset = app.state.shake.as_ref().map(|s| s.offset()).unwrap_or(0);
    draw_panel(
        frame,
        area,
        app.state.current_view.title(),
        form,
        hint,
        offset,
    );
}

/// Draw a titled form panel, displaced horizontally by `offset` columns
fn draw_panel(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    form: &dyn Form,
    hint: &str,
    offset: i16,
) {
    let field_count = form.field_count() as u16;
    // fields + hint line + borders + margin
    let height = field_count * FIELD_HEIGHT + 1 + 2 + 2;
    let panel = shift(centered_rect(PANEL_WIDTH, height, area), offset, area);

    let border_color = if offset != 0 {
        Color::Red
    } else {
        Color::Cyan
    };
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(block, panel);

    let mut constraints: Vec<Constraint> = (0..field_count)
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(panel);

    for (index, field) in form.fields().into_iter().enumerate() {
        draw_field(frame, chunks[index], field, form.active_field() == index);
    }

    let help = Paragraph::new(Line::from(Span::styled(
        format!(" {hint}"),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(help, chunks[field_count as usize]);
}

/// Move `rect` sideways without leaving `bounds`
fn shift(rect: Rect, offset: i16, bounds: Rect) -> Rect {
    let min_x = bounds.x as i32;
    let max_x = (bounds.x + bounds.width.saturating_sub(rect.width)) as i32;
    let x = (rect.x as i32 + offset as i32).clamp(min_x, max_x.max(min_x));
    Rect { x: x as u16, ..rect }
}
