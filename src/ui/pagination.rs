use super::pane_style;
use crate::app::{App, Pane};
use crate::view::PageControl;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_style(app, Pane::Pagination));

    let focused = app.focus == Pane::Pagination && app.detail.is_none();
    let mut spans = Vec::new();
    for (i, control) in app.pagination.controls.iter().enumerate() {
        let mut style = match control {
            PageControl::Page { active: true, .. } => Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            PageControl::Ellipsis => Style::default().fg(Color::DarkGray),
            c if !c.is_enabled() => Style::default().fg(Color::DarkGray),
            _ => Style::default().fg(Color::White),
        };
        if focused && i == app.page_cursor {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        spans.push(Span::styled(format!(" {} ", control.label()), style));
    }

    let bar = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(bar, area);
}
