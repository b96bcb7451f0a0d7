use super::{pane_style, truncate_str};
use crate::app::{App, CARD_WIDTH, Pane};
use crate::view::grid::NO_RESULTS;
use crate::view::{GridView, MovieCard};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const CARD_HEIGHT: u16 = 5;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_style(app, Pane::Grid))
        .title(" Movies ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cards = match &app.grid {
        GridView::Blank => return,
        GridView::Empty => {
            let empty = Paragraph::new(NO_RESULTS)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(empty, inner);
            return;
        }
        GridView::Cards(cards) => cards,
    };

    let columns = app.grid_columns.max(1);
    let visible_rows = (inner.height / CARD_HEIGHT).max(1) as usize;
    let selected_row = app.grid_selected / columns;
    // keep the selected row on screen
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(inner);

    for (r, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(CARD_WIDTH); columns])
            .split(*row_area);
        for (c, card_area) in cols.iter().enumerate() {
            let index = (first_row + r) * columns + c;
            if let Some(card) = cards.get(index) {
                let selected = index == app.grid_selected && app.focus == Pane::Grid;
                render_card(card, selected, frame, *card_area);
            }
        }
    }
}

fn render_card(card: &MovieCard, selected: bool, frame: &mut Frame, area: Rect) {
    let width = area.width.saturating_sub(2) as usize;
    let border = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let lines = vec![
        Line::from(Span::styled(
            truncate_str(&card.title, width),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(card.year.as_str(), Style::default().fg(Color::DarkGray))),
        Line::from(vec![
            Span::styled("★ ", Style::default().fg(Color::Yellow)),
            Span::styled(card.rating.as_str(), Style::default().fg(Color::Yellow)),
        ]),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(widget, area);
}
