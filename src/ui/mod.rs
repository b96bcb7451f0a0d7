mod detail;
mod filters;
mod grid;
mod help;
pub mod key_overlay;
mod pagination;

use crate::app::{App, Pane};
use crate::session::MenuItem;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: header(3) + genres(packed rows) + grid(min) + pagination(3) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(filters::height(app, area.width)),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(app, frame, chunks[0]);
    filters::render(app, frame, chunks[1]);
    grid::render(app, frame, chunks[2]);
    pagination::render(app, frame, chunks[3]);
    render_status(app, frame, chunks[4]);

    if let Some(ref detail) = app.detail {
        detail::render(detail, app.detail_scroll, frame);
    }
    if let Some(ref overlay) = app.key_overlay {
        overlay.render(frame);
    }
    if app.show_help {
        help::render(frame);
    }
    if let Some(ref banner) = app.banner {
        render_banner(&banner.message, frame);
    }
}

/// Border style for a pane, highlighted when it has focus.
fn pane_style(app: &App, pane: Pane) -> Style {
    if app.focus == pane && app.detail.is_none() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled(
        " TMDB Explorer   ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    for (i, item) in MenuItem::ALL.iter().enumerate() {
        let style = if *item == app.session.menu {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("{} ", i + 1), Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(item.label(), style));
        spans.push(Span::raw("   "));
    }
    if let Some(name) = app.session.active_genre.and_then(|g| app.session.genre_name(g)) {
        spans.push(Span::styled(
            format!("[genre: {}]", name),
            Style::default().fg(Color::Magenta),
        ));
    }
    if !app.client.has_api_key() {
        spans.push(Span::styled("  [no API key]", Style::default().fg(Color::Red)));
    }
    if app.loading {
        spans.push(Span::styled("  Loading…", Style::default().fg(Color::Yellow)));
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(header, area);
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let status_line = Line::from(vec![
        Span::styled(" Tab", key),
        Span::raw(" Pane  "),
        Span::styled("←↑↓→", key),
        Span::raw(" Move  "),
        Span::styled("Enter", key),
        Span::raw(" Select  "),
        Span::styled("n/p", key),
        Span::raw(" Page  "),
        Span::styled("1-3", key),
        Span::raw(" Menu  "),
        Span::styled("?", key),
        Span::raw(" Help  "),
        Span::styled("q", key),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), area);
}

fn render_banner(message: &str, frame: &mut Frame) {
    let area = frame.area();
    if area.height < 4 || area.width < 6 {
        return;
    }
    let width = (message.chars().count() as u16 + 4).min(area.width);
    let rect = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + 1,
        width,
        height: 3.min(area.height),
    };
    frame.render_widget(Clear, rect);
    let banner = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).bg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White).bg(Color::Red)),
        );
    frame.render_widget(banner, rect);
}

/// Truncate a string to `max_width` columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if unicode_width::UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        width += w;
        result.push(c);
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Alien", 10), "Alien");
        assert_eq!(truncate_str("The Lord of the Rings", 8), "The Lor…");
        assert_eq!(truncate_str("千と千尋の神隠し", 5), "千と…");
    }
}
