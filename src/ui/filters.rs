use super::pane_style;
use crate::app::{App, Pane};
use crate::view::GenreBar;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

/// Most button rows the pane grows to before it scrolls.
const MAX_ROWS: usize = 3;

/// Button indices per line when packed left to right into `width` columns.
fn pack_rows(bar: &GenreBar, width: u16) -> Vec<Vec<usize>> {
    let width = width as usize;
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut used = 0;
    for (i, button) in bar.buttons().iter().enumerate() {
        let cell = button.label.width() + 2;
        match rows.last_mut() {
            Some(row) if used + 1 + cell <= width => {
                row.push(i);
                used += 1 + cell;
            }
            _ => {
                rows.push(vec![i]);
                used = cell;
            }
        }
    }
    rows
}

/// Height of the genre pane, borders included, for a terminal `width` wide.
pub fn height(app: &App, width: u16) -> u16 {
    let rows = pack_rows(&app.genre_bar, width.saturating_sub(2)).len();
    rows.clamp(1, MAX_ROWS) as u16 + 2
}

/// Genre filter bar: one button per genre, scrolled to the row holding the
/// cursor.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_style(app, Pane::Genres))
        .title(" Genres ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let buttons = match &app.genre_bar {
        GenreBar::Message(message) => {
            let text = Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(Color::DarkGray),
            ));
            frame.render_widget(text, inner);
            return;
        }
        GenreBar::Buttons(buttons) => buttons,
    };

    let focused = app.focus == Pane::Genres && app.detail.is_none();
    let rows = pack_rows(&app.genre_bar, inner.width);
    let visible = (inner.height as usize).max(1);
    let cursor = if focused {
        app.genre_cursor
    } else {
        app.genre_bar.active_index()
    };
    let cursor_row = rows.iter().position(|r| r.contains(&cursor)).unwrap_or(0);
    let first_row = cursor_row.saturating_sub(visible - 1);

    let lines: Vec<Line> = rows
        .iter()
        .skip(first_row)
        .take(visible)
        .map(|row| {
            let mut spans = Vec::with_capacity(row.len() * 2);
            for (n, &i) in row.iter().enumerate() {
                let button = &buttons[i];
                let mut style = if button.active {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Magenta)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                if focused && i == app.genre_cursor {
                    style = style.add_modifier(Modifier::UNDERLINED | Modifier::REVERSED);
                }
                if n > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.push(Span::styled(format!(" {} ", button.label), style));
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::api::models::Genre;
    use crate::config::AppConfig;
    use crate::credentials::{CredentialStore, MemoryKeyStorage};
    use crate::view::genre_filters;
    use ratatui::{Terminal, backend::TestBackend};

    const TMDB_GENRES: [&str; 19] = [
        "Action", "Adventure", "Animation", "Comedy", "Crime", "Documentary", "Drama",
        "Family", "Fantasy", "History", "Horror", "Music", "Mystery", "Romance",
        "Science Fiction", "TV Movie", "Thriller", "War", "Western",
    ];

    fn app_with_genres() -> App {
        let config = AppConfig::default();
        let client = ApiClient::with_http(reqwest::Client::new(), &config);
        let store = CredentialStore::new(Box::new(MemoryKeyStorage::default()));
        let mut app = App::new(config, client, store);
        app.session.genres = TMDB_GENRES
            .iter()
            .enumerate()
            .map(|(i, name)| Genre {
                id: i as u32 + 1,
                name: name.to_string(),
            })
            .collect();
        app.genre_bar = genre_filters(&app.session.genres, None);
        app
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_every_genre_visible_at_80_columns() {
        let mut app = app_with_genres();
        app.focus = Pane::Genres;
        app.genre_cursor = 19;

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| crate::ui::render(&app, frame)).unwrap();
        let text = screen(&terminal);

        for name in TMDB_GENRES {
            assert!(text.contains(name), "{} not drawn", name);
        }
    }

    #[test]
    fn test_narrow_bar_scrolls_to_cursor() {
        let mut app = app_with_genres();
        app.focus = Pane::Genres;
        app.genre_cursor = 19;

        let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();
        terminal
            .draw(|frame| render(&app, frame, frame.area()))
            .unwrap();
        let text = screen(&terminal);
        assert!(text.contains("Western"));
        assert!(!text.contains("Action"));
    }

    #[test]
    fn test_height_follows_packed_rows() {
        let app = app_with_genres();
        assert_eq!(pack_rows(&app.genre_bar, 78).len(), 3);
        assert_eq!(height(&app, 80), 5);
        assert_eq!(height(&app, 30), 2 + MAX_ROWS as u16);

        let mut empty = app_with_genres();
        empty.genre_bar = GenreBar::default();
        assert_eq!(height(&empty, 80), 3);
    }
}
