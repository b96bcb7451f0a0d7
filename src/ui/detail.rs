use super::key_overlay::centered_rect;
use crate::view::detail::{DETAILS_FAILED, LOADING_DETAILS};
use crate::view::{DetailView, MovieDetailView};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Movie details modal drawn over the browse screen.
pub fn render(detail: &DetailView, scroll: u16, frame: &mut Frame) {
    let area = centered_rect(80, 80, frame.area());
    frame.render_widget(Clear, area);

    let (title, lines) = match detail {
        DetailView::Loading { .. } => (
            " Movie Details ".to_string(),
            vec![Line::from(""), Line::from(LOADING_DETAILS)],
        ),
        DetailView::Failed { message, .. } => (
            " Movie Details ".to_string(),
            vec![
                Line::from(""),
                Line::from(Span::styled(DETAILS_FAILED, Style::default().fg(Color::Red))),
                Line::from(Span::styled(
                    format!("Error: {}", message),
                    Style::default().fg(Color::DarkGray),
                )),
            ],
        ),
        DetailView::Loaded(movie) => (format!(" {} ", movie.title), detail_lines(movie)),
    };

    let alignment = match detail {
        DetailView::Loaded(_) => Alignment::Left,
        _ => Alignment::Center,
    };

    let modal = Paragraph::new(lines)
        .alignment(alignment)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(Span::styled(
                    title,
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ))
                .title_bottom(
                    Line::from(" Esc close  ↑↓ scroll  o open link ")
                        .style(Style::default().fg(Color::DarkGray)),
                ),
        );
    frame.render_widget(modal, area);
}

fn field<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {:<10}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn detail_lines(movie: &MovieDetailView) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(" ★ ", Style::default().fg(Color::Yellow)),
            Span::styled(
                movie.rating.as_str(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]),
        field("Released", &movie.release_date),
        field("Runtime", &movie.runtime),
    ];

    let mut genres = vec![Span::styled(
        format!(" {:<10}", "Genres"),
        Style::default().fg(Color::DarkGray),
    )];
    for name in &movie.genres {
        genres.push(Span::styled(
            format!("[{}]", name),
            Style::default().fg(Color::Magenta),
        ));
        genres.push(Span::raw(" "));
    }
    lines.push(Line::from(genres));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Overview",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(format!(" {}", movie.overview)));
    lines.push(Line::from(""));
    lines.push(field("Director", &movie.directors));
    lines.push(field("Cast", &movie.cast));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!(" {:<10}", "Poster"), Style::default().fg(Color::DarkGray)),
        Span::styled(
            movie.poster_url.as_str(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
        ),
    ]));
    if let Some(trailer) = &movie.trailer_url {
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<10}", "Trailer"), Style::default().fg(Color::DarkGray)),
            Span::styled(
                trailer.as_str(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    }
    lines
}
