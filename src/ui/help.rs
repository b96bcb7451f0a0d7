use super::key_overlay::centered_rect;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        format!("  {}", title),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn binding<'a>(keys: &'a str, action: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {:<12}", keys), Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ])
}

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(""),
        section("Global"),
        binding("?", "Toggle this help"),
        binding("q", "Quit application"),
        binding("K", "Change API key"),
        binding("1 2 3", "Home / Popular / New Releases"),
        Line::from(""),
        section("Browsing"),
        binding("Tab/S-Tab", "Cycle genres, movies and pages"),
        binding("←↑↓→ hjkl", "Move within the focused pane"),
        binding("Enter", "Pick genre, open movie or go to page"),
        binding("a", "Show all genres"),
        binding("n/PgDn", "Next page"),
        binding("p/PgUp", "Previous page"),
        Line::from(""),
        section("Movie Details"),
        binding("↑/k ↓/j", "Scroll"),
        binding("o", "Open trailer (or poster) in browser"),
        binding("Esc/q", "Close"),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help: Keybindings ")
                .title_bottom(
                    Line::from(" Press any key to close ").style(Style::default().fg(Color::DarkGray)),
                ),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
