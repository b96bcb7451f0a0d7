use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

pub const EMPTY_KEY: &str = "Please enter an API key";
pub const VALIDATING: &str = "Validating...";

/// Result of API key input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInputResult {
    /// User submitted a non-empty key
    Submit(String),
    /// User cancelled the input
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Status {
    Validating,
    Error(String),
}

/// API key entry overlay, shown until a key has been validated
pub struct ApiKeyOverlay {
    /// Current input buffer
    input: String,

    status: Option<Status>,
}

impl ApiKeyOverlay {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            status: None,
        }
    }

    /// Handle keyboard input. Typing is ignored while a probe is in flight.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<KeyInputResult> {
        if key.code == KeyCode::Esc {
            return Some(KeyInputResult::Cancel);
        }
        if self.is_validating() {
            return None;
        }
        match key.code {
            KeyCode::Enter => {
                let candidate = self.input.trim();
                if candidate.is_empty() {
                    self.set_error(EMPTY_KEY.to_string());
                    None
                } else {
                    Some(KeyInputResult::Submit(candidate.to_string()))
                }
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            _ => None,
        }
    }

    pub fn set_validating(&mut self) {
        self.status = Some(Status::Validating);
    }

    /// Show an error; the typed key is kept for correction.
    pub fn set_error(&mut self, message: String) {
        self.status = Some(Status::Error(message));
    }

    pub fn is_validating(&self) -> bool {
        self.status == Some(Status::Validating)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            Some(Status::Error(message)) => Some(message),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = centered_rect(60, 40, frame.area());

        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" TMDB API Key ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(1),
            ])
            .split(inner);

        let prompt = Paragraph::new(
            "Enter your API key from themoviedb.org (Settings → API) to browse the catalog.",
        )
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
        frame.render_widget(prompt, chunks[0]);

        let field = Paragraph::new(self.input.as_str())
            .style(Style::default().fg(Color::Cyan))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(field, chunks[2]);

        if !self.is_validating() {
            let cursor_x = chunks[2].x + 1 + unicode_width::UnicodeWidthStr::width(self.input.as_str()) as u16;
            frame.set_cursor_position((cursor_x.min(chunks[2].right().saturating_sub(2)), chunks[2].y + 1));
        }

        let status = match &self.status {
            Some(Status::Error(message)) => {
                Paragraph::new(message.as_str()).style(Style::default().fg(Color::Red))
            }
            Some(Status::Validating) => {
                Paragraph::new(VALIDATING).style(Style::default().fg(Color::Yellow))
            }
            None => Paragraph::new("Enter: Save Key | Esc: Quit")
                .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(status.alignment(Alignment::Center), chunks[3]);
    }
}

impl Default for ApiKeyOverlay {
    fn default() -> Self {
        Self::new()
    }
}

/// Calculate a centered rectangle for an overlay
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_overlay_creation() {
        let overlay = ApiKeyOverlay::new();
        assert!(overlay.input.is_empty());
        assert!(overlay.error().is_none());
        assert!(!overlay.is_validating());
    }

    #[test]
    fn test_key_overlay_char_input_and_backspace() {
        let mut overlay = ApiKeyOverlay::new();
        assert!(overlay.handle_key(key(KeyCode::Char('a'))).is_none());
        assert!(overlay.handle_key(key(KeyCode::Char('b'))).is_none());
        assert!(overlay.handle_key(key(KeyCode::Backspace)).is_none());
        assert_eq!(overlay.input, "a");
    }

    #[test]
    fn test_key_overlay_submit_trims() {
        let mut overlay = ApiKeyOverlay::new();
        overlay.input = "  abc123 ".to_string();
        assert_eq!(
            overlay.handle_key(key(KeyCode::Enter)),
            Some(KeyInputResult::Submit("abc123".to_string()))
        );
    }

    #[test]
    fn test_key_overlay_empty_submit_sets_error() {
        let mut overlay = ApiKeyOverlay::new();
        overlay.input = "   ".to_string();
        assert!(overlay.handle_key(key(KeyCode::Enter)).is_none());
        assert_eq!(overlay.error(), Some(EMPTY_KEY));
    }

    #[test]
    fn test_key_overlay_ignores_typing_while_validating() {
        let mut overlay = ApiKeyOverlay::new();
        overlay.input = "abc".to_string();
        overlay.set_validating();
        assert!(overlay.handle_key(key(KeyCode::Char('d'))).is_none());
        assert!(overlay.handle_key(key(KeyCode::Enter)).is_none());
        assert_eq!(overlay.input, "abc");
        assert_eq!(overlay.handle_key(key(KeyCode::Esc)), Some(KeyInputResult::Cancel));
    }

    #[test]
    fn test_key_overlay_error_keeps_input() {
        let mut overlay = ApiKeyOverlay::new();
        overlay.input = "wrongkey".to_string();
        overlay.set_validating();
        overlay.set_error("Invalid API key. Please check and try again.".to_string());
        assert!(!overlay.is_validating());
        assert_eq!(overlay.input, "wrongkey");
        assert!(overlay.error().unwrap().starts_with("Invalid API key"));
    }
}
