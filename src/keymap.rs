//! Key bindings: the single table from key presses to controller commands.

use crate::app::Command;
use crate::session::MenuItem;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which layer of the screen is receiving keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    Browse,
    Detail,
    Help,
}

pub fn command_for(context: KeyContext, key: KeyEvent) -> Option<Command> {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }

    match context {
        // any key closes help
        KeyContext::Help => Some(Command::ToggleHelp),
        KeyContext::Detail => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Command::CloseDetail),
            KeyCode::Up | KeyCode::Char('k') => Some(Command::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(Command::Down),
            KeyCode::Char('o') => Some(Command::OpenLink),
            KeyCode::Char('?') => Some(Command::ToggleHelp),
            _ => None,
        },
        KeyContext::Browse => match key.code {
            KeyCode::Char('q') => Some(Command::Quit),
            KeyCode::Char('?') => Some(Command::ToggleHelp),
            KeyCode::Tab => Some(Command::FocusNext),
            KeyCode::BackTab => Some(Command::FocusPrev),
            KeyCode::Left | KeyCode::Char('h') => Some(Command::Left),
            KeyCode::Right | KeyCode::Char('l') => Some(Command::Right),
            KeyCode::Up | KeyCode::Char('k') => Some(Command::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(Command::Down),
            KeyCode::Enter => Some(Command::Activate),
            KeyCode::PageDown | KeyCode::Char('n') => Some(Command::NextPage),
            KeyCode::PageUp | KeyCode::Char('p') => Some(Command::PrevPage),
            KeyCode::Char('1') => Some(Command::SelectMenu(MenuItem::Home)),
            KeyCode::Char('2') => Some(Command::SelectMenu(MenuItem::Popular)),
            KeyCode::Char('3') => Some(Command::SelectMenu(MenuItem::NewReleases)),
            KeyCode::Char('a') => Some(Command::SelectGenre(None)),
            KeyCode::Char('K') => Some(Command::ChangeApiKey),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for context in [KeyContext::Browse, KeyContext::Detail, KeyContext::Help] {
            assert_eq!(command_for(context, key), Some(Command::Quit));
        }
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(
            command_for(KeyContext::Browse, press(KeyCode::Char('3'))),
            Some(Command::SelectMenu(MenuItem::NewReleases))
        );
        assert_eq!(
            command_for(KeyContext::Browse, press(KeyCode::Char('1'))),
            Some(Command::SelectMenu(MenuItem::Home))
        );
    }

    #[test]
    fn test_detail_layer_captures_navigation() {
        assert_eq!(
            command_for(KeyContext::Detail, press(KeyCode::Esc)),
            Some(Command::CloseDetail)
        );
        assert_eq!(command_for(KeyContext::Detail, press(KeyCode::Char('n'))), None);
        assert_eq!(command_for(KeyContext::Detail, press(KeyCode::Char('q'))), Some(Command::CloseDetail));
    }

    #[test]
    fn test_help_closes_on_any_key() {
        assert_eq!(
            command_for(KeyContext::Help, press(KeyCode::Char('x'))),
            Some(Command::ToggleHelp)
        );
    }

    #[test]
    fn test_paging_keys() {
        assert_eq!(command_for(KeyContext::Browse, press(KeyCode::PageDown)), Some(Command::NextPage));
        assert_eq!(command_for(KeyContext::Browse, press(KeyCode::Char('p'))), Some(Command::PrevPage));
        assert_eq!(command_for(KeyContext::Browse, press(KeyCode::Esc)), None);
    }
}
