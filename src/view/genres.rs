use crate::api::models::{Genre, GenreId};

pub const LOADING_GENRES: &str = "Loading genres...";
pub const ENTER_KEY_FOR_GENRES: &str = "Enter your API key to load genres";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreButton {
    pub label: String,
    /// `None` is the "All" button.
    pub target: Option<GenreId>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreBar {
    Message(String),
    Buttons(Vec<GenreButton>),
}

impl Default for GenreBar {
    fn default() -> Self {
        Self::Message(ENTER_KEY_FOR_GENRES.to_string())
    }
}

impl GenreBar {
    pub fn buttons(&self) -> &[GenreButton] {
        match self {
            Self::Buttons(buttons) => buttons,
            Self::Message(_) => &[],
        }
    }

    pub fn active_index(&self) -> usize {
        self.buttons().iter().position(|b| b.active).unwrap_or(0)
    }
}

/// "All" followed by one button per genre, with the active one marked.
pub fn genre_filters(genres: &[Genre], active: Option<GenreId>) -> GenreBar {
    let mut buttons = Vec::with_capacity(genres.len() + 1);
    buttons.push(GenreButton {
        label: "All".to_string(),
        target: None,
        active: active.is_none(),
    });
    buttons.extend(genres.iter().map(|g| GenreButton {
        label: g.name.clone(),
        target: Some(g.id),
        active: active == Some(g.id),
    }));
    GenreBar::Buttons(buttons)
}
