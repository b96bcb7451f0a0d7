use crate::api::models::{Genre, GenreId};

/// Most pages the UI will ever offer, whatever the upstream total.
pub const PAGE_CEILING: u32 = 500;

/// Which listing backs the grid when no genre filter is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Popular,
    RecentReleases,
}

/// Entries of the top navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuItem {
    #[default]
    Home,
    Popular,
    NewReleases,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [Self::Home, Self::Popular, Self::NewReleases];

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Popular => "Popular",
            Self::NewReleases => "New Releases",
        }
    }

    pub fn view_mode(self) -> ViewMode {
        match self {
            Self::NewReleases => ViewMode::RecentReleases,
            Self::Home | Self::Popular => ViewMode::Popular,
        }
    }
}

/// The one upstream listing the grid should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Genre { genre: GenreId, page: u32 },
    RecentReleases { page: u32 },
    Popular { page: u32 },
}

/// Filter and pagination state governing what is displayed.
#[derive(Debug, Clone)]
pub struct Session {
    pub current_page: u32,
    pub total_pages: u32,
    pub active_genre: Option<GenreId>,
    pub view_mode: ViewMode,
    pub menu: MenuItem,
    pub genres: Vec<Genre>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
            active_genre: None,
            view_mode: ViewMode::Popular,
            menu: MenuItem::Home,
            genres: Vec::new(),
        }
    }
}

impl Session {
    pub fn select_genre(&mut self, genre: Option<GenreId>) {
        self.active_genre = genre;
        self.current_page = 1;
    }

    pub fn select_menu(&mut self, item: MenuItem) {
        self.menu = item;
        self.view_mode = item.view_mode();
        self.active_genre = None;
        self.current_page = 1;
    }

    pub fn select_page(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    /// Record the upstream page count, capped at the display ceiling.
    pub fn set_total_pages(&mut self, upstream_total: u32) {
        self.total_pages = upstream_total.min(PAGE_CEILING);
    }

    /// Genre filter first, then recent releases, then popular.
    pub fn listing(&self) -> Listing {
        let page = self.current_page;
        if let Some(genre) = self.active_genre {
            Listing::Genre { genre, page }
        } else if self.view_mode == ViewMode::RecentReleases {
            Listing::RecentReleases { page }
        } else {
            Listing::Popular { page }
        }
    }

    pub fn genre_name(&self, id: GenreId) -> Option<&str> {
        self.genres
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.name.as_str())
    }

    /// Forget everything tied to the current credential.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_popular_page_one() {
        let session = Session::default();
        assert_eq!(session.listing(), Listing::Popular { page: 1 });
    }

    #[test]
    fn test_select_genre_resets_page() {
        let mut session = Session::default();
        session.select_page(7);
        session.select_genre(Some(28));
        assert_eq!(session.current_page, 1);
        assert_eq!(session.listing(), Listing::Genre { genre: 28, page: 1 });
    }

    #[test]
    fn test_genre_beats_recent_releases() {
        let mut session = Session::default();
        session.select_menu(MenuItem::NewReleases);
        session.select_page(4);
        session.select_genre(Some(35));

        // view mode is kept, but the genre listing wins
        assert_eq!(session.view_mode, ViewMode::RecentReleases);
        assert_eq!(session.listing(), Listing::Genre { genre: 35, page: 1 });

        session.select_genre(None);
        assert_eq!(session.listing(), Listing::RecentReleases { page: 1 });
    }

    #[test]
    fn test_select_menu_clears_genre() {
        let mut session = Session::default();
        session.select_genre(Some(12));
        session.select_page(3);
        session.select_menu(MenuItem::Popular);
        assert_eq!(session.active_genre, None);
        assert_eq!(session.current_page, 1);
        assert_eq!(session.listing(), Listing::Popular { page: 1 });

        session.select_menu(MenuItem::Home);
        assert_eq!(session.view_mode, ViewMode::Popular);
    }

    #[test]
    fn test_select_page_keeps_filters() {
        let mut session = Session::default();
        session.select_genre(Some(18));
        session.select_page(5);
        assert_eq!(session.listing(), Listing::Genre { genre: 18, page: 5 });
        session.select_page(0);
        assert_eq!(session.current_page, 1);
    }

    #[test]
    fn test_total_pages_capped_at_ceiling() {
        let mut session = Session::default();
        session.set_total_pages(38_012);
        assert_eq!(session.total_pages, PAGE_CEILING);
        session.set_total_pages(12);
        assert_eq!(session.total_pages, 12);
    }
}
