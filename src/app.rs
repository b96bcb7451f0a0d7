use crate::api::ApiClient;
use crate::api::models::{Genre, GenreId, MovieDetail, MovieId, MoviePage};
use crate::config::AppConfig;
use crate::credentials::CredentialStore;
use crate::error::{ApiError, INVALID_KEY_MESSAGE};
use crate::session::{Listing, MenuItem, Session};
use crate::ui::key_overlay::ApiKeyOverlay;
use crate::view::genres::{ENTER_KEY_FOR_GENRES, LOADING_GENRES};
use crate::view::{self, DetailView, GenreBar, GridView, PaginationView};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

pub const LOAD_DATA_FAILED: &str =
    "An error occurred while loading data. Please check your API key or try again later.";
pub const LOAD_MOVIES_FAILED: &str =
    "An error occurred while loading movies. Please try again later.";
pub const KEY_SET: &str = "API key is set and valid!";

/// Terminal columns taken by one movie card, borders included.
pub const CARD_WIDTH: u16 = 28;

/// Results of background fetches, drained by the UI loop between frames.
#[derive(Debug)]
pub enum Message {
    GenresLoaded(Result<Vec<Genre>, ApiError>),
    MoviesLoaded {
        listing: Listing,
        result: Result<MoviePage, ApiError>,
    },
    DetailLoaded {
        id: MovieId,
        result: Result<MovieDetail, ApiError>,
    },
    KeyChecked {
        candidate: String,
        result: Result<(), ApiError>,
    },
}

/// Which part of the screen receives arrow keys and Enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Genres,
    Grid,
    Pagination,
}

impl Pane {
    pub fn next(self) -> Self {
        match self {
            Self::Genres => Self::Grid,
            Self::Grid => Self::Pagination,
            Self::Pagination => Self::Genres,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Genres => Self::Pagination,
            Self::Grid => Self::Genres,
            Self::Pagination => Self::Grid,
        }
    }
}

/// Every action the UI can request of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleHelp,
    FocusNext,
    FocusPrev,
    Left,
    Right,
    Up,
    Down,
    Activate,
    SelectMenu(MenuItem),
    SelectGenre(Option<GenreId>),
    GoToPage(u32),
    NextPage,
    PrevPage,
    OpenDetail(MovieId),
    CloseDetail,
    OpenLink,
    ChangeApiKey,
}

/// Transient error line at the top of the screen.
#[derive(Debug, Clone)]
pub struct Banner {
    pub message: String,
    shown_at: Instant,
}

/// Main application state.
pub struct App {
    pub config: AppConfig,
    pub client: ApiClient,
    pub credentials: CredentialStore,
    pub session: Session,

    tx: UnboundedSender<Message>,
    rx: UnboundedReceiver<Message>,

    pub should_quit: bool,
    pub show_help: bool,
    pub loading: bool,

    // View models
    pub grid: GridView,
    pub pagination: PaginationView,
    pub genre_bar: GenreBar,
    pub detail: Option<DetailView>,
    pub detail_scroll: u16,

    // Cursor state
    pub focus: Pane,
    pub genre_cursor: usize,
    pub grid_selected: usize,
    pub grid_columns: usize,
    pub page_cursor: usize,

    pub key_overlay: Option<ApiKeyOverlay>,
    pub banner: Option<Banner>,
    pub status_msg: String,
}

impl App {
    pub fn new(config: AppConfig, client: ApiClient, credentials: CredentialStore) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            config,
            client,
            credentials,
            session: Session::default(),
            tx,
            rx,
            should_quit: false,
            show_help: false,
            loading: false,
            grid: GridView::Blank,
            pagination: PaginationView::default(),
            genre_bar: GenreBar::default(),
            detail: None,
            detail_scroll: 0,
            focus: Pane::Grid,
            genre_cursor: 0,
            grid_selected: 0,
            grid_columns: 1,
            page_cursor: 0,
            key_overlay: None,
            banner: None,
            status_msg: String::new(),
        }
    }

    /// Use the stored key if there is one, otherwise ask for it.
    pub fn start(&mut self) {
        match self.credentials.load() {
            Some(key) => {
                self.client.set_api_key(Some(key));
                self.status_msg = KEY_SET.to_string();
                self.load_initial_data();
            }
            None => {
                self.key_overlay = Some(ApiKeyOverlay::new());
            }
        }
    }

    /// Update the number of card columns from the terminal width.
    pub fn update_layout(&mut self, terminal_width: u16) {
        self.grid_columns = (terminal_width.saturating_sub(2) / CARD_WIDTH).max(1) as usize;
    }

    // ── Command dispatch ──

    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::Quit => self.should_quit = true,
            Command::ToggleHelp => self.show_help = !self.show_help,
            Command::FocusNext => self.focus = self.focus.next(),
            Command::FocusPrev => self.focus = self.focus.prev(),
            Command::Left => self.move_cursor(-1),
            Command::Right => self.move_cursor(1),
            Command::Up => self.move_vertical(-1),
            Command::Down => self.move_vertical(1),
            Command::Activate => {
                if let Some(next) = self.activation() {
                    self.dispatch(next);
                }
            }
            Command::SelectMenu(item) => self.select_menu(item),
            Command::SelectGenre(genre) => self.select_genre(genre),
            Command::GoToPage(page) => self.go_to_page(page),
            Command::NextPage | Command::PrevPage => {
                let control = if command == Command::NextPage {
                    self.pagination.controls.last()
                } else {
                    self.pagination.controls.first()
                };
                if let Some(page) = control.and_then(|c| c.target()) {
                    self.go_to_page(page);
                }
            }
            Command::OpenDetail(id) => self.open_detail(id),
            Command::CloseDetail => {
                self.detail = None;
                self.detail_scroll = 0;
            }
            Command::OpenLink => self.open_link(),
            Command::ChangeApiKey => self.change_api_key(),
        }
    }

    /// What Enter means for the focused pane.
    fn activation(&self) -> Option<Command> {
        match self.focus {
            Pane::Genres => self
                .genre_bar
                .buttons()
                .get(self.genre_cursor)
                .map(|b| Command::SelectGenre(b.target)),
            Pane::Grid => self
                .grid
                .cards()
                .get(self.grid_selected)
                .map(|c| Command::OpenDetail(c.id)),
            Pane::Pagination => self
                .pagination
                .controls
                .get(self.page_cursor)
                .and_then(|c| c.target())
                .map(Command::GoToPage),
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let (cursor, len) = match self.focus {
            Pane::Genres => (&mut self.genre_cursor, self.genre_bar.buttons().len()),
            Pane::Grid => (&mut self.grid_selected, self.grid.cards().len()),
            Pane::Pagination => (&mut self.page_cursor, self.pagination.controls.len()),
        };
        *cursor = step(*cursor, delta, len);
    }

    fn move_vertical(&mut self, delta: isize) {
        if self.detail.is_some() {
            self.detail_scroll = if delta < 0 {
                self.detail_scroll.saturating_sub(1)
            } else {
                self.detail_scroll.saturating_add(1)
            };
            return;
        }
        if self.focus == Pane::Grid {
            let len = self.grid.cards().len();
            let target = self.grid_selected as isize + delta * self.grid_columns as isize;
            if target >= 0 && (target as usize) < len {
                self.grid_selected = target as usize;
            }
        }
    }

    // ── State transitions ──

    pub fn select_genre(&mut self, genre: Option<GenreId>) {
        self.session.select_genre(genre);
        self.refresh_genre_bar();
        self.load_movies();
    }

    pub fn select_menu(&mut self, item: MenuItem) {
        self.session.select_menu(item);
        self.refresh_genre_bar();
        self.load_movies();
    }

    pub fn go_to_page(&mut self, page: u32) {
        self.session.select_page(page);
        self.grid_selected = 0;
        self.load_movies();
    }

    fn refresh_genre_bar(&mut self) {
        self.genre_bar = view::genre_filters(&self.session.genres, self.session.active_genre);
        self.genre_cursor = self.genre_bar.active_index();
    }

    // ── Fetches ──

    fn load_initial_data(&mut self) {
        self.genre_bar = GenreBar::Message(LOADING_GENRES.to_string());
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.genres().await;
            let _ = tx.send(Message::GenresLoaded(result));
        });
    }

    /// Fetch the listing the session currently selects.
    fn load_movies(&mut self) {
        self.loading = true;
        let listing = self.session.listing();
        log::info!("Loading {:?}", listing);
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match listing {
                Listing::Genre { genre, page } => client.movies_by_genre(genre, page).await,
                Listing::RecentReleases { page } => client.new_releases(page).await,
                Listing::Popular { page } => client.popular_movies(page).await,
            };
            let _ = tx.send(Message::MoviesLoaded { listing, result });
        });
    }

    fn open_detail(&mut self, id: MovieId) {
        self.detail = Some(DetailView::Loading { id });
        self.detail_scroll = 0;
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.movie_details(id).await;
            let _ = tx.send(Message::DetailLoaded { id, result });
        });
    }

    /// Probe a key typed into the overlay; it is persisted only once accepted.
    pub fn submit_api_key(&mut self, candidate: String) {
        if let Some(overlay) = self.key_overlay.as_mut() {
            overlay.set_validating();
        }
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.probe(&candidate).await;
            let _ = tx.send(Message::KeyChecked { candidate, result });
        });
    }

    fn change_api_key(&mut self) {
        if let Err(e) = self.credentials.clear() {
            log::warn!("Could not remove stored API key: {}", e);
        }
        self.client.set_api_key(None);
        self.session.reset();
        self.grid = GridView::Blank;
        self.pagination = PaginationView::default();
        self.genre_bar = GenreBar::Message(ENTER_KEY_FOR_GENRES.to_string());
        self.detail = None;
        self.loading = false;
        self.grid_selected = 0;
        self.page_cursor = 0;
        self.status_msg.clear();
        self.key_overlay = Some(ApiKeyOverlay::new());
    }

    fn open_link(&mut self) {
        let Some(DetailView::Loaded(detail)) = &self.detail else {
            return;
        };
        let link = detail
            .trailer_url
            .clone()
            .unwrap_or_else(|| detail.poster_url.clone());
        match std::process::Command::new("xdg-open").arg(&link).spawn() {
            Ok(_) => self.status_msg = format!("Opening: {}", link),
            Err(_) => self.status_msg = format!("Link: {} (no browser available)", link),
        }
    }

    // ── Message handling ──

    /// Apply every message that has arrived so far.
    pub fn drain_messages(&mut self) {
        while let Ok(message) = self.rx.try_recv() {
            self.handle_message(message);
        }
    }

    #[cfg(test)]
    pub async fn next_message(&mut self) -> Option<Message> {
        self.rx.recv().await
    }

    pub fn handle_message(&mut self, message: Message) {
        match message {
            // results requested under a key that has since been cleared
            Message::GenresLoaded(_) | Message::MoviesLoaded { .. } if !self.client.has_api_key() => {}
            Message::GenresLoaded(Ok(genres)) => {
                self.session.genres = genres;
                self.refresh_genre_bar();
                self.load_movies();
            }
            Message::GenresLoaded(Err(e)) => {
                log::error!("Error loading genres: {}", e);
                if e.is_auth_failure() {
                    self.status_msg = e.user_message();
                }
                self.show_error(LOAD_DATA_FAILED);
            }
            Message::MoviesLoaded { listing, result } => {
                self.loading = false;
                match result {
                    Ok(page) => self.show_movies(page),
                    Err(e) => {
                        log::error!("Error loading movies for {:?}: {}", listing, e);
                        if e.is_auth_failure() {
                            self.status_msg = e.user_message();
                        }
                        self.show_error(LOAD_MOVIES_FAILED);
                    }
                }
            }
            Message::DetailLoaded { id, result } => {
                // a closed modal stays closed, and a reopened one keeps its movie
                if self.detail.as_ref().map(DetailView::id) != Some(id) {
                    return;
                }
                self.detail = Some(match result {
                    Ok(movie) => DetailView::Loaded(view::movie_detail(
                        &movie,
                        &self.config.image_base_url,
                    )),
                    Err(e) => {
                        log::error!("Error loading details of movie {}: {}", id, e);
                        DetailView::Failed {
                            id,
                            message: e.to_string(),
                        }
                    }
                });
            }
            Message::KeyChecked { candidate, result } => {
                if self.credentials.store_if_accepted(&candidate, &result) {
                    self.client.set_api_key(Some(candidate));
                    self.key_overlay = None;
                    self.status_msg = KEY_SET.to_string();
                    self.load_initial_data();
                } else if let Some(overlay) = self.key_overlay.as_mut() {
                    overlay.set_error(INVALID_KEY_MESSAGE.to_string());
                }
            }
        }
    }

    fn show_movies(&mut self, page: MoviePage) {
        self.session.set_total_pages(page.total_pages);
        self.grid = view::movie_grid(&page.results, &self.config.image_base_url);
        self.pagination = view::paginate(self.session.current_page, self.session.total_pages);
        self.page_cursor = self.pagination.active_index();
        self.grid_selected = self
            .grid_selected
            .min(self.grid.cards().len().saturating_sub(1));
        self.status_msg = format!(
            "{} results, page {} of {}",
            page.total_results, self.session.current_page, self.session.total_pages
        );
    }

    // ── Banner ──

    pub fn show_error(&mut self, message: &str) {
        self.banner = Some(Banner {
            message: message.to_string(),
            shown_at: Instant::now(),
        });
    }

    /// Drop the banner once it has been visible for `banner_secs`.
    pub fn tick(&mut self, now: Instant) {
        let ttl = Duration::from_secs(self.config.banner_secs);
        if self
            .banner
            .as_ref()
            .is_some_and(|b| now.duration_since(b.shown_at) >= ttl)
        {
            self.banner = None;
        }
    }
}

/// Move `cursor` by `delta` within `0..len`, stopping at the ends.
fn step(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    cursor.saturating_add_signed(delta).min(len - 1)
}
