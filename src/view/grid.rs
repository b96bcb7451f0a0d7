use crate::api::models::{MovieId, MovieSummary};
use crate::api::{ImageSize, image_url};
use chrono::{Datelike, NaiveDate};

pub const NO_RESULTS: &str = "No movies found";

#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    pub id: MovieId,
    pub title: String,
    pub year: String,
    pub rating: String,
    pub poster_url: String,
}

/// What the movie grid shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GridView {
    /// Nothing loaded (no key yet, or just cleared).
    #[default]
    Blank,
    /// A listing came back with no results.
    Empty,
    Cards(Vec<MovieCard>),
}

impl GridView {
    pub fn cards(&self) -> &[MovieCard] {
        match self {
            Self::Cards(cards) => cards,
            Self::Blank | Self::Empty => &[],
        }
    }
}

pub fn movie_grid(movies: &[MovieSummary], image_base_url: &str) -> GridView {
    if movies.is_empty() {
        return GridView::Empty;
    }
    GridView::Cards(
        movies
            .iter()
            .map(|m| movie_card(m, image_base_url))
            .collect(),
    )
}

pub fn movie_card(movie: &MovieSummary, image_base_url: &str) -> MovieCard {
    MovieCard {
        id: movie.id,
        title: movie.title.clone(),
        year: release_year(movie.release_date.as_deref()),
        rating: format_rating(movie.vote_average),
        poster_url: image_url(image_base_url, movie.poster_path.as_deref(), ImageSize::W500),
    }
}

/// Year of a `YYYY-MM-DD` date, or `N/A`.
pub fn release_year(date: Option<&str>) -> String {
    date.and_then(parse_date)
        .map(|d| d.year().to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

pub(crate) fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

pub fn format_rating(vote_average: f64) -> String {
    format!("{:.1}", vote_average)
}
