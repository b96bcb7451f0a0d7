use super::grid::{format_rating, parse_date};
use crate::api::models::{MovieDetail, MovieId};
use crate::api::{ImageSize, image_url};

pub const LOADING_DETAILS: &str = "Loading movie details...";
pub const DETAILS_FAILED: &str = "An error occurred while loading movie details.";

const CAST_LIMIT: usize = 5;

/// State of the details modal.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Loading { id: MovieId },
    Loaded(MovieDetailView),
    Failed { id: MovieId, message: String },
}

impl DetailView {
    pub fn id(&self) -> MovieId {
        match self {
            Self::Loading { id } | Self::Failed { id, .. } => *id,
            Self::Loaded(view) => view.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetailView {
    pub id: MovieId,
    pub title: String,
    pub rating: String,
    pub release_date: String,
    pub runtime: String,
    pub genres: Vec<String>,
    pub overview: String,
    pub directors: String,
    pub cast: String,
    pub poster_url: String,
    pub trailer_url: Option<String>,
}

pub fn movie_detail(movie: &MovieDetail, image_base_url: &str) -> MovieDetailView {
    let cast = match movie.credits.as_ref().and_then(|c| c.cast.as_ref()) {
        Some(cast) => cast
            .iter()
            .take(CAST_LIMIT)
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        None => "Unknown cast".to_string(),
    };

    let directors = match movie.credits.as_ref().and_then(|c| c.crew.as_ref()) {
        Some(crew) => crew
            .iter()
            .filter(|c| c.job == "Director")
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        None => "Unknown director".to_string(),
    };

    let overview = movie
        .overview
        .as_deref()
        .filter(|o| !o.is_empty())
        .unwrap_or("No description available.")
        .to_string();

    MovieDetailView {
        id: movie.id,
        title: movie.title.clone(),
        rating: format_rating(movie.vote_average),
        release_date: format_release_date(movie.release_date.as_deref()),
        runtime: format_runtime(movie.runtime),
        genres: movie.genres.iter().map(|g| g.name.clone()).collect(),
        overview,
        directors,
        cast,
        poster_url: image_url(image_base_url, movie.poster_path.as_deref(), ImageSize::W500),
        trailer_url: trailer_url(movie),
    }
}

/// US-style `M/D/YYYY`, or `Unknown date`.
pub fn format_release_date(date: Option<&str>) -> String {
    date.and_then(parse_date)
        .map(|d| d.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| "Unknown date".to_string())
}

/// `{h}h {m}min`; a missing or zero runtime is unknown.
pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) if m > 0 => format!("{}h {}min", m / 60, m % 60),
        _ => "Unknown duration".to_string(),
    }
}

fn trailer_url(movie: &MovieDetail) -> Option<String> {
    movie
        .videos
        .as_ref()?
        .results
        .iter()
        .find(|v| v.site == "YouTube" && v.kind == "Trailer")
        .map(|v| format!("https://www.youtube.com/watch?v={}", v.key))
}
