//! TMDB (The Movie Database) API client.
//!
//! Every call is a single best-effort GET: query-string authentication, a
//! fixed language parameter, typed decoding of the body. No retries.

pub mod models;

use crate::config::AppConfig;
use crate::error::ApiError;
use chrono::{Months, NaiveDate, Utc};
use models::{Genre, GenreId, GenreList, MovieDetail, MovieId, MoviePage};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Shown when a movie has no poster.
pub const PLACEHOLDER_IMAGE: &str = "assets/img/no-poster.png";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Poster size buckets served by the image host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    W92,
    W154,
    W185,
    W342,
    #[default]
    W500,
    W780,
    Original,
}

impl ImageSize {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::W92 => "w92",
            Self::W154 => "w154",
            Self::W185 => "w185",
            Self::W342 => "w342",
            Self::W500 => "w500",
            Self::W780 => "w780",
            Self::Original => "original",
        }
    }
}

/// Join an image path onto the image host, or fall back to the placeholder.
pub fn image_url(image_base_url: &str, path: Option<&str>, size: ImageSize) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{}/{}{}", image_base_url, size.as_str(), p),
        _ => PLACEHOLDER_IMAGE.to_string(),
    }
}

/// Trailing three-calendar-month window ending on `today`, both ends inclusive.
///
/// Day-of-month overflow clamps to the end of the earlier month
/// (2024-05-31 gives 2024-02-29).
pub fn release_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let from = today
        .checked_sub_months(Months::new(3))
        .unwrap_or(NaiveDate::MIN);
    (from, today)
}

/// Merge caller parameters over the defaults. Caller values win on a key
/// collision; new keys are appended in the order given.
fn merge_params(api_key: &str, language: &str, params: &[(&str, String)]) -> Vec<(String, String)> {
    let mut merged = vec![
        ("api_key".to_string(), api_key.to_string()),
        ("language".to_string(), language.to_string()),
    ];
    for (name, value) in params {
        match merged.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value.clone(),
            None => merged.push((name.to_string(), value.clone())),
        }
    }
    merged
}

/// Handle for the TMDB REST API. Cheap to clone; clones share one
/// connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    language: String,
    api_key: Option<String>,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_http(http, config))
    }

    pub fn with_http(http: reqwest::Client, config: &AppConfig) -> Self {
        Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            api_key: None,
        }
    }

    pub fn set_api_key(&mut self, key: Option<String>) {
        self.api_key = key.filter(|k| !k.is_empty());
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Authenticated GET of `path` decoded into `T`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let key = self.api_key.as_deref().ok_or(ApiError::MissingKey)?;
        let query = merge_params(key, &self.language, params);
        let url = format!("{}{}", self.base_url, path);

        log::debug!("GET {}", path);
        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                log::error!("Error fetching {}: {}", path, e);
                ApiError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error = ApiError::Request {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            };
            log::error!("Error fetching {}: {}", path, error);
            return Err(error);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            log::error!("Could not decode response of {}: {}", path, e);
            ApiError::from(e)
        })
    }

    /// Check a candidate key against `/configuration` without adopting it.
    pub async fn probe(&self, candidate: &str) -> Result<(), ApiError> {
        let url = format!("{}/configuration", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("api_key", candidate)])
            .send()
            .await?;

        if !response.status().is_success() {
            log::warn!("Key probe rejected with status {}", response.status());
            return Err(ApiError::InvalidKey);
        }
        Ok(())
    }

    pub async fn popular_movies(&self, page: u32) -> Result<MoviePage, ApiError> {
        self.fetch("/movie/popular", &[("page", page.to_string())]).await
    }

    pub async fn movies_by_genre(&self, genre: GenreId, page: u32) -> Result<MoviePage, ApiError> {
        self.fetch(
            "/discover/movie",
            &[("with_genres", genre.to_string()), ("page", page.to_string())],
        )
        .await
    }

    pub async fn new_releases(&self, page: u32) -> Result<MoviePage, ApiError> {
        self.new_releases_on(Utc::now().date_naive(), page).await
    }

    /// Movies first released in the three months up to `today`, newest first.
    pub async fn new_releases_on(&self, today: NaiveDate, page: u32) -> Result<MoviePage, ApiError> {
        let (from, to) = release_window(today);
        self.fetch(
            "/discover/movie",
            &[
                ("primary_release_date.gte", from.format(DATE_FORMAT).to_string()),
                ("primary_release_date.lte", to.format(DATE_FORMAT).to_string()),
                ("sort_by", "primary_release_date.desc".to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    pub async fn genres(&self) -> Result<Vec<Genre>, ApiError> {
        let list: GenreList = self.fetch("/genre/movie/list", &[]).await?;
        Ok(list.genres)
    }

    pub async fn movie_details(&self, id: MovieId) -> Result<MovieDetail, ApiError> {
        self.fetch(
            &format!("/movie/{}", id),
            &[("append_to_response", "credits,videos".to_string())],
        )
        .await
    }
}
