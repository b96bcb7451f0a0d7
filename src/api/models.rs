use serde::Deserialize;

pub type MovieId = u64;
pub type GenreId = u32;

/// One page of a movie listing (`/movie/popular`, `/discover/movie`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoviePage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<MovieSummary>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// Full record from `/movie/{id}?append_to_response=credits,videos`.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetail {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub credits: Option<Credits>,
    #[serde(default)]
    pub videos: Option<Videos>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Option<Vec<CastMember>>,
    #[serde(default)]
    pub crew: Option<Vec<CrewMember>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrewMember {
    pub name: String,
    #[serde(default)]
    pub job: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Videos {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_page_tolerates_nulls_and_missing_fields() {
        let json = r#"{
            "page": 1,
            "results": [
                { "id": 7, "title": "Heat", "poster_path": null, "vote_average": 8.25 },
                { "id": 8, "title": "Ronin", "release_date": "1998-09-25" }
            ],
            "total_pages": 42
        }"#;
        let page: MoviePage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages, 42);
        assert_eq!(page.total_results, 0);
        assert_eq!(page.results[0].poster_path, None);
        assert_eq!(page.results[1].vote_average, 0.0);
        assert_eq!(page.results[1].release_date.as_deref(), Some("1998-09-25"));
    }

    #[test]
    fn test_detail_keeps_missing_credits_distinct_from_empty() {
        let without: MovieDetail = serde_json::from_str(r#"{ "id": 1, "title": "A" }"#).unwrap();
        assert!(without.credits.is_none());

        let with: MovieDetail = serde_json::from_str(
            r#"{ "id": 1, "title": "A", "credits": { "cast": [], "crew": [{ "name": "X", "job": "Director" }] },
                 "videos": { "results": [{ "key": "abc", "site": "YouTube", "type": "Trailer" }] } }"#,
        )
        .unwrap();
        let credits = with.credits.unwrap();
        assert_eq!(credits.cast.unwrap().len(), 0);
        assert_eq!(credits.crew.unwrap()[0].job, "Director");
        assert_eq!(with.videos.unwrap().results[0].kind, "Trailer");
    }
}
