//! Movie models: the TMDB wire shape and the normalized display card.

use serde::{Deserialize, Serialize};

/// Placeholder used when a release year cannot be derived
pub const UNKNOWN_YEAR: &str = "N/A";

/// One candidate movie as returned by the TMDB search endpoint
///
/// `id` and `title` are required; a result missing either (or carrying the
/// wrong JSON type for any field) fails deserialization of the whole body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbMovie {
    pub id: i64,

    pub title: String,

    #[serde(default)]
    pub release_date: Option<String>,

    #[serde(default)]
    pub vote_average: Option<f64>,

    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Successful body of `GET /search/movie`
#[derive(Debug, Deserialize)]
pub struct TmdbSearchResponse {
    pub results: Vec<TmdbMovie>,
}

/// Error body TMDB sends alongside non-2xx statuses
#[derive(Debug, Deserialize)]
pub struct TmdbErrorBody {
    #[serde(default)]
    pub status_message: Option<String>,
}

/// A display-ready movie record consumed by the widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieCard {
    /// TMDB movie identifier
    pub id: i64,

    /// Movie title
    pub title: String,

    /// Four-digit release year, or `"N/A"`
    pub release_year: String,

    /// Average vote rounded to one decimal place
    pub rating: f64,

    /// Absolute poster URL, serialized as `null` when absent
    pub poster_url: Option<String>,
}

impl MovieCard {
    /// Normalize a raw TMDB result using the given image CDN base
    pub fn from_tmdb(movie: &TmdbMovie, image_base_url: &str) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            release_year: release_year(movie.release_date.as_deref()),
            rating: round_rating(movie.vote_average.unwrap_or(0.0)),
            poster_url: movie
                .poster_path
                .as_deref()
                .map(|path| poster_url(image_base_url, path)),
        }
    }
}

/// Extract the year segment of a `YYYY-MM-DD` date
///
/// Anything before the first `-` is taken verbatim, so a bare `"2020"` is kept.
pub fn release_year(release_date: Option<&str>) -> String {
    match release_date.and_then(|date| date.split('-').next()) {
        Some(year) if !year.is_empty() => year.to_string(),
        _ => UNKNOWN_YEAR.to_string(),
    }
}

/// Round a rating to one decimal place
pub fn round_rating(rating: f64) -> f64 {
    (rating * 10.0).round() / 10.0
}

/// Join the image CDN base with a TMDB poster path
pub fn poster_url(image_base_url: &str, poster_path: &str) -> String {
    format!("{}{}", image_base_url, poster_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

    fn movie(release_date: Option<&str>, vote: Option<f64>, poster: Option<&str>) -> TmdbMovie {
        TmdbMovie {
            id: 603,
            title: "The Matrix".to_string(),
            release_date: release_date.map(String::from),
            vote_average: vote,
            poster_path: poster.map(String::from),
        }
    }

    #[test]
    fn test_release_year() {
        assert_eq!(release_year(Some("1999-03-31")), "1999");
        assert_eq!(release_year(Some("2020")), "2020");
        assert_eq!(release_year(Some("")), "N/A");
        assert_eq!(release_year(Some("-05-01")), "N/A");
        assert_eq!(release_year(None), "N/A");
    }

    #[test]
    fn test_round_rating() {
        assert_eq!(round_rating(7.666), 7.7);
        assert_eq!(round_rating(8.04), 8.0);
        assert_eq!(round_rating(0.0), 0.0);
        assert_eq!(round_rating(10.0), 10.0);
    }

    #[test]
    fn test_card_from_complete_result() {
        let card = MovieCard::from_tmdb(
            &movie(Some("1999-03-31"), Some(8.217), Some("/abc.jpg")),
            IMAGE_BASE,
        );

        assert_eq!(card.id, 603);
        assert_eq!(card.title, "The Matrix");
        assert_eq!(card.release_year, "1999");
        assert_eq!(card.rating, 8.2);
        assert_eq!(
            card.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
    }

    #[test]
    fn test_card_from_sparse_result() {
        let card = MovieCard::from_tmdb(&movie(None, None, None), IMAGE_BASE);

        assert_eq!(card.release_year, "N/A");
        assert_eq!(card.rating, 0.0);
        assert!(card.poster_url.is_none());
    }

    #[test]
    fn test_card_serializes_camel_case_with_null_poster() {
        let card = MovieCard::from_tmdb(&movie(Some("2020"), Some(6.0), None), IMAGE_BASE);
        let json = serde_json::to_value(&card).unwrap();

        assert_eq!(json["releaseYear"], "2020");
        assert_eq!(json["rating"], 6.0);
        assert!(json["posterUrl"].is_null());
        assert!(json.get("release_year").is_none());
    }

    #[test]
    fn test_tmdb_movie_accepts_nulls() {
        let json = r#"{"id": 1, "title": "Untitled", "release_date": null, "vote_average": null, "poster_path": null}"#;
        let movie: TmdbMovie = serde_json::from_str(json).unwrap();

        assert_eq!(movie.id, 1);
        assert!(movie.release_date.is_none());
        assert!(movie.vote_average.is_none());
        assert!(movie.poster_path.is_none());
    }

    #[test]
    fn test_tmdb_movie_rejects_missing_title() {
        let json = r#"{"id": 1, "release_date": "2001-01-01"}"#;
        assert!(serde_json::from_str::<TmdbMovie>(json).is_err());
    }

    #[test]
    fn test_tmdb_movie_rejects_wrong_types() {
        let json = r#"{"id": "one", "title": "Untitled"}"#;
        assert!(serde_json::from_str::<TmdbMovie>(json).is_err());

        let json = r#"{"id": 1, "title": "Untitled", "vote_average": "high"}"#;
        assert!(serde_json::from_str::<TmdbMovie>(json).is_err());
    }

    #[test]
    fn test_search_response_requires_results() {
        assert!(serde_json::from_str::<TmdbSearchResponse>(r#"{"page": 1}"#).is_err());

        let parsed: TmdbSearchResponse =
            serde_json::from_str(r#"{"page": 1, "results": [], "total_results": 0}"#).unwrap();
        assert!(parsed.results.is_empty());
    }
}
