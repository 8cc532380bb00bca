use serde::{Deserialize, Serialize, Serializer};
use std::fmt::Display;

/// Fallback poster shown when TMDb has no poster for a movie
pub const NO_POSTER_URL: &str = "https://via.placeholder.com/300x450?text=No+Poster+Available";

/// Fallback poster shown when the metadata fetch itself failed
pub const FETCH_ERROR_POSTER_URL: &str =
    "https://via.placeholder.com/300x450?text=Error+Fetching+Poster";

/// A catalog entry. The position of a movie in the catalog sequence is its
/// row/column index in the similarity matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// TMDb movie identifier
    pub id: u32,
    pub title: String,
}

/// A 0-10 audience rating, or the N/A sentinel when TMDb has none
/// (or the fetch failed).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    Score(f64),
    Unavailable,
}

impl From<Option<f64>> for Rating {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(score) => Rating::Score(score),
            None => Rating::Unavailable,
        }
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Score(score) => write!(f, "{}", score),
            Rating::Unavailable => write!(f, "N/A"),
        }
    }
}

// Serialized as a JSON number, or the literal string "N/A" when absent,
// mirroring what TMDb-backed clients expect to render.
impl Serialize for Rating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Rating::Score(score) => serializer.serialize_f64(*score),
            Rating::Unavailable => serializer.serialize_str("N/A"),
        }
    }
}

/// Poster and rating for a single movie, as produced by a metadata provider.
///
/// By contract this is always available: provider failures degrade to
/// placeholder values instead of erroring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetails {
    pub poster_url: String,
    pub rating: Rating,
}

impl MovieDetails {
    /// Details substituted when the metadata fetch failed entirely
    pub fn fetch_failed() -> Self {
        Self {
            poster_url: FETCH_ERROR_POSTER_URL.to_string(),
            rating: Rating::Unavailable,
        }
    }
}

/// The currently selected movie, decorated with its metadata
#[derive(Debug, Clone, Serialize)]
pub struct SelectedMovie {
    pub title: String,
    pub rating: Rating,
    pub poster_url: String,
    pub detail_url: String,
}

/// One recommendation entry: title, rating, poster, and a link to the
/// movie's TMDb detail page. Cards are ordered by descending similarity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationCard {
    pub title: String,
    pub rating: Rating,
    pub poster_url: String,
    pub detail_url: String,
}

// ============================================================================
// TMDb API Types
// ============================================================================

/// Raw movie details response from GET /movie/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

/// Canonical TMDb detail-page link for a movie
pub fn detail_url(movie_id: u32) -> String {
    format!("https://www.themoviedb.org/movie/{}", movie_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_display() {
        assert_eq!(format!("{}", Rating::Score(7.8)), "7.8");
        assert_eq!(format!("{}", Rating::Unavailable), "N/A");
    }

    #[test]
    fn test_rating_serializes_score_as_number() {
        let json = serde_json::to_string(&Rating::Score(8.4)).unwrap();
        assert_eq!(json, "8.4");
    }

    #[test]
    fn test_rating_serializes_sentinel_as_string() {
        let json = serde_json::to_string(&Rating::Unavailable).unwrap();
        assert_eq!(json, r#""N/A""#);
    }

    #[test]
    fn test_rating_from_option() {
        assert_eq!(Rating::from(Some(6.1)), Rating::Score(6.1));
        assert_eq!(Rating::from(None), Rating::Unavailable);
    }

    #[test]
    fn test_tmdb_movie_deserialization() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "poster_path": "/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg",
            "vote_average": 8.4
        }"#;

        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        assert_eq!(
            movie.poster_path,
            Some("/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg".to_string())
        );
        assert_eq!(movie.vote_average, Some(8.4));
    }

    #[test]
    fn test_tmdb_movie_deserialization_null_poster() {
        let json = r#"{ "id": 27205, "poster_path": null, "vote_average": 6.0 }"#;

        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.poster_path, None);
        assert_eq!(movie.vote_average, Some(6.0));
    }

    #[test]
    fn test_tmdb_movie_deserialization_missing_fields() {
        let movie: TmdbMovie = serde_json::from_str(r#"{ "id": 27205 }"#).unwrap();
        assert_eq!(movie.poster_path, None);
        assert_eq!(movie.vote_average, None);
    }

    #[test]
    fn test_detail_url() {
        assert_eq!(detail_url(27205), "https://www.themoviedb.org/movie/27205");
    }
}
