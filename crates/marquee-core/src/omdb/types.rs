//! Wire types for the OMDB-compatible movie API.
//!
//! The API uses PascalCase field names and reports failure in-band with a
//! `Response: "False"` flag instead of an HTTP error status. Missing values
//! arrive as the literal string `"N/A"`; posters are the one place where we
//! normalize that into `Option` at the deserialization boundary, because the
//! UI substitutes a bundled fallback image.

use serde::{Deserialize, Deserializer, Serialize};

/// Maps the `"N/A"` poster sentinel to `None`.
fn de_poster<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|poster| poster != "N/A" && !poster.is_empty()))
}

/// A single search hit. Also serialized verbatim into the local-storage
/// result cache, so the rename attributes round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", deserialize_with = "de_poster", default)]
    pub poster: Option<String>,
    /// "movie", "series", or "episode".
    #[serde(rename = "Type", default)]
    pub media_type: String,
}

/// One third-party rating on a detail record, e.g. Rotten Tomatoes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// Full detail record returned by an `?i=<imdb id>&plot=full` lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Rated", default)]
    pub rated: String,
    #[serde(rename = "Released", default)]
    pub released: String,
    #[serde(rename = "Runtime", default)]
    pub runtime: String,
    #[serde(rename = "Genre", default)]
    pub genre: String,
    #[serde(rename = "Director", default)]
    pub director: String,
    #[serde(rename = "Writer", default)]
    pub writer: String,
    #[serde(rename = "Actors", default)]
    pub actors: String,
    #[serde(rename = "Plot", default)]
    pub plot: String,
    #[serde(rename = "Language", default)]
    pub language: String,
    #[serde(rename = "Country", default)]
    pub country: String,
    #[serde(rename = "Awards", default)]
    pub awards: String,
    #[serde(rename = "Poster", deserialize_with = "de_poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<Rating>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: String,
    #[serde(rename = "imdbVotes", default)]
    pub imdb_votes: String,
    #[serde(rename = "Type", default)]
    pub media_type: String,
    #[serde(rename = "BoxOffice", default)]
    pub box_office: String,
}

/// Payload of a successful title search.
#[derive(Debug, Deserialize)]
pub(super) struct SearchPayload {
    #[serde(rename = "Search", default)]
    pub search: Vec<Movie>,
    #[serde(rename = "totalResults", default)]
    #[allow(dead_code)]
    pub total_results: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_deserializes_pascal_case() {
        let movie: Movie = serde_json::from_str(
            r#"{
                "Title": "The Matrix",
                "Year": "1999",
                "imdbID": "tt0133093",
                "Type": "movie",
                "Poster": "https://img.example/matrix.jpg"
            }"#,
        )
        .unwrap();

        assert_eq!(movie.imdb_id, "tt0133093");
        assert_eq!(movie.title, "The Matrix");
        assert_eq!(movie.year, "1999");
        assert_eq!(movie.media_type, "movie");
        assert_eq!(
            movie.poster.as_deref(),
            Some("https://img.example/matrix.jpg")
        );
    }

    #[test]
    fn test_na_poster_becomes_none() {
        let movie: Movie = serde_json::from_str(
            r#"{"Title": "Obscure Film", "Year": "1967", "imdbID": "tt0000001", "Type": "movie", "Poster": "N/A"}"#,
        )
        .unwrap();
        assert_eq!(movie.poster, None);
    }

    #[test]
    fn test_missing_poster_becomes_none() {
        let movie: Movie = serde_json::from_str(
            r#"{"Title": "Obscure Film", "Year": "1967", "imdbID": "tt0000001"}"#,
        )
        .unwrap();
        assert_eq!(movie.poster, None);
        assert_eq!(movie.media_type, "");
    }

    #[test]
    fn test_movie_round_trips_through_cache_format() {
        let movie = Movie {
            imdb_id: "tt0133093".into(),
            title: "The Matrix".into(),
            year: "1999".into(),
            poster: None,
            media_type: "movie".into(),
        };
        let json = serde_json::to_string(&movie).unwrap();
        let restored: Movie = serde_json::from_str(&json).unwrap();
        assert_eq!(movie, restored);
    }

    #[test]
    fn test_detail_parses_ratings_and_defaults() {
        let detail: MovieDetail = serde_json::from_str(
            r#"{
                "Title": "Inception",
                "Year": "2010",
                "imdbID": "tt1375666",
                "Plot": "A thief who steals corporate secrets...",
                "Ratings": [
                    {"Source": "Internet Movie Database", "Value": "8.8/10"},
                    {"Source": "Rotten Tomatoes", "Value": "87%"}
                ],
                "imdbRating": "8.8"
            }"#,
        )
        .unwrap();

        assert_eq!(detail.ratings.len(), 2);
        assert_eq!(detail.ratings[1].value, "87%");
        assert_eq!(detail.director, "");
        assert_eq!(detail.box_office, "");
    }
}
