//! Wire shapes for the two game endpoints.
//!
//! The server owns all game state; these types only mirror what it sends.
//! Deserialization is lenient about absent and null fields because the
//! server emits `None` for unknown years, posters and revenue.

use serde::{Deserialize, Deserializer, Serialize};

/// One row of `/search_movies` output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSuggestion {
    pub id: i64,
    pub title: String,
    /// Display label: `"2010"`, or `"N/A"` when the server has no year.
    #[serde(default = "unknown_year", deserialize_with = "year_label")]
    pub year: String,
}

/// Body of `POST /submit_guess`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GuessRequest {
    pub movie_id: i64,
}

/// A movie the player has already found.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GuessedMovie {
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    /// ISO date, e.g. `"2010-07-16"`.
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub revenue: u64,
}

/// Response of `POST /submit_guess`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct GuessResult {
    pub error: Option<String>,
    pub message: Option<String>,
    pub correct: bool,
    pub strikes: u32,
    pub game_over: bool,
    pub guessed_movies: Vec<GuessedMovie>,
    #[serde(deserialize_with = "zero_if_null")]
    pub highest_revenue: u64,
}

impl GuessResult {
    /// The entry appended by this guess, if any.
    pub fn latest_guess(&self) -> Option<&GuessedMovie> {
        self.guessed_movies.last()
    }
}

/// Body of a non-2xx response. Either field may carry the reason.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn reason(self) -> Option<String> {
        self.error
            .filter(|s| !s.is_empty())
            .or(self.message.filter(|s| !s.is_empty()))
    }
}

fn unknown_year() -> String {
    "N/A".to_string()
}

/// Accept `"2010"`, `2010` or `null`.
fn year_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Number(i64),
        Text(String),
    }

    Ok(match Option::<Year>::deserialize(deserializer)? {
        Some(Year::Number(n)) => n.to_string(),
        Some(Year::Text(s)) if !s.trim().is_empty() => s,
        _ => unknown_year(),
    })
}

fn zero_if_null<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_year_forms() {
        let rows: Vec<MovieSuggestion> = serde_json::from_str(
            r#"[
                {"id":27205,"title":"Inception","year":"2010"},
                {"id":1,"title":"Big","year":1988},
                {"id":2,"title":"Unknown","year":null},
                {"id":3,"title":"Missing"}
            ]"#,
        )
        .unwrap();
        assert_eq!(rows[0].year, "2010");
        assert_eq!(rows[1].year, "1988");
        assert_eq!(rows[2].year, "N/A");
        assert_eq!(rows[3].year, "N/A");
    }

    #[test]
    fn guess_result_tolerates_sparse_body() {
        let result: GuessResult = serde_json::from_str(r#"{"strikes":1}"#).unwrap();
        assert_eq!(result.strikes, 1);
        assert!(!result.correct);
        assert!(!result.game_over);
        assert!(result.guessed_movies.is_empty());
        assert_eq!(result.highest_revenue, 0);
        assert!(result.latest_guess().is_none());
    }

    #[test]
    fn guessed_movie_null_revenue_is_zero() {
        let movie: GuessedMovie = serde_json::from_str(
            r#"{"title":"Big","poster_path":null,"release_date":"1988-06-03","revenue":null}"#,
        )
        .unwrap();
        assert_eq!(movie.revenue, 0);
        assert!(movie.poster_path.is_none());
    }

    #[test]
    fn latest_guess_is_last_entry() {
        let result: GuessResult = serde_json::from_str(
            r#"{"correct":true,"strikes":0,"game_over":false,"highest_revenue":1000000000,
                "guessed_movies":[{"title":"Big","revenue":151668774},
                                  {"title":"Inception","revenue":800000000}]}"#,
        )
        .unwrap();
        assert_eq!(result.latest_guess().unwrap().title, "Inception");
    }

    #[test]
    fn request_serializes_movie_id() {
        let body = serde_json::to_string(&GuessRequest { movie_id: 27205 }).unwrap();
        assert_eq!(body, r#"{"movie_id":27205}"#);
    }

    #[test]
    fn error_body_prefers_error_field() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"Already guessed","message":"ignored"}"#).unwrap();
        assert_eq!(body.reason().as_deref(), Some("Already guessed"));

        let body: ErrorBody = serde_json::from_str(r#"{"message":"No active game"}"#).unwrap();
        assert_eq!(body.reason().as_deref(), Some("No active game"));

        let body: ErrorBody = serde_json::from_str(r#"{"error":""}"#).unwrap();
        assert!(body.reason().is_none());
    }
}
