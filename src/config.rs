//! Client configuration.
//!
//! The page passes a JSON object to `start_client`. Every field is optional;
//! anything omitted falls back to the values the game's server templates
//! use, so `start_client("")` works against the stock page.

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Largest delay `setTimeout` accepts as a signed 32-bit value.
pub const MAX_TIMEOUT_MS: u32 = i32::MAX as u32;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// GET endpoint returning `[{id, title, year}]` for `?q=`.
    pub search_endpoint: String,
    /// POST endpoint accepting `{movie_id}`.
    pub submit_endpoint: String,

    pub search_input_id: String,
    pub results_id: String,
    /// Optional banner for transient messages. Errors fall back to `alert`
    /// when it is absent.
    pub message_id: String,
    pub guessed_movies_selector: String,
    pub strike_selector: String,

    /// Quiet period after the last keystroke before a lookup fires.
    pub debounce_ms: u32,
    /// Trimmed queries shorter than this (in characters) never hit the network.
    pub min_query_chars: usize,
    /// How long a transient message stays visible.
    pub message_ms: u32,

    pub poster_base_url: String,
    pub placeholder_poster: String,

    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            search_endpoint: "/search_movies".to_string(),
            submit_endpoint: "/submit_guess".to_string(),
            search_input_id: "movie-search".to_string(),
            results_id: "search-results".to_string(),
            message_id: "message".to_string(),
            guessed_movies_selector: ".guessed-movies".to_string(),
            strike_selector: ".strike".to_string(),
            debounce_ms: 300,
            min_query_chars: 2,
            message_ms: 3000,
            poster_base_url: "https://image.tmdb.org/t/p/w200".to_string(),
            placeholder_poster: "/static/placeholder.png".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Parse and validate a config object. Blank input yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, ClientError> {
        let config: ClientConfig = if json.trim().is_empty() {
            ClientConfig::default()
        } else {
            serde_json::from_str(json)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.debounce_ms == 0 {
            return Err(ClientError::Config("debounce_ms must be positive".to_string()));
        }
        if self.debounce_ms > MAX_TIMEOUT_MS || self.message_ms > MAX_TIMEOUT_MS {
            return Err(ClientError::Config(format!(
                "debounce_ms and message_ms must not exceed {}",
                MAX_TIMEOUT_MS
            )));
        }
        if self.min_query_chars == 0 {
            return Err(ClientError::Config(
                "min_query_chars must be at least 1".to_string(),
            ));
        }
        if self.search_input_id.is_empty() || self.results_id.is_empty() {
            return Err(ClientError::Config(
                "search_input_id and results_id are required".to_string(),
            ));
        }
        self.level()?;
        Ok(())
    }

    /// The configured log level as a `tracing` level.
    pub fn level(&self) -> Result<tracing::Level, ClientError> {
        self.log_level
            .parse::<tracing::Level>()
            .map_err(|_| ClientError::Config(format!("unknown log_level: {}", self.log_level)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_gives_defaults() {
        let config = ClientConfig::from_json("  ").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.min_query_chars, 2);
        assert_eq!(config.message_ms, 3000);
    }

    #[test]
    fn partial_object_keeps_other_defaults() {
        let config = ClientConfig::from_json(r#"{"debounce_ms":150,"search_endpoint":"/api/search"}"#)
            .unwrap();
        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.search_endpoint, "/api/search");
        assert_eq!(config.submit_endpoint, "/submit_guess");
        assert_eq!(config.placeholder_poster, "/static/placeholder.png");
    }

    #[test]
    fn zero_debounce_is_rejected() {
        let err = ClientConfig::from_json(r#"{"debounce_ms":0}"#).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn timer_delays_must_fit_in_i32() {
        let err = ClientConfig::from_json(r#"{"debounce_ms":2147483648}"#).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
        let err = ClientConfig::from_json(r#"{"message_ms":4294967295}"#).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));

        let config = ClientConfig::from_json(r#"{"message_ms":2147483647}"#).unwrap();
        assert_eq!(config.message_ms, MAX_TIMEOUT_MS);
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let err = ClientConfig::from_json(r#"{"log_level":"chatty"}"#).unwrap_err();
        assert!(err.to_string().contains("chatty"));
    }

    #[test]
    fn log_level_parses() {
        let config = ClientConfig::from_json(r#"{"log_level":"debug"}"#).unwrap();
        assert_eq!(config.level().unwrap(), tracing::Level::DEBUG);
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = ClientConfig::from_json("{debounce_ms:").unwrap_err();
        assert!(matches!(err, ClientError::Json(_)));
    }
}
