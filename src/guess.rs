//! Guess outcome interpretation.
//!
//! Turns the result of a `/submit_guess` round-trip into what the page
//! should do next. Kept free of DOM calls so every branch is testable.

use crate::error::ClientError;
use crate::model::{GuessResult, GuessedMovie};

/// Shown when the server gave no usable reason (network failure, empty or
/// non-JSON error body).
pub const FALLBACK_ERROR: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum GuessOutcome {
    /// The guess was refused. Only the message changes on the page.
    Rejected { message: String },
    /// The game ended: reload so the server renders the final screen.
    GameOver { message: Option<String> },
    /// Patch the page in place.
    Update {
        message: Option<String>,
        /// Styles the message: success for a hit, error for a strike.
        correct: bool,
        strikes: u32,
        /// Set only for a correct guess with a movie to show.
        new_card: Option<GuessedMovie>,
        highest_revenue: u64,
    },
}

impl GuessOutcome {
    /// Whether the search box and suggestion list should be cleared.
    pub fn clears_search(&self) -> bool {
        !matches!(self, GuessOutcome::Rejected { .. })
    }
}

/// Interpret a submission result.
///
/// A 2xx body that still carries `error` counts as a rejection. `game_over`
/// always wins over `correct`.
pub fn interpret(result: Result<GuessResult, ClientError>) -> GuessOutcome {
    let data = match result {
        Ok(data) => data,
        Err(err) => {
            return GuessOutcome::Rejected {
                message: user_message(&err),
            };
        }
    };

    if let Some(error) = data.error.filter(|e| !e.is_empty()) {
        return GuessOutcome::Rejected { message: error };
    }

    let message = data.message.filter(|m| !m.is_empty());

    if data.game_over {
        return GuessOutcome::GameOver { message };
    }

    let new_card = if data.correct {
        data.guessed_movies.last().cloned()
    } else {
        None
    };

    GuessOutcome::Update {
        message,
        correct: data.correct,
        strikes: data.strikes,
        new_card,
        highest_revenue: data.highest_revenue,
    }
}

/// What the player sees for a failed submission.
pub fn user_message(err: &ClientError) -> String {
    match err {
        ClientError::Rejected(reason) if !reason.is_empty() => reason.clone(),
        _ => FALLBACK_ERROR.to_string(),
    }
}
