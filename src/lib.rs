//! Movie-guess browser client.
//!
//! Compiled to WebAssembly and loaded by the game page. The page calls
//! `start_client(configJson)` once; from then on the crate owns the search
//! box (debounced `/search_movies` lookups), guess submission
//! (`/submit_guess`), and the incremental page updates that follow: strike
//! indicators, guessed-movie cards, transient messages, and a full reload
//! when the game ends.
//!
//! Game state is owned by the server. The client keeps none of its own
//! beyond what is on the page.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod dom;
pub mod error;
pub mod guess;
pub mod http;
pub mod logging;
pub mod model;
pub mod render;
pub mod search;
pub mod util;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::model::GuessResult;

/// Start the client.
///
/// `config_json` is a JSON object of `ClientConfig` overrides; an empty
/// string uses the defaults. When the document is still loading, mounting
/// waits for `DOMContentLoaded`.
///
/// Throws on invalid config, when the client is already started, or when
/// the search elements are missing from an already-loaded page.
#[wasm_bindgen]
pub fn start_client(config_json: &str) -> Result<(), JsValue> {
    let config = ClientConfig::from_json(config_json)?;
    logging::init(config.level()?);

    let window = web_sys::window().ok_or_else(|| ClientError::MissingElement("window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| ClientError::MissingElement("document".to_string()))?;

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(move || {
            if let Err(err) = mount(config) {
                tracing::error!(error = %err, "could not start guess client");
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        return Ok(());
    }

    mount(config)?;
    Ok(())
}

/// Mount and install the page controller. A page gets one controller:
/// a second mount would bind every listener twice.
fn mount(config: ClientConfig) -> Result<(), ClientError> {
    ensure_not_started()?;
    let client = dom::GuessClient::mount(config)?;
    dom::install(client);
    Ok(())
}

fn ensure_not_started() -> Result<(), ClientError> {
    match dom::with_client(|_| ()) {
        Some(()) => Err(ClientError::Config("guess client is already started".to_string())),
        None => Ok(()),
    }
}

/// Submit a guess for `movie_id`, as if its search row had been clicked.
///
/// Throws when `start_client` has not mounted a client yet.
#[wasm_bindgen]
pub fn submit_guess(movie_id: f64) -> Result<(), JsValue> {
    if !movie_id.is_finite() || movie_id.fract() != 0.0 {
        return Err(ClientError::Rejected(format!("invalid movie id: {}", movie_id)).into());
    }
    dom::with_client(|client| client.submit(movie_id as i64))
        .ok_or_else(|| ClientError::Config("guess client is not started".to_string()))?;
    Ok(())
}

/// Render the card for the last movie in a `/submit_guess` response.
///
/// Returns an empty string when the response lists no guessed movies. Uses
/// the running client's config when there is one, the defaults otherwise.
#[wasm_bindgen]
pub fn render_guess_card(result_json: &str) -> Result<String, JsValue> {
    Ok(card_html(result_json)?)
}

fn card_html(result_json: &str) -> Result<String, ClientError> {
    let result: GuessResult = serde_json::from_str(result_json)?;
    let config = dom::with_client(|client| client.config().clone()).unwrap_or_default();
    Ok(result
        .latest_guess()
        .map(|movie| render::render_movie_card(movie, result.highest_revenue, &config))
        .unwrap_or_default())
}
