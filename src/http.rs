//! `fetch` wrappers for the two game endpoints.

use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::error::ClientError;
use crate::model::{ErrorBody, GuessRequest, GuessResult, MovieSuggestion};
use crate::util::search_url;

/// `GET {endpoint}?q=...` → suggestions.
pub async fn search_movies(endpoint: &str, query: &str) -> Result<Vec<MovieSuggestion>, ClientError> {
    let url = search_url(endpoint, query);
    debug!(%url, "searching movies");

    let init = RequestInit::new();
    init.set_method("GET");
    let request = Request::new_with_str_and_init(&url, &init).map_err(ClientError::from_js)?;

    let (status, text) = send(&request).await?;
    if !(200..300).contains(&status) {
        return Err(ClientError::Rejected(rejection_message(status, &text)));
    }
    let movies: Vec<MovieSuggestion> = serde_json::from_str(&text)?;
    debug!(count = movies.len(), "search results");
    Ok(movies)
}

/// `POST {endpoint}` with `{"movie_id": id}`.
///
/// A non-2xx status becomes `ClientError::Rejected` carrying the server's
/// reason when the body has one.
pub async fn submit_guess(endpoint: &str, movie_id: i64) -> Result<GuessResult, ClientError> {
    let body = serde_json::to_string(&GuessRequest { movie_id })?;
    debug!(movie_id, "submitting guess");

    let headers = Headers::new().map_err(ClientError::from_js)?;
    headers
        .set("Content-Type", "application/json")
        .map_err(ClientError::from_js)?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(&body));
    let request = Request::new_with_str_and_init(endpoint, &init).map_err(ClientError::from_js)?;

    let (status, text) = send(&request).await?;
    if !(200..300).contains(&status) {
        let reason = rejection_message(status, &text);
        warn!(status, %reason, "guess rejected");
        return Err(ClientError::Rejected(reason));
    }
    Ok(serde_json::from_str(&text)?)
}

/// Run a request to completion and read the body as text.
async fn send(request: &Request) -> Result<(u16, String), ClientError> {
    let window = web_sys::window().ok_or_else(|| ClientError::MissingElement("window".to_string()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(ClientError::network)?
        .dyn_into()
        .map_err(ClientError::from_js)?;

    let status = response.status();
    let text = JsFuture::from(response.text().map_err(ClientError::from_js)?)
        .await
        .map_err(ClientError::network)?
        .as_string()
        .unwrap_or_default();
    Ok((status, text))
}

/// Reason to show for a non-2xx response: the body's `error`, else its
/// `message`, else empty (the caller substitutes a generic message).
pub fn rejection_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.reason().unwrap_or_default(),
        Err(_) => {
            debug!(status, "error body is not JSON");
            String::new()
        }
    }
}
