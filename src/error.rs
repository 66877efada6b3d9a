//! Client error type.
//!
//! Every fallible path in the crate returns `ClientError`. At the
//! `#[wasm_bindgen]` boundary it converts into a `JsValue` so exported
//! functions can use `?` and surface a readable exception to the page.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ClientError {
    /// A required element is not on the page.
    #[error("missing element: {0}")]
    MissingElement(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// `fetch` failed before a response arrived (offline, CORS, aborted).
    #[error("request failed: {0}")]
    Network(String),

    /// The server answered with a non-2xx status or an `error` field.
    /// Holds the user-facing message.
    #[error("{0}")]
    Rejected(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Any other exception thrown by a browser API.
    #[error("browser error: {0}")]
    Js(String),
}

impl ClientError {
    /// Wrap a thrown JS value, keeping its message when it has one.
    pub fn from_js(value: JsValue) -> Self {
        ClientError::Js(js_message(&value))
    }

    /// Same as `from_js` but tagged as a transport failure.
    pub fn network(value: JsValue) -> Self {
        ClientError::Network(js_message(&value))
    }
}

impl From<ClientError> for JsValue {
    fn from(err: ClientError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Best-effort text for a thrown JS value (`Error.message`, a plain string,
/// or the debug form).
fn js_message(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_displays_bare_message() {
        let err = ClientError::Rejected("Already guessed".to_string());
        assert_eq!(err.to_string(), "Already guessed");
    }

    #[test]
    fn json_error_converts_with_question_mark() {
        fn parse() -> Result<serde_json::Value, ClientError> {
            Ok(serde_json::from_str("{not json")?)
        }
        let err = parse().unwrap_err();
        assert!(matches!(err, ClientError::Json(_)));
        assert!(err.to_string().starts_with("invalid JSON"));
    }

    #[test]
    fn missing_element_names_the_selector() {
        let err = ClientError::MissingElement("#movie-search".to_string());
        assert!(err.to_string().contains("#movie-search"));
    }
}
