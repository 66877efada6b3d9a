//! `GuessClient` — the page controller.
//!
//! Owns the search box and suggestion list, wires their listeners, and
//! applies guess outcomes to the page. Decisions are delegated to
//! `search`, `guess` and `render`; this module only performs DOM and timer
//! calls.
//!
//! The running client lives in a `thread_local!` slot for the lifetime of
//! the page so `submit_guess` can reach it from inline `onclick` markup.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, Node, Window};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::guess::{self, GuessOutcome};
use crate::http;
use crate::model::GuessedMovie;
use crate::render;
use crate::search::{InputAction, SearchDebouncer};

thread_local! {
    static CLIENT: RefCell<Option<Rc<GuessClient>>> = const { RefCell::new(None) };
}

/// Make `client` the page's active controller.
pub fn install(client: Rc<GuessClient>) {
    CLIENT.with(|c| *c.borrow_mut() = Some(client));
}

/// Run `f` against the active controller, if one is mounted.
pub fn with_client<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&Rc<GuessClient>) -> R,
{
    CLIENT.with(|c| c.borrow().as_ref().map(f))
}

/// Visual style of a transient message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    fn class(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

/// Timer callbacks are created once in `bind` and reused for every timer,
/// so cancelled timers leave nothing behind. They hold an `Rc` back to the
/// client, which lives as long as the page.
struct ClientState {
    debouncer: SearchDebouncer,
    search_timer: Option<i32>,
    message_timer: Option<i32>,
    /// Receives the debounce generation as its timer argument.
    search_callback: Option<Closure<dyn FnMut(JsValue)>>,
    hide_callback: Option<Closure<dyn FnMut()>>,
}

pub struct GuessClient {
    config: ClientConfig,
    window: Window,
    document: Document,
    input: HtmlInputElement,
    results: Element,
    state: RefCell<ClientState>,
}

impl GuessClient {
    /// Look up the required elements and bind all listeners.
    pub fn mount(config: ClientConfig) -> Result<Rc<Self>, ClientError> {
        let window = web_sys::window().ok_or_else(|| ClientError::MissingElement("window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| ClientError::MissingElement("document".to_string()))?;

        let input: HtmlInputElement = document
            .get_element_by_id(&config.search_input_id)
            .ok_or_else(|| ClientError::MissingElement(format!("#{}", config.search_input_id)))?
            .dyn_into()
            .map_err(|_| ClientError::MissingElement(format!("#{} (input)", config.search_input_id)))?;
        let results = document
            .get_element_by_id(&config.results_id)
            .ok_or_else(|| ClientError::MissingElement(format!("#{}", config.results_id)))?;

        let state = ClientState {
            debouncer: SearchDebouncer::new(config.min_query_chars, config.debounce_ms),
            search_timer: None,
            message_timer: None,
            search_callback: None,
            hide_callback: None,
        };

        let client = Rc::new(Self {
            config,
            window,
            document,
            input,
            results,
            state: RefCell::new(state),
        });
        client.bind()?;
        info!("guess client mounted");
        Ok(client)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ── Listeners ──────────────────────────────────────────────────

    fn bind(self: &Rc<Self>) -> Result<(), ClientError> {
        let this = Rc::clone(self);
        let on_input = Closure::<dyn FnMut(Event)>::new(move |_: Event| this.on_input());
        self.input
            .add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())
            .map_err(ClientError::from_js)?;
        on_input.forget();

        let this = Rc::clone(self);
        let on_pick = Closure::<dyn FnMut(Event)>::new(move |e: Event| this.on_result_click(&e));
        self.results
            .add_event_listener_with_callback("click", on_pick.as_ref().unchecked_ref())
            .map_err(ClientError::from_js)?;
        on_pick.forget();

        let this = Rc::clone(self);
        let on_outside = Closure::<dyn FnMut(Event)>::new(move |e: Event| this.on_document_click(&e));
        self.document
            .add_event_listener_with_callback("click", on_outside.as_ref().unchecked_ref())
            .map_err(ClientError::from_js)?;
        on_outside.forget();

        let this = Rc::clone(self);
        let search_callback = Closure::<dyn FnMut(JsValue)>::new(move |generation: JsValue| {
            match generation.as_f64() {
                Some(generation) => this.run_search(generation as u64),
                None => warn!("search timer fired without a generation"),
            }
        });
        let this = Rc::clone(self);
        let hide_callback = Closure::<dyn FnMut()>::new(move || this.hide_message());

        let mut state = self.state.borrow_mut();
        state.search_callback = Some(search_callback);
        state.hide_callback = Some(hide_callback);
        Ok(())
    }

    fn on_input(self: &Rc<Self>) {
        let raw = self.input.value();
        let mut state = self.state.borrow_mut();
        if let Some(handle) = state.search_timer.take() {
            self.window.clear_timeout_with_handle(handle);
        }

        let action = state.debouncer.on_input(&raw);
        match action {
            InputAction::Clear => self.clear_results(),
            InputAction::Schedule { generation, delay_ms } => {
                let Some(callback) = state.search_callback.as_ref() else {
                    warn!("search callback not bound");
                    return;
                };
                let scheduled = self.window.set_timeout_with_callback_and_timeout_and_arguments_1(
                    callback.as_ref().unchecked_ref(),
                    timeout_ms(delay_ms),
                    &JsValue::from_f64(generation as f64),
                );
                match scheduled {
                    Ok(handle) => state.search_timer = Some(handle),
                    Err(e) => warn!(error = %ClientError::from_js(e), "could not schedule search"),
                }
            }
        }
    }

    fn run_search(self: &Rc<Self>, generation: u64) {
        let query = {
            let mut state = self.state.borrow_mut();
            let query = state.debouncer.fire(generation);
            if query.is_some() {
                state.search_timer = None;
            }
            query
        };
        let Some(query) = query else {
            debug!(generation, "stale search timer");
            return;
        };

        let this = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            match http::search_movies(&this.config.search_endpoint, &query).await {
                Ok(movies) => this.results.set_inner_html(&render::render_suggestions(&movies)),
                Err(err) => {
                    warn!(%query, error = %err, "search failed");
                    this.clear_results();
                }
            }
        });
    }

    fn on_result_click(self: &Rc<Self>, event: &Event) {
        let Some(row) = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest("[data-movie-id]").ok().flatten())
        else {
            return;
        };
        match row.get_attribute("data-movie-id").and_then(|id| id.parse::<i64>().ok()) {
            Some(movie_id) => self.submit(movie_id),
            None => warn!("search row without a valid movie id"),
        }
    }

    fn on_document_click(&self, event: &Event) {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
            return;
        };
        let input: &Node = self.input.as_ref();
        if !self.results.contains(Some(&target)) && !target.is_same_node(Some(input)) {
            self.clear_results();
        }
    }

    pub fn clear_results(&self) {
        self.results.set_inner_html("");
    }

    // ── Guess submission ───────────────────────────────────────────

    /// Submit a guess and apply the outcome when the response arrives.
    pub fn submit(self: &Rc<Self>, movie_id: i64) {
        let this = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            let result = http::submit_guess(&this.config.submit_endpoint, movie_id).await;
            if let Err(err) = &result {
                warn!(movie_id, error = %err, "guess failed");
            }
            this.apply(guess::interpret(result));
        });
    }

    /// Patch the page for an interpreted guess result.
    pub fn apply(self: &Rc<Self>, outcome: GuessOutcome) {
        if outcome.clears_search() {
            self.input.set_value("");
            {
                let mut state = self.state.borrow_mut();
                if let Some(handle) = state.search_timer.take() {
                    self.window.clear_timeout_with_handle(handle);
                }
                state.debouncer.reset();
            }
            self.clear_results();
        }

        match outcome {
            GuessOutcome::Rejected { message } => self.show_message(&message, MessageKind::Error),
            GuessOutcome::GameOver { message } => {
                if let Some(message) = message {
                    self.show_message(&message, MessageKind::Success);
                }
                info!("game over, reloading");
                if let Err(e) = self.window.location().reload() {
                    warn!(error = %ClientError::from_js(e), "reload failed");
                }
            }
            GuessOutcome::Update {
                message,
                correct,
                strikes,
                new_card,
                highest_revenue,
            } => {
                if let Some(message) = message {
                    let kind = if correct {
                        MessageKind::Success
                    } else {
                        MessageKind::Error
                    };
                    self.show_message(&message, kind);
                }
                self.update_strikes(strikes);
                if let Some(movie) = new_card {
                    self.append_card(&movie, highest_revenue);
                }
            }
        }
    }

    /// Mark the first `strikes` slots active and the rest inactive.
    pub fn update_strikes(&self, strikes: u32) {
        let slots = match self.document.query_selector_all(&self.config.strike_selector) {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %ClientError::from_js(e), "bad strike selector");
                return;
            }
        };
        let len = slots.length() as usize;
        let active = render::active_strikes(strikes, len);
        for i in 0..len {
            let Some(slot) = slots.item(i as u32).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let classes = slot.class_list();
            let toggled = if i < active {
                classes.add_1("active")
            } else {
                classes.remove_1("active")
            };
            if let Err(e) = toggled {
                warn!(error = %ClientError::from_js(e), "could not update strike");
            }
        }
        debug!(strikes, active, "strikes updated");
    }

    /// Append a card for a newly found movie. Existing cards are untouched.
    pub fn append_card(&self, movie: &GuessedMovie, highest_revenue: u64) {
        let container = match self.document.query_selector(&self.config.guessed_movies_selector) {
            Ok(Some(el)) => el,
            Ok(None) => {
                warn!(selector = %self.config.guessed_movies_selector, "no guessed movies container");
                return;
            }
            Err(e) => {
                warn!(error = %ClientError::from_js(e), "bad guessed movies selector");
                return;
            }
        };
        let html = render::render_movie_card(movie, highest_revenue, &self.config);
        if let Err(e) = container.insert_adjacent_html("beforeend", &html) {
            warn!(error = %ClientError::from_js(e), "could not append card");
        }
    }

    // ── Messages ───────────────────────────────────────────────────

    /// Show `text` in the message banner and hide it after `message_ms`.
    /// Without a banner, errors fall back to `alert`.
    pub fn show_message(&self, text: &str, kind: MessageKind) {
        let banner = self
            .document
            .get_element_by_id(&self.config.message_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let Some(banner) = banner else {
            if kind == MessageKind::Error {
                if let Err(e) = self.window.alert_with_message(text) {
                    warn!(error = %ClientError::from_js(e), "could not show alert");
                }
            }
            return;
        };

        banner.set_text_content(Some(text));
        banner.set_class_name(&format!("message {}", kind.class()));
        banner.set_hidden(false);

        let mut state = self.state.borrow_mut();
        if let Some(handle) = state.message_timer.take() {
            self.window.clear_timeout_with_handle(handle);
        }
        let Some(callback) = state.hide_callback.as_ref() else {
            warn!("message callback not bound");
            return;
        };
        let scheduled = self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            timeout_ms(self.config.message_ms),
        );
        match scheduled {
            Ok(handle) => state.message_timer = Some(handle),
            Err(e) => warn!(error = %ClientError::from_js(e), "could not schedule message hide"),
        }
    }

    fn hide_message(&self) {
        self.state.borrow_mut().message_timer = None;
        if let Some(banner) = self
            .document
            .get_element_by_id(&self.config.message_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            banner.set_hidden(true);
            banner.set_text_content(None);
        }
    }
}

/// `setTimeout` delay. Config validation keeps values within `i32`.
fn timeout_ms(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}
