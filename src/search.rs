//! Search-as-you-type bookkeeping.
//!
//! `SearchDebouncer` decides what an input event means (clear the list, or
//! schedule a lookup) and which timer is still allowed to fire. Each
//! keystroke bumps a generation counter; a timer only produces a query when
//! its generation is still the newest. The DOM layer also cancels the old
//! browser timer, so a stale generation only shows up if a cancelled
//! callback was already queued.
//!
//! In-flight fetches are never cancelled. Responses render in arrival order.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Query too short: empty the results now, no network call.
    Clear,
    /// Start a timer for `delay_ms`; hand `generation` back to `fire` when it
    /// expires.
    Schedule { generation: u64, delay_ms: u32 },
}

#[derive(Debug)]
pub struct SearchDebouncer {
    min_chars: usize,
    delay_ms: u32,
    generation: u64,
    pending: Option<String>,
}

impl SearchDebouncer {
    pub fn new(min_chars: usize, delay_ms: u32) -> Self {
        Self {
            min_chars,
            delay_ms,
            generation: 0,
            pending: None,
        }
    }

    /// Handle the raw value of the search box after an `input` event.
    /// Always supersedes whatever was pending.
    pub fn on_input(&mut self, raw: &str) -> InputAction {
        self.generation += 1;
        let query = raw.trim();
        if query.chars().count() < self.min_chars {
            self.pending = None;
            return InputAction::Clear;
        }
        self.pending = Some(query.to_string());
        InputAction::Schedule {
            generation: self.generation,
            delay_ms: self.delay_ms,
        }
    }

    /// A timer expired. Returns the query to look up, or `None` when the
    /// timer was superseded.
    pub fn fire(&mut self, generation: u64) -> Option<String> {
        if generation != self.generation {
            return None;
        }
        self.pending.take()
    }

    /// Drop any pending lookup (e.g. after a guess was submitted).
    pub fn reset(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    #[cfg(test)]
    fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
