//! Search session: the state behind the city-lookup widget.
//!
//! One session owns the current query, the autocomplete dropdown and the
//! outcome of the last weather search. Input changes arm a debounce timer;
//! only the last change within the quiet period actually reaches the
//! geocoding endpoint. Submissions carry a generation counter so a slow
//! response from a superseded search can never overwrite a newer one.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::SearchError;
use crate::model::{Suggestion, WeatherReport};
use crate::provider::WeatherProvider;

/// Quiet period after the last keystroke before a suggestion lookup fires.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Queries shorter than this (trimmed) never trigger a suggestion lookup.
pub const SUGGEST_MIN_CHARS: usize = 4;

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub debounce_delay: Duration,
    pub suggest_min_chars: usize,
    pub suggest_limit: u8,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            debounce_delay: DEBOUNCE_DELAY,
            suggest_min_chars: SUGGEST_MIN_CHARS,
            suggest_limit: 5,
        }
    }
}

/// Observable session state, cloned out for rendering.
///
/// `report` and `error` are mutually exclusive: a search that sets one
/// clears the other.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
    pub dropdown_open: bool,
    pub report: Option<WeatherReport>,
    pub error: Option<String>,
    pub busy: bool,
}

#[derive(Debug, Default)]
struct State {
    query: String,
    suggestions: Vec<Suggestion>,
    dropdown_open: bool,
    report: Option<WeatherReport>,
    error: Option<String>,
    busy: bool,
    /// Bumped on every input change; a suggestion fetch whose generation is
    /// stale when it wakes (or when its response lands) does nothing.
    suggest_gen: u64,
    /// Bumped on every submission; a stale search outcome is discarded.
    search_gen: u64,
}

pub struct SearchSession {
    provider: Arc<dyn WeatherProvider>,
    options: SessionOptions,
    state: Arc<Mutex<State>>,
    pending_suggest: Mutex<Option<JoinHandle<()>>>,
}

impl SearchSession {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self::with_options(provider, SessionOptions::default())
    }

    pub fn with_options(provider: Arc<dyn WeatherProvider>, options: SessionOptions) -> Self {
        Self {
            provider,
            options,
            state: Arc::new(Mutex::new(State::default())),
            pending_suggest: Mutex::new(None),
        }
    }

    /// Record an input change and (re)arm the debounce timer.
    ///
    /// Queries below the length threshold clear and hide the dropdown
    /// immediately and never reach the network. Must be called within a
    /// tokio runtime.
    pub fn input(&self, text: &str) {
        let trimmed = text.trim().to_string();

        let armed_gen = {
            let mut st = self.state.lock().unwrap();
            st.query = text.to_string();
            st.suggest_gen += 1;
            if trimmed.chars().count() < self.options.suggest_min_chars {
                st.suggestions.clear();
                st.dropdown_open = false;
                None
            } else {
                Some(st.suggest_gen)
            }
        };

        // At most one pending timer: the previous one is cancelled before
        // a new one is armed.
        let mut pending = self.pending_suggest.lock().unwrap();
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        let Some(generation) = armed_gen else { return };

        let provider = Arc::clone(&self.provider);
        let state = Arc::clone(&self.state);
        let delay = self.options.debounce_delay;
        let limit = self.options.suggest_limit;

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if state.lock().unwrap().suggest_gen != generation {
                return;
            }
            match provider.suggest(&trimmed, limit).await {
                Ok(list) => {
                    let mut st = state.lock().unwrap();
                    if st.suggest_gen == generation {
                        st.dropdown_open = !list.is_empty();
                        st.suggestions = list;
                    }
                }
                // Suggestions are advisory; failures never reach the user.
                Err(err) => debug!(%err, "suggestion lookup failed"),
            }
        }));
    }

    /// Wait for the pending debounce task, if any, to finish or be aborted.
    ///
    /// Lets a caller observe the post-quiet-period state deterministically.
    pub async fn settle(&self) {
        let handle = self.pending_suggest.lock().unwrap().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    /// Run the primary weather search for the current query.
    ///
    /// An empty trimmed query sets the validation error and issues no
    /// request. Otherwise the previous outcome is cleared, the session is
    /// marked busy for the duration of the request, and the outcome (report
    /// or error message) is stored — unless a newer submission superseded
    /// this one in the meantime.
    pub async fn submit(&self) {
        let (query, generation) = {
            let mut st = self.state.lock().unwrap();
            let trimmed = st.query.trim().to_string();
            if trimmed.is_empty() {
                st.report = None;
                st.error = Some(SearchError::EmptyQuery.to_string());
                return;
            }
            st.report = None;
            st.error = None;
            st.busy = true;
            st.search_gen += 1;
            (trimmed, st.search_gen)
        };

        let outcome = self.provider.current_by_name(&query).await;

        let mut st = self.state.lock().unwrap();
        if st.search_gen != generation {
            // Superseded; the newer submission owns the view now.
            debug!(%query, "discarding stale search result");
            return;
        }
        match outcome {
            Ok(report) => {
                st.report = Some(report);
                st.error = None;
                st.query.clear();
            }
            Err(err) => {
                st.report = None;
                st.error = Some(err.to_string());
            }
        }
        st.busy = false;
    }

    /// Accept a suggestion: copy its label into the query, close the
    /// dropdown and run the search. Out-of-range indices are ignored.
    pub async fn select(&self, index: usize) {
        {
            let mut st = self.state.lock().unwrap();
            let Some(chosen) = st.suggestions.get(index) else {
                return;
            };
            st.query = chosen.label();
            st.dropdown_open = false;
            st.suggest_gen += 1;
        }
        if let Some(handle) = self.pending_suggest.lock().unwrap().take() {
            handle.abort();
        }
        self.submit().await;
    }

    /// Close the dropdown without touching anything else (the terminal
    /// equivalent of clicking outside it).
    pub fn dismiss(&self) {
        self.state.lock().unwrap().dropdown_open = false;
    }

    pub fn snapshot(&self) -> Snapshot {
        let st = self.state.lock().unwrap();
        Snapshot {
            query: st.query.clone(),
            suggestions: st.suggestions.clone(),
            dropdown_open: st.dropdown_open,
            report: st.report.clone(),
            error: st.error.clone(),
            busy: st.busy,
        }
    }
}
