use std::sync::Arc;

use crate::{
    history::LocationHistory,
    model::{ForecastEntry, WeatherBundle, WeatherSnapshot},
    notify::Notifier,
    provider::{ErrorKind, FetchError, WeatherProvider},
    store::{KEY_LAST_VISITED, KEY_LOCATION, KeyValueStore},
};

/// Message shown to the user when a fetch fails, matching the app's toast.
const FETCH_FAILED_MESSAGE: &str = "Unable to fetch weather data. Please try again.";

/// Suggestions are only consulted once the input is longer than this.
const SUGGEST_MIN_CHARS: usize = 2;

/// Everything the UI renders from: the active target, the latest successful
/// snapshot and forecast, a loading flag and the last error.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub active_location: Option<String>,
    pub snapshot: Option<WeatherSnapshot>,
    pub forecast: Vec<ForecastEntry>,
    pub is_loading: bool,
    pub last_error: Option<ErrorKind>,
}

/// Handle for one issued fetch. Carries the target location and the sequence
/// number current at issue time; [`WeatherSession::apply`] uses the sequence
/// to discard results that a newer target has superseded.
#[derive(Debug)]
pub struct FetchTicket {
    seq: u64,
    location: String,
}

impl FetchTicket {
    pub fn location(&self) -> &str {
        &self.location
    }
}

/// Owns the active location and orchestrates fetch-on-change.
///
/// The fetch cycle is split in three so that overlapping fetches can resolve
/// in any order without a stale result clobbering a newer one:
/// [`set_active_location`](Self::set_active_location) issues a ticket,
/// [`fetch`](Self::fetch) runs the provider call, and
/// [`apply`](Self::apply) folds the outcome into state, or drops it when the
/// ticket is no longer the latest. [`submit`](Self::submit) composes the
/// three for the common sequential case.
#[derive(Debug)]
pub struct WeatherSession {
    provider: Arc<dyn WeatherProvider>,
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    state: SessionState,
    history: LocationHistory,
    fetch_seq: u64,
}

impl WeatherSession {
    /// Build a session, restoring the visit history from the store.
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let history = LocationHistory::restore(store.get(KEY_LAST_VISITED).as_deref());

        Self {
            provider,
            store,
            notifier,
            state: SessionState::default(),
            history,
            fetch_seq: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn history(&self) -> &LocationHistory {
        &self.history
    }

    /// Record a new fetch target. Returns `None` when `location` already is
    /// the active target, so re-submitting the same value stays a no-op.
    pub fn set_active_location(&mut self, location: &str) -> Option<FetchTicket> {
        if self.state.active_location.as_deref() == Some(location) {
            return None;
        }

        self.state.active_location = Some(location.to_string());
        self.state.is_loading = true;
        self.fetch_seq += 1;

        tracing::debug!(location, seq = self.fetch_seq, "issuing weather fetch");

        Some(FetchTicket { seq: self.fetch_seq, location: location.to_string() })
    }

    /// If a location was persisted by a previous run, re-target it exactly as
    /// [`set_active_location`](Self::set_active_location) would.
    pub fn restore_active_location(&mut self) -> Option<FetchTicket> {
        let saved = self.store.get(KEY_LOCATION)?;
        self.set_active_location(&saved)
    }

    /// Run the provider call for a ticket. Deliberately takes `&self`: other
    /// tickets may be in flight at the same time.
    pub async fn fetch(&self, ticket: &FetchTicket) -> Result<WeatherBundle, FetchError> {
        self.provider.fetch_current_and_forecast(&ticket.location).await
    }

    /// Fold a fetch outcome into session state.
    ///
    /// A ticket older than the most recently issued one is discarded
    /// untouched; its target is no longer what the user asked for. On
    /// success the snapshot and forecast are replaced wholesale, the visit is
    /// recorded and persisted. On failure the previous snapshot stays (stale
    /// but valid), the error kind is recorded and the user is notified once.
    pub fn apply(&mut self, ticket: FetchTicket, outcome: Result<WeatherBundle, FetchError>) {
        if ticket.seq != self.fetch_seq {
            tracing::debug!(location = %ticket.location, "discarding superseded fetch result");
            return;
        }

        self.state.is_loading = false;

        match outcome {
            Ok(bundle) => {
                self.state.snapshot = Some(bundle.snapshot);
                self.state.forecast = bundle.forecast;
                self.state.last_error = None;

                self.history = self.history.record_visit(&ticket.location);
                self.store.set(KEY_LAST_VISITED, &self.history.serialize());
                self.store.set(KEY_LOCATION, &ticket.location);

                tracing::info!(location = %ticket.location, "weather updated");
            }
            Err(err) => {
                self.state.last_error = Some(err.kind());
                tracing::warn!(location = %ticket.location, %err, "weather fetch failed");
                self.notifier.notify(FETCH_FAILED_MESSAGE);
            }
        }
    }

    /// Target `location` and run the full fetch cycle. Returns `false` when
    /// the location was already active and nothing was fetched.
    pub async fn submit(&mut self, location: &str) -> bool {
        let Some(ticket) = self.set_active_location(location) else {
            return false;
        };

        let outcome = self.fetch(&ticket).await;
        self.apply(ticket, outcome);
        true
    }

    /// Empty the visit history and persist the empty list.
    pub fn clear_history(&mut self) {
        self.history = self.history.clear();
        self.store.set(KEY_LAST_VISITED, &self.history.serialize());
    }

    /// Autocomplete candidates for a partial input. Inputs of two characters
    /// or fewer never reach the provider.
    pub async fn suggestions_for(&self, input: &str) -> Vec<String> {
        if input.chars().count() <= SUGGEST_MIN_CHARS {
            return Vec::new();
        }

        self.provider.suggest(input).await
    }
}
