use tracing::{debug, info};

use super::{Filters, PendingSearch, SearchOutcome};
use crate::api::Record;

#[derive(Debug, Default)]
pub struct SearchState {
    pub dni_input: String,
    pub nombre_input: String,
    confirmed: Filters,
    results: Vec<Record>,
    loading: bool,
    error: Option<String>,
    latest_seq: u64,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Confirms the current inputs as filters and re-evaluates the search.
    ///
    /// Runs even when the inputs equal the already confirmed filters.
    pub fn submit(&mut self) -> Option<PendingSearch> {
        self.error = None;
        self.results.clear();
        self.confirmed = Filters {
            dni: self.dni_input.clone(),
            nombre: self.nombre_input.clone(),
        };
        self.run_search()
    }

    /// Filters-changed hook. Returns the request to issue, if any.
    pub fn run_search(&mut self) -> Option<PendingSearch> {
        // Any response still in flight belongs to older filters from here on.
        self.latest_seq += 1;

        let Some(query) = self.confirmed.to_query() else {
            self.results.clear();
            self.loading = false;
            self.error = None;
            return None;
        };

        self.loading = true;
        self.error = None;
        info!(
            seq = self.latest_seq,
            dni = query.dni.is_some(),
            nombre = query.nombre.is_some(),
            "issuing search"
        );
        Some(PendingSearch {
            seq: self.latest_seq,
            query,
        })
    }

    /// Applies a finished lookup. Returns `false` if the outcome was stale and ignored.
    pub fn settle(&mut self, outcome: SearchOutcome) -> bool {
        if outcome.seq != self.latest_seq {
            debug!(
                seq = outcome.seq,
                latest = self.latest_seq,
                "discarding stale search outcome"
            );
            return false;
        }

        match outcome.result {
            Ok(records) => {
                self.results = records;
                self.error = None;
            }
            Err(e) => {
                self.results.clear();
                self.error = Some(e.user_message());
            }
        }
        self.loading = false;
        true
    }

    pub fn confirmed(&self) -> &Filters {
        &self.confirmed
    }

    pub fn has_filters(&self) -> bool {
        self.confirmed.is_active()
    }

    pub fn results(&self) -> &[Record] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
