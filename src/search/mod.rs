//! Search state for the console.
//!
//! `SearchState` owns the raw inputs, the confirmed filters and whatever the last
//! lookup produced. Network work happens elsewhere: `submit` hands back a
//! [`PendingSearch`] that the caller runs on a task, and the resulting
//! [`SearchOutcome`] is fed back through `settle`.

mod state;

use tracing::{Instrument, info, info_span, warn};

use crate::api::{CensistaLookup, LookupError, Record, SearchQuery};

pub use state::*;

/// Filter values as confirmed by the user. Stored untrimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub dni: String,
    pub nombre: String,
}

impl Filters {
    pub fn is_active(&self) -> bool {
        !self.dni.trim().is_empty() || !self.nombre.trim().is_empty()
    }

    pub fn to_query(&self) -> Option<SearchQuery> {
        SearchQuery::from_filters(&self.dni, &self.nombre)
    }
}

/// A lookup that has been issued but not yet run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub seq: u64,
    pub query: SearchQuery,
}

impl PendingSearch {
    pub async fn run(self, lookup: &dyn CensistaLookup) -> SearchOutcome {
        let result = lookup
            .search(&self.query)
            .instrument(info_span!("search", seq = self.seq))
            .await;
        match &result {
            Ok(records) => info!(seq = self.seq, count = records.len(), "search settled"),
            Err(e) => warn!(seq = self.seq, error = %e, "search failed"),
        }
        SearchOutcome {
            seq: self.seq,
            result,
        }
    }
}

#[derive(Debug)]
pub struct SearchOutcome {
    pub seq: u64,
    pub result: Result<Vec<Record>, LookupError>,
}
