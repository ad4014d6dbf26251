use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::debug;

use crate::dto::application_dto::ApplicationListQuery;
use crate::error::Result;
use crate::models::application::ApplicationRow;
use crate::services::application_service::ApplicationService;

/// Idle sequencers are pruned once the registry grows past this size.
const MAX_IDLE_SEQUENCERS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Hands out increasing tickets; only the newest ticket is current.
#[derive(Debug, Default)]
pub struct SearchSequencer {
    generation: AtomicU64,
}

impl SearchSequencer {
    pub fn issue(&self) -> SearchTicket {
        SearchTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }
}

/// Debounced application search where a newer search from the same caller
/// supersedes older ones still in flight.
#[derive(Clone)]
pub struct SearchService {
    applications: ApplicationService,
    debounce: Duration,
    sequencers: Arc<Mutex<HashMap<String, Arc<SearchSequencer>>>>,
}

impl SearchService {
    pub fn new(applications: ApplicationService, debounce: Duration) -> Self {
        Self {
            applications,
            debounce,
            sequencers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn sequencer_for(&self, caller: &str) -> Arc<SearchSequencer> {
        let mut guard = self
            .sequencers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if guard.len() > MAX_IDLE_SEQUENCERS {
            guard.retain(|_, seq| Arc::strong_count(seq) > 1);
        }
        guard
            .entry(caller.to_string())
            .or_insert_with(|| Arc::new(SearchSequencer::default()))
            .clone()
    }

    /// Runs the search unless a newer one from `caller` arrives first.
    ///
    /// Returns `Ok(None)` when the search was superseded, either during the
    /// debounce window (no backend call is made) or while the backend was
    /// answering (the result is discarded).
    pub async fn search(
        &self,
        caller: &str,
        query: &ApplicationListQuery,
        token: &str,
    ) -> Result<Option<Vec<ApplicationRow>>> {
        let sequencer = self.sequencer_for(caller);
        let ticket = sequencer.issue();

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
        }
        if !sequencer.is_current(ticket) {
            debug!(?ticket, "Search superseded before dispatch");
            return Ok(None);
        }

        let rows = self.applications.list_rows(query, token).await?;

        if !sequencer.is_current(ticket) {
            debug!(?ticket, "Search superseded while in flight; dropping result");
            return Ok(None);
        }
        Ok(Some(rows))
    }
}
