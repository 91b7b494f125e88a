//! Background fetch source.
//!
//! The UI thread never awaits. [`FetchSource::dispatch`] spawns the lookup
//! on a small tokio runtime owned by the source; finished lookups come back
//! as [`SearchOutcome`]s over a channel that the event loop drains with
//! [`FetchSource::poll`] on every tick.
//!
//! Outcomes arrive in completion order, not dispatch order. Fencing stale
//! ones is the controller's job.

use crate::client::CityLookup;
use crate::model::FetchError;
use crate::state::{SearchOutcome, SearchRequest};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

/// Runs city lookups off the UI thread.
pub struct FetchSource<L: CityLookup> {
    lookup: L,
    /// Always `Some` until drop.
    runtime: Option<Runtime>,
    tx: Sender<SearchOutcome>,
    rx: Receiver<SearchOutcome>,
    pending: usize,
}

impl<L: CityLookup> FetchSource<L> {
    /// Create a source with its own single-worker runtime.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Runtime` if the runtime cannot be started.
    pub fn new(lookup: L) -> Result<Self, FetchError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("citysearch-fetch")
            .enable_all()
            .build()
            .map_err(|e| FetchError::Runtime(e.to_string()))?;
        let (tx, rx) = mpsc::channel();

        Ok(Self {
            lookup,
            runtime: Some(runtime),
            tx,
            rx,
            pending: 0,
        })
    }

    /// Start fetching `request` in the background.
    pub fn dispatch(&mut self, request: SearchRequest) {
        let Some(runtime) = self.runtime.as_ref() else {
            return;
        };

        info!(
            request = %request.id,
            term = %request.term,
            limit = request.limit,
            "Dispatching city search"
        );

        let lookup = self.lookup.clone();
        let tx = self.tx.clone();
        runtime.spawn(async move {
            let result = lookup.search_cities(&request.term, request.limit).await;
            // Receiver gone means the source was dropped mid-flight.
            let _ = tx.send(SearchOutcome {
                id: request.id,
                result,
            });
        });
        self.pending += 1;
    }

    /// Drain every outcome that has arrived. Never blocks.
    pub fn poll(&mut self) -> Vec<SearchOutcome> {
        let outcomes: Vec<SearchOutcome> = self.rx.try_iter().collect();
        self.note_received(outcomes.len());
        outcomes
    }

    /// Block for the next outcome, up to `timeout`.
    ///
    /// Returns `None` on timeout or if nothing is in flight.
    pub fn wait(&mut self, timeout: Duration) -> Option<SearchOutcome> {
        if self.pending == 0 {
            return None;
        }
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => {
                self.note_received(1);
                Some(outcome)
            }
            Err(RecvTimeoutError::Timeout) => {
                debug!(pending = self.pending, "Timed out waiting for search outcome");
                None
            }
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Lookups dispatched but not yet received.
    pub fn pending(&self) -> usize {
        self.pending
    }

    fn note_received(&mut self, count: usize) {
        self.pending = self.pending.saturating_sub(count);
    }
}

impl<L: CityLookup> Drop for FetchSource<L> {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl<L: CityLookup> std::fmt::Debug for FetchSource<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchSource")
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
