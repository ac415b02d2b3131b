//! Race-safe paginated fetching.
//!
//! Every issued query is stamped with a monotonically increasing generation
//! token. Completions carry their token back; a completion is applied only if
//! its token matches the most recently issued one, so a slow early request can
//! never clobber the response to a later query. Transport-level requests are
//! not cancelled; stale results are simply discarded.

use super::backend::ResourceBackend;
use super::record::Record;
use casebook_protocol::{FetchError, ListQuery, Page};
use std::sync::Arc;
use tokio::sync::mpsc;

/// A completed fetch, tagged with the generation that issued it.
#[derive(Debug)]
pub struct FetchOutcome<R> {
    pub generation: u64,
    pub result: Result<Page<R>, FetchError>,
}

/// Issues list queries and funnels their completions back in arrival order.
pub struct FetchExecutor<R: Record> {
    backend: Arc<dyn ResourceBackend<R>>,
    latest: u64,
    /// True while the latest generation has not completed.
    outstanding: bool,
    tx: mpsc::UnboundedSender<FetchOutcome<R>>,
    rx: mpsc::UnboundedReceiver<FetchOutcome<R>>,
}

impl<R: Record> FetchExecutor<R> {
    pub fn new(backend: Arc<dyn ResourceBackend<R>>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            backend,
            latest: 0,
            outstanding: false,
            tx,
            rx,
        }
    }

    /// Spawn a fetch for `query` under a fresh generation token.
    pub fn issue(&mut self, query: ListQuery) -> u64 {
        self.latest += 1;
        self.outstanding = true;
        let generation = self.latest;
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = backend.find(&query).await;
            let _ = tx.send(FetchOutcome { generation, result });
        });
        generation
    }

    /// True while a request for the current generation is in flight. Stale
    /// completions do not clear this.
    pub fn is_loading(&self) -> bool {
        self.outstanding
    }

    /// A completion that is already waiting, if any.
    pub fn try_next(&mut self) -> Option<FetchOutcome<R>> {
        self.rx.try_recv().ok()
    }

    /// Await the next completion, in arrival order.
    pub async fn next_outcome(&mut self) -> FetchOutcome<R> {
        loop {
            // The sender half lives on self, so recv() can only yield Some.
            if let Some(outcome) = self.rx.recv().await {
                return outcome;
            }
        }
    }

    /// Whether `outcome` belongs to the latest issued query. Marks the
    /// generation settled when it does.
    pub fn accept(&mut self, outcome: &FetchOutcome<R>) -> bool {
        if outcome.generation == self.latest {
            self.outstanding = false;
            true
        } else {
            tracing::debug!(
                generation = outcome.generation,
                latest = self.latest,
                "Discarding stale fetch response"
            );
            false
        }
    }
}
