//! The paginated resource controller.
//!
//! One instance keeps one remote, filterable, sortable, paginated collection
//! synchronized with local state: edits flow through the debounced
//! [`QueryBuilder`], fetches through the generation-stamped [`FetchExecutor`]
//! into the [`PageStore`], mutations through the role-gated
//! [`MutationGateway`], and coordinates through the [`PlaceCache`].

pub mod backend;
pub mod enrich;
pub mod fetch;
pub mod gateway;
pub mod query;
pub mod record;
pub mod store;

pub use backend::ResourceBackend;
pub use enrich::{fallback_label, CoordKey, PlaceCache};
pub use fetch::{FetchExecutor, FetchOutcome};
pub use gateway::{can_perform, Action, MutationGateway, MutationRequest};
pub use query::{EditOutcome, QueryBuilder, QueryEdit, SEARCH_DEBOUNCE};
pub use record::Record;
pub use store::PageStore;

use casebook_ids::OfficerId;
use casebook_protocol::{FetchError, ListQuery, MutationError, Pagination, Session};
use std::sync::Arc;

/// A list view over one resource collection.
pub struct ListController<R: Record> {
    builder: QueryBuilder,
    fetcher: FetchExecutor<R>,
    store: PageStore<R>,
    gateway: MutationGateway<R>,
    session: Option<Session>,
    error: Option<FetchError>,
}

impl<R: Record> ListController<R> {
    pub fn new(backend: Arc<dyn ResourceBackend<R>>, session: Option<Session>) -> Self {
        Self::with_query(backend, session, ListQuery::default())
    }

    /// Start from a non-default descriptor (pre-set filters, page size).
    pub fn with_query(
        backend: Arc<dyn ResourceBackend<R>>,
        session: Option<Session>,
        query: ListQuery,
    ) -> Self {
        Self {
            builder: QueryBuilder::new(query),
            fetcher: FetchExecutor::new(Arc::clone(&backend)),
            store: PageStore::default(),
            gateway: MutationGateway::new(backend),
            session,
            error: None,
        }
    }

    pub fn items(&self) -> &[R] {
        self.store.items()
    }

    /// Descriptor of the last emitted query.
    pub fn query(&self) -> &ListQuery {
        self.builder.query()
    }

    pub fn pagination(&self) -> &Pagination {
        self.store.pagination()
    }

    pub fn is_loading(&self) -> bool {
        self.fetcher.is_loading()
    }

    /// The page-level error from the last fetch, cleared by the next
    /// successful one.
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Whether the current session may perform `action` on the record with
    /// `id` (relevant for deletion's authorship rule).
    pub fn may(&self, action: Action, id: Option<&R::Id>) -> bool {
        let author = id
            .and_then(|id| self.store.get(id))
            .and_then(Record::author);
        can_perform(self.session.as_ref(), action, author)
    }

    /// Issue the initial fetch for the current descriptor.
    pub fn start(&mut self) {
        self.fetcher.issue(self.builder.query().clone());
    }

    /// Apply one user edit. Non-search edits fetch immediately; search edits
    /// arm the debounce and are issued by [`settle`](Self::settle) once the
    /// quiet period elapses.
    pub fn apply_edit(&mut self, edit: QueryEdit) {
        if let EditOutcome::Emit(query) = self.builder.apply(edit) {
            self.fetcher.issue(query);
        }
    }

    /// Go to the next page; no-op when already on the last.
    pub fn next_page(&mut self) {
        let pagination = *self.store.pagination();
        if pagination.has_next {
            self.apply_edit(QueryEdit::Page(pagination.current + 1));
        }
    }

    /// Go to the previous page; no-op when already on the first.
    pub fn prev_page(&mut self) {
        let pagination = *self.store.pagination();
        if pagination.has_prev {
            self.apply_edit(QueryEdit::Page(pagination.current - 1));
        }
    }

    /// Drive the controller until no debounce deadline is pending and the
    /// latest fetch has been absorbed. Stale responses are discarded on the
    /// way through.
    pub async fn settle(&mut self) {
        loop {
            match self.builder.deadline() {
                Some(deadline) => {
                    let completion = tokio::select! {
                        _ = tokio::time::sleep_until(deadline) => None,
                        outcome = self.fetcher.next_outcome() => Some(outcome),
                    };
                    match completion {
                        Some(outcome) => self.absorb(outcome),
                        None => {
                            if let Some(query) = self.builder.flush() {
                                self.fetcher.issue(query);
                            }
                        }
                    }
                }
                None => {
                    // Discard any stale completions that are already waiting.
                    while let Some(outcome) = self.fetcher.try_next() {
                        self.absorb(outcome);
                    }
                    if !self.fetcher.is_loading() {
                        return;
                    }
                    let outcome = self.fetcher.next_outcome().await;
                    self.absorb(outcome);
                }
            }
        }
    }

    /// Perform a mutation under the current session. The store is reconciled
    /// at most once, and only after backend acknowledgement.
    pub async fn perform(
        &mut self,
        request: MutationRequest<R>,
    ) -> Result<Option<R>, MutationError> {
        self.gateway
            .perform(request, self.session.as_ref(), &mut self.store)
            .await
    }

    /// Convenience for [`MutationRequest::Assign`].
    pub async fn assign(
        &mut self,
        id: R::Id,
        officer: OfficerId,
    ) -> Result<Option<R>, MutationError> {
        self.perform(MutationRequest::Assign { id, officer }).await
    }

    fn absorb(&mut self, outcome: FetchOutcome<R>) {
        if !self.fetcher.accept(&outcome) {
            return;
        }
        match outcome.result {
            Ok(page) => {
                self.store.replace_page(page);
                self.error = None;
            }
            Err(err) => {
                tracing::warn!("List fetch failed: {err}");
                self.error = Some(err);
            }
        }
    }
}
