//! Debounced query building.
//!
//! Turns raw filter/sort/search edits into stable [`ListQuery`] descriptors.
//! Search edits are coalesced behind a quiet period; everything else emits
//! immediately. Every emission resets to page 1 except page navigation.

use casebook_ids::CaseId;
use casebook_protocol::{ListQuery, SortKey, SortOrder};
use std::time::Duration;
use tokio::time::Instant;

/// Quiet period after the last search edit before a descriptor is emitted.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// One raw user edit to the query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryEdit {
    /// Search text, debounced.
    Search(String),
    /// Status filter in the resource's wire spelling; `None` clears it.
    Status(Option<String>),
    /// Restrict to one case; `None` clears it.
    Case(Option<CaseId>),
    SortKey(SortKey),
    SortOrder(SortOrder),
    /// Jump to a page without resetting to page 1.
    Page(u32),
}

/// What an edit did to the builder.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// A new descriptor is ready; fetch now.
    Emit(ListQuery),
    /// A search edit was buffered; a descriptor emerges at [`QueryBuilder::deadline`].
    Deferred,
}

/// Coalesces raw edits into query descriptors.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    query: ListQuery,
    pending_search: Option<String>,
    deadline: Option<Instant>,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(ListQuery::default())
    }
}

impl QueryBuilder {
    pub fn new(query: ListQuery) -> Self {
        Self {
            query,
            pending_search: None,
            deadline: None,
        }
    }

    /// The descriptor of the last emission (ignores a buffered search edit).
    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// When the buffered search edit becomes due, if one is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Apply one edit. A search edit restarts the quiet period and supersedes
    /// any buffered value; only the last of a burst is ever emitted.
    pub fn apply(&mut self, edit: QueryEdit) -> EditOutcome {
        match edit {
            QueryEdit::Search(term) => {
                self.pending_search = Some(term);
                self.deadline = Some(Instant::now() + SEARCH_DEBOUNCE);
                EditOutcome::Deferred
            }
            QueryEdit::Status(status) => {
                self.query.status = status;
                self.emit_reset()
            }
            QueryEdit::Case(case) => {
                self.query.case = case;
                self.emit_reset()
            }
            QueryEdit::SortKey(key) => {
                self.query.sort_by = key;
                self.emit_reset()
            }
            QueryEdit::SortOrder(order) => {
                self.query.sort_order = order;
                self.emit_reset()
            }
            QueryEdit::Page(page) => {
                self.query.page = page.max(1);
                EditOutcome::Emit(self.query.clone())
            }
        }
    }

    /// Commit the buffered search edit. Call after [`deadline`](Self::deadline)
    /// has elapsed; returns `None` when nothing is pending.
    pub fn flush(&mut self) -> Option<ListQuery> {
        self.deadline = None;
        let term = self.pending_search.take()?;
        self.query.search = if term.is_empty() { None } else { Some(term) };
        self.query.page = 1;
        Some(self.query.clone())
    }

    fn emit_reset(&mut self) -> EditOutcome {
        self.query.page = 1;
        EditOutcome::Emit(self.query.clone())
    }
}
