//! The current page of a remote collection, with point reconciliation.
//!
//! Mutation results are folded in without a refetch: created records are
//! prepended, updates applied in place, deletions removed. `total` is
//! advisory and may drift from server truth until the next fetch; it is
//! clamped at zero and never trusted for anything but display.

use super::record::Record;
use casebook_protocol::{Page, Pagination};

#[derive(Debug, Clone)]
pub struct PageStore<R: Record> {
    items: Vec<R>,
    pagination: Pagination,
}

impl<R: Record> Default for PageStore<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::empty(),
        }
    }
}

impl<R: Record> PageStore<R> {
    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn get(&self, id: &R::Id) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Replace the whole page after a fetch.
    pub fn replace_page(&mut self, page: Page<R>) {
        self.items = page.items;
        self.pagination = page.pagination;
    }

    /// Prepend a newly created record and bump the advisory total. If the id
    /// is already present the existing copy is replaced instead.
    pub fn upsert_one(&mut self, record: R) {
        if let Some(existing) = self.items.iter_mut().find(|item| item.id() == record.id()) {
            *existing = record;
            return;
        }
        self.items.insert(0, record);
        self.pagination.total += 1;
    }

    /// Remove by id and decrement the advisory total. No-op when the id is
    /// absent (already removed by a concurrent action).
    pub fn remove_one(&mut self, id: &R::Id) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        if self.items.len() == before {
            return false;
        }
        self.pagination.total = self.pagination.total.saturating_sub(1);
        true
    }

    /// Apply an in-place update to the record with `id`. No-op when the id is
    /// not on the current page (it may have scrolled off under a concurrent
    /// refetch); best-effort reconciliation, not a consistency guarantee.
    pub fn patch_one(&mut self, id: &R::Id, update: impl FnOnce(&mut R)) -> bool {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                update(item);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casebook_ids::CaseId;
    use casebook_protocol::{CaseRecord, CaseStatus};

    fn case(id: &str, title: &str) -> CaseRecord {
        CaseRecord {
            id: CaseId::parse(id).unwrap(),
            title: title.to_string(),
            case_type: "Theft".to_string(),
            description: None,
            status: CaseStatus::Open,
            reported_by_name: None,
            assigned_to: None,
            location: None,
            created_by: None,
            // Fixed timestamp so fixtures built at different instants compare equal.
            created_at: chrono::DateTime::UNIX_EPOCH,
        }
    }

    fn store_with(items: Vec<CaseRecord>, total: u64) -> PageStore<CaseRecord> {
        let mut store = PageStore::default();
        store.replace_page(Page {
            pagination: Pagination::for_page(1, total, 10),
            items,
        });
        store
    }

    #[test]
    fn test_upsert_prepends_and_bumps_total() {
        let mut store = store_with(vec![case("a", "First")], 1);
        store.upsert_one(case("b", "Second"));
        assert_eq!(store.items()[0].id.as_str(), "b");
        assert_eq!(store.pagination().total, 2);
    }

    #[test]
    fn test_upsert_existing_replaces_without_duplicate() {
        let mut store = store_with(vec![case("a", "First")], 1);
        store.upsert_one(case("a", "Renamed"));
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].title, "Renamed");
        assert_eq!(store.pagination().total, 1);
    }

    #[test]
    fn test_remove_is_idempotent_and_total_never_negative() {
        let mut store = store_with(vec![case("a", "Only")], 0);
        assert!(store.remove_one(&CaseId::parse("a").unwrap()));
        assert_eq!(store.pagination().total, 0);
        assert!(!store.remove_one(&CaseId::parse("a").unwrap()));
        assert_eq!(store.pagination().total, 0);
    }

    #[test]
    fn test_patch_composes_on_disjoint_fields() {
        let id = CaseId::parse("a").unwrap();
        let mut sequential = store_with(vec![case("a", "Original")], 1);
        sequential.patch_one(&id, |c| c.status = CaseStatus::Closed);
        sequential.patch_one(&id, |c| c.title = "Updated".to_string());

        let mut composed = store_with(vec![case("a", "Original")], 1);
        composed.patch_one(&id, |c| {
            c.status = CaseStatus::Closed;
            c.title = "Updated".to_string();
        });

        assert_eq!(sequential.items()[0], composed.items()[0]);
    }

    #[test]
    fn test_patch_absent_id_is_noop() {
        let mut store = store_with(vec![case("a", "Only")], 1);
        let touched = store.patch_one(&CaseId::parse("zz").unwrap(), |c| {
            c.status = CaseStatus::Closed;
        });
        assert!(!touched);
        assert_eq!(store.items()[0].status, CaseStatus::Open);
    }
}
