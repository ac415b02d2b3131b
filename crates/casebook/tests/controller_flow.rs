//! End-to-end controller behavior against a scripted in-memory backend:
//! debounce coalescing, stale-response discarding, pagination bounds,
//! role-gated mutations, and point reconciliation.

use async_trait::async_trait;
use casebook::console::{
    Action, ListController, MutationRequest, QueryEdit, ResourceBackend, SEARCH_DEBOUNCE,
};
use casebook_ids::{CaseId, OfficerId, ReportId, StatementId, UserId};
use casebook_protocol::{
    CaseDraft, CasePatch, CaseRecord, CaseStatus, FetchError, ListQuery, MutationError, OfficerRef,
    Page, Pagination, Report, ReportPatch, ReportStatus, RequestError, Role, Session, Statement,
    StatementKind, StatementPatch,
};
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn case(id: &str, title: &str, author: Option<&str>) -> CaseRecord {
    CaseRecord {
        id: CaseId::parse(id).unwrap(),
        title: title.to_string(),
        case_type: "Theft".to_string(),
        description: None,
        status: CaseStatus::Open,
        reported_by_name: None,
        assigned_to: None,
        location: None,
        created_by: author.map(|a| UserId::parse(a).unwrap()),
        created_at: Utc::now(),
    }
}

fn session(id: &str, role: Role) -> Session {
    Session {
        user_id: UserId::parse(id).unwrap(),
        name: "Test".to_string(),
        role,
    }
}

/// Scripted backend over a fixed 25-record collection. Records every list
/// query and mutation; `find_delay` lets tests make early requests resolve
/// late.
struct ScriptedBackend {
    finds: Mutex<Vec<ListQuery>>,
    find_delays: Mutex<Vec<Duration>>,
    /// Author stamped on every served record.
    record_author: Mutex<Option<String>>,
    patches: AtomicUsize,
    deletes: AtomicUsize,
    creates: AtomicUsize,
}

impl ScriptedBackend {
    fn new() -> Self {
        Self {
            finds: Mutex::new(Vec::new()),
            find_delays: Mutex::new(Vec::new()),
            record_author: Mutex::new(None),
            patches: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            creates: AtomicUsize::new(0),
        }
    }

    fn set_record_author(&self, author: Option<&str>) {
        *self.record_author.lock().unwrap() = author.map(str::to_string);
    }

    /// Queue per-request delays for upcoming `find` calls.
    fn delay_next(&self, delays: &[Duration]) {
        self.find_delays.lock().unwrap().extend_from_slice(delays);
    }

    fn recorded_finds(&self) -> Vec<ListQuery> {
        self.finds.lock().unwrap().clone()
    }

    fn page_for(&self, query: &ListQuery) -> Page<CaseRecord> {
        let author = self.record_author.lock().unwrap().clone();
        let total = 25;
        let pagination = Pagination::for_page(query.page, total, query.limit);
        let start = (pagination.current - 1) * query.limit;
        let end = (start + query.limit).min(total as u32);
        let items = (start..end)
            .map(|i| {
                let marker = query
                    .search
                    .clone()
                    .unwrap_or_else(|| format!("page-{}", pagination.current));
                case(
                    &format!("case-{i}"),
                    &format!("{marker} #{i}"),
                    author.as_deref(),
                )
            })
            .collect();
        Page { items, pagination }
    }
}

#[async_trait]
impl ResourceBackend<CaseRecord> for ScriptedBackend {
    async fn find(&self, query: &ListQuery) -> Result<Page<CaseRecord>, FetchError> {
        let delay = {
            let mut delays = self.find_delays.lock().unwrap();
            if delays.is_empty() {
                Duration::from_millis(1)
            } else {
                delays.remove(0)
            }
        };
        self.finds.lock().unwrap().push(query.clone());
        tokio::time::sleep(delay).await;
        Ok(self.page_for(query))
    }

    async fn create(&self, draft: CaseDraft) -> Result<CaseRecord, RequestError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        Ok(case("case-new", &draft.title, None))
    }

    async fn patch(&self, id: &CaseId, patch: CasePatch) -> Result<CaseRecord, RequestError> {
        self.patches.fetch_add(1, Ordering::SeqCst);
        let CasePatch::Status(status) = patch;
        let mut updated = case(id.as_str(), "patched", None);
        updated.status = status;
        Ok(updated)
    }

    async fn delete(&self, _id: &CaseId) -> Result<(), RequestError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn assign(&self, id: &CaseId, officer: &OfficerId) -> Result<CaseRecord, RequestError> {
        let mut updated = case(id.as_str(), "assigned", None);
        updated.assigned_to = Some(OfficerRef {
            id: officer.clone(),
            name: "J. Okello".to_string(),
            email: None,
        });
        Ok(updated)
    }
}

fn controller(
    backend: &Arc<ScriptedBackend>,
    session: Option<Session>,
) -> ListController<CaseRecord> {
    ListController::new(Arc::clone(backend) as Arc<dyn ResourceBackend<CaseRecord>>, session)
}

#[tokio::test(start_paused = true)]
async fn search_burst_issues_exactly_one_fetch() {
    let backend = Arc::new(ScriptedBackend::new());
    let mut ctl = controller(&backend, Some(session("u-1", Role::Officer)));
    ctl.start();
    ctl.settle().await;
    assert_eq!(backend.recorded_finds().len(), 1);

    ctl.apply_edit(QueryEdit::Search("theft".to_string()));
    tokio::time::advance(Duration::from_millis(300)).await;
    ctl.apply_edit(QueryEdit::Search("theft case".to_string()));
    ctl.settle().await;

    let finds = backend.recorded_finds();
    assert_eq!(finds.len(), 2, "burst must add exactly one fetch");
    assert_eq!(finds[1].search.as_deref(), Some("theft case"));
    assert_eq!(finds[1].page, 1);
    assert!(ctl.items().iter().all(|c| c.title.contains("theft case")));
}

#[tokio::test(start_paused = true)]
async fn quiet_period_restarts_on_each_edit() {
    let backend = Arc::new(ScriptedBackend::new());
    let mut ctl = controller(&backend, None);

    ctl.apply_edit(QueryEdit::Search("th".to_string()));
    tokio::time::advance(SEARCH_DEBOUNCE - Duration::from_millis(100)).await;
    // Still inside the window: nothing issued yet.
    assert!(backend.recorded_finds().is_empty());
    ctl.apply_edit(QueryEdit::Search("the".to_string()));
    ctl.settle().await;

    let finds = backend.recorded_finds();
    assert_eq!(finds.len(), 1);
    assert_eq!(finds[0].search.as_deref(), Some("the"));
}

#[tokio::test(start_paused = true)]
async fn stale_response_never_overwrites_fresh_page() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.delay_next(&[Duration::from_millis(200), Duration::from_millis(10)]);
    let mut ctl = controller(&backend, None);

    ctl.apply_edit(QueryEdit::Status(Some("open".to_string())));
    ctl.apply_edit(QueryEdit::Status(None));
    ctl.settle().await;

    // The fast second response is on screen.
    assert_eq!(ctl.query().status, None);
    let titles: Vec<_> = ctl.items().iter().map(|c| c.title.clone()).collect();

    // Let the slow first response arrive, then make sure it was discarded.
    tokio::time::advance(Duration::from_millis(300)).await;
    ctl.settle().await;
    let after: Vec<_> = ctl.items().iter().map(|c| c.title.clone()).collect();
    assert_eq!(titles, after);
}

#[tokio::test(start_paused = true)]
async fn pagination_stops_at_the_last_page() {
    let backend = Arc::new(ScriptedBackend::new());
    let mut ctl = ListController::with_query(
        Arc::clone(&backend) as Arc<dyn ResourceBackend<CaseRecord>>,
        None,
        ListQuery {
            page: 2,
            ..ListQuery::default()
        },
    );
    ctl.start();
    ctl.settle().await;
    assert_eq!(ctl.pagination().current, 2);
    assert!(ctl.pagination().has_next && ctl.pagination().has_prev);

    ctl.next_page();
    ctl.settle().await;
    assert_eq!(ctl.pagination().current, 3);
    assert!(!ctl.pagination().has_next);
    assert!(ctl.pagination().has_prev);
    assert_eq!(ctl.items().len(), 5);

    // Clicking next on the last page is a no-op: no extra fetch.
    let fetches_before = backend.recorded_finds().len();
    ctl.next_page();
    ctl.settle().await;
    assert_eq!(backend.recorded_finds().len(), fetches_before);
    assert_eq!(ctl.pagination().current, 3);
}

#[tokio::test(start_paused = true)]
async fn admin_status_change_patches_in_place() {
    let backend = Arc::new(ScriptedBackend::new());
    let mut ctl = controller(&backend, Some(session("u-1", Role::Admin)));
    ctl.start();
    ctl.settle().await;

    let id = ctl.items()[3].id.clone();
    let total_before = ctl.pagination().total;
    let len_before = ctl.items().len();

    let updated = ctl
        .perform(MutationRequest::UpdateField {
            id: id.clone(),
            patch: CasePatch::Status(CaseStatus::Closed),
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, CaseStatus::Closed);

    assert_eq!(ctl.items().len(), len_before, "no duplicate rows");
    assert_eq!(ctl.pagination().total, total_before);
    let row = ctl.items().iter().find(|c| c.id == id).unwrap();
    assert_eq!(row.status, CaseStatus::Closed);
}

#[tokio::test(start_paused = true)]
async fn officer_status_change_short_circuits_before_network() {
    let backend = Arc::new(ScriptedBackend::new());
    let mut ctl = controller(&backend, Some(session("u-1", Role::Officer)));
    ctl.start();
    ctl.settle().await;

    let id = ctl.items()[0].id.clone();
    let before = ctl.items().to_vec();

    let err = ctl
        .perform(MutationRequest::UpdateField {
            id,
            patch: CasePatch::Status(CaseStatus::Closed),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, MutationError::Permission(_)));
    assert_eq!(backend.patches.load(Ordering::SeqCst), 0);
    assert_eq!(ctl.items(), &before[..], "store untouched");
}

#[tokio::test(start_paused = true)]
async fn no_session_denies_creation() {
    let backend = Arc::new(ScriptedBackend::new());
    let mut ctl = controller(&backend, None);

    let err = ctl
        .perform(MutationRequest::Create(CaseDraft {
            title: "Anonymous".to_string(),
            case_type: "Theft".to_string(),
            description: None,
            reported_by_name: None,
            location: None,
            assigned_to: None,
        }))
        .await
        .unwrap_err();
    assert!(matches!(err, MutationError::Permission(_)));
    assert_eq!(backend.creates.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn create_prepends_and_bumps_total() {
    let backend = Arc::new(ScriptedBackend::new());
    let mut ctl = controller(&backend, Some(session("u-1", Role::Officer)));
    ctl.start();
    ctl.settle().await;
    let total_before = ctl.pagination().total;

    ctl.perform(MutationRequest::Create(CaseDraft {
        title: "Fresh".to_string(),
        case_type: "Theft".to_string(),
        description: None,
        reported_by_name: None,
        location: None,
        assigned_to: None,
    }))
    .await
    .unwrap();

    assert_eq!(ctl.items()[0].title, "Fresh");
    assert_eq!(ctl.pagination().total, total_before + 1);
    assert_eq!(backend.creates.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn officer_may_delete_only_own_records() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.set_record_author(Some("someone-else"));
    let mut ctl = controller(&backend, Some(session("u-1", Role::Officer)));
    ctl.start();
    ctl.settle().await;

    // Authored by someone else: denied before the network.
    let foreign = ctl.items()[0].id.clone();
    assert!(!ctl.may(Action::Delete, Some(&foreign)));
    let err = ctl
        .perform(MutationRequest::Delete { id: foreign })
        .await
        .unwrap_err();
    assert!(matches!(err, MutationError::Permission(_)));
    assert_eq!(backend.deletes.load(Ordering::SeqCst), 0);

    // Re-fetch a page whose records the officer authored: allowed, removed,
    // total decremented.
    backend.set_record_author(Some("u-1"));
    ctl.apply_edit(QueryEdit::Page(1));
    ctl.settle().await;
    let own = ctl.items()[0].id.clone();
    assert!(ctl.may(Action::Delete, Some(&own)));
    let total_before = ctl.pagination().total;
    ctl.perform(MutationRequest::Delete { id: own.clone() })
        .await
        .unwrap();
    assert_eq!(backend.deletes.load(Ordering::SeqCst), 1);
    assert!(ctl.items().iter().all(|c| c.id != own));
    assert_eq!(ctl.pagination().total, total_before - 1);
}

#[tokio::test(start_paused = true)]
async fn assign_requires_admin_and_patches_in_place() {
    let backend = Arc::new(ScriptedBackend::new());
    let mut ctl = controller(&backend, Some(session("u-1", Role::Officer)));
    ctl.start();
    ctl.settle().await;
    let id = ctl.items()[0].id.clone();
    let officer = OfficerId::parse("off-7").unwrap();

    let err = ctl.assign(id.clone(), officer.clone()).await.unwrap_err();
    assert!(matches!(err, MutationError::Permission(_)));

    let mut admin_ctl = controller(&backend, Some(session("u-2", Role::Admin)));
    admin_ctl.start();
    admin_ctl.settle().await;
    let updated = admin_ctl.assign(id.clone(), officer).await.unwrap().unwrap();
    assert_eq!(updated.assigned_to.as_ref().unwrap().name, "J. Okello");
    let row = admin_ctl.items().iter().find(|c| c.id == id).unwrap();
    assert!(row.assigned_to.is_some());
}

/// Backend over a single statement; `patch` applies the update in place.
struct SingleStatement {
    current: Mutex<Statement>,
}

#[async_trait]
impl ResourceBackend<Statement> for SingleStatement {
    async fn find(&self, query: &ListQuery) -> Result<Page<Statement>, FetchError> {
        Ok(Page {
            items: vec![self.current.lock().unwrap().clone()],
            pagination: Pagination::for_page(1, 1, query.limit),
        })
    }

    async fn patch(
        &self,
        _id: &StatementId,
        patch: StatementPatch,
    ) -> Result<Statement, RequestError> {
        let mut current = self.current.lock().unwrap();
        match patch {
            StatementPatch::Narrative(narrative) => current.narrative = narrative,
            StatementPatch::Status(status) => current.status = Some(status),
        }
        Ok(current.clone())
    }
}

#[tokio::test(start_paused = true)]
async fn narrative_edit_patches_statement_in_place() {
    let backend = Arc::new(SingleStatement {
        current: Mutex::new(Statement {
            id: StatementId::parse("st-1").unwrap(),
            case_id: CaseId::parse("c-1").unwrap(),
            person_name: "M. Nankya".to_string(),
            kind: StatementKind::Witness,
            officer: None,
            narrative: "Saw two men near the stall.".to_string(),
            status: None,
            author: None,
            created_at: Utc::now(),
        }),
    });
    let mut ctl: ListController<Statement> =
        ListController::new(backend.clone(), Some(session("u-1", Role::Admin)));
    ctl.start();
    ctl.settle().await;

    let id = ctl.items()[0].id.clone();
    let updated = ctl
        .perform(MutationRequest::UpdateField {
            id: id.clone(),
            patch: StatementPatch::Narrative("Saw three men near the stall.".to_string()),
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.narrative, "Saw three men near the stall.");
    assert_eq!(ctl.items().len(), 1);
    assert_eq!(ctl.items()[0].narrative, "Saw three men near the stall.");
    assert_eq!(
        backend.current.lock().unwrap().narrative,
        "Saw three men near the stall."
    );
}

/// Backend over a single report; `patch` applies the update in place.
struct SingleReport {
    current: Mutex<Report>,
}

#[async_trait]
impl ResourceBackend<Report> for SingleReport {
    async fn find(&self, query: &ListQuery) -> Result<Page<Report>, FetchError> {
        Ok(Page {
            items: vec![self.current.lock().unwrap().clone()],
            pagination: Pagination::for_page(1, 1, query.limit),
        })
    }

    async fn patch(&self, _id: &ReportId, patch: ReportPatch) -> Result<Report, RequestError> {
        let mut current = self.current.lock().unwrap();
        match patch {
            ReportPatch::Title(title) => current.title = title,
            ReportPatch::Description(description) => current.description = Some(description),
            ReportPatch::Status(status) => current.status = status,
        }
        Ok(current.clone())
    }
}

#[tokio::test(start_paused = true)]
async fn report_title_and_description_edits_compose() {
    let backend = Arc::new(SingleReport {
        current: Mutex::new(Report {
            id: ReportId::parse("r-1").unwrap(),
            case_id: CaseId::parse("c-1").unwrap(),
            title: "Initial findings".to_string(),
            description: None,
            status: ReportStatus::Draft,
            author: None,
            created_at: Utc::now(),
        }),
    });
    let mut ctl: ListController<Report> =
        ListController::new(backend.clone(), Some(session("u-1", Role::Admin)));
    ctl.start();
    ctl.settle().await;
    let id = ctl.items()[0].id.clone();

    ctl.perform(MutationRequest::UpdateField {
        id: id.clone(),
        patch: ReportPatch::Title("Revised findings".to_string()),
    })
    .await
    .unwrap();
    ctl.perform(MutationRequest::UpdateField {
        id: id.clone(),
        patch: ReportPatch::Description("Fingerprint match confirmed.".to_string()),
    })
    .await
    .unwrap();

    let row = &ctl.items()[0];
    assert_eq!(row.title, "Revised findings");
    assert_eq!(row.description.as_deref(), Some("Fingerprint match confirmed."));
    assert_eq!(row.status, ReportStatus::Draft);
}

#[tokio::test(start_paused = true)]
async fn fetch_error_is_cleared_by_next_success() {
    struct FailingOnce {
        failed: AtomicUsize,
        inner: ScriptedBackend,
    }

    #[async_trait]
    impl ResourceBackend<CaseRecord> for FailingOnce {
        async fn find(&self, query: &ListQuery) -> Result<Page<CaseRecord>, FetchError> {
            if self.failed.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(FetchError::Transport("connection refused".to_string()));
            }
            self.inner.find(query).await
        }
    }

    let backend = Arc::new(FailingOnce {
        failed: AtomicUsize::new(0),
        inner: ScriptedBackend::new(),
    });
    let mut ctl: ListController<CaseRecord> = ListController::new(backend, None);
    ctl.start();
    ctl.settle().await;
    assert!(matches!(ctl.error(), Some(FetchError::Transport(_))));

    ctl.apply_edit(QueryEdit::Page(1));
    ctl.settle().await;
    assert!(ctl.error().is_none());
    assert!(!ctl.items().is_empty());
}
