//! Wire types for the Casebook console.
//!
//! Everything the console exchanges with the record-management backend lives
//! here: resource records, the list query descriptor, page envelopes, and the
//! structured error body. All types use serde for JSON serialization with the
//! backend's camelCase field naming.

pub mod error;
pub mod payloads;
pub mod query;
pub mod types;

pub use error::{ErrorBody, FetchError, MutationError, RequestError};
pub use payloads::{
    CaseDraft, CasePatch, EvidenceDraft, EvidencePatch, LoginRequest, LoginResponse, ReportDraft,
    ReportPatch, StatementDraft, StatementPatch, UserAccount,
};
pub use query::{ListQuery, Page, Pagination, SortKey, SortOrder, DEFAULT_PAGE_SIZE};
pub use types::{
    CaseRecord, CaseStatus, CaseTimeline, Evidence, GeoPoint, OfficerRef, Report, ReportStatus,
    Role, Session, Statement, StatementKind, StatementStatus, TimelineEvent,
};
