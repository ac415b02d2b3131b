//! The record abstraction the list controller is generic over.

use casebook_ids::{CaseId, EvidenceId, ReportId, StatementId, UserId};
use casebook_protocol::{
    CaseDraft, CasePatch, CaseRecord, Evidence, EvidenceDraft, EvidencePatch, GeoPoint, Report,
    ReportDraft, ReportPatch, Statement, StatementDraft, StatementPatch,
};
use std::fmt;
use std::hash::Hash;

/// A backend-owned resource the controller holds a transient local copy of.
///
/// `Draft` is the create payload, `Patch` a single-field update. Resources
/// without updatable fields use an uninhabited `Patch`.
pub trait Record: Clone + Send + Sync + 'static {
    type Id: Clone + Eq + Hash + fmt::Display + Send + Sync + 'static;
    type Draft: Send + 'static;
    type Patch: Send + 'static;

    fn id(&self) -> &Self::Id;

    /// The account that created the record, when the backend reports it.
    /// Consulted by the delete capability check.
    fn author(&self) -> Option<&UserId>;

    /// Coordinates to enrich with a place name, if the record carries any.
    fn coordinates(&self) -> Option<GeoPoint>;
}

impl Record for CaseRecord {
    type Id = CaseId;
    type Draft = CaseDraft;
    type Patch = CasePatch;

    fn id(&self) -> &CaseId {
        &self.id
    }

    fn author(&self) -> Option<&UserId> {
        self.created_by.as_ref()
    }

    fn coordinates(&self) -> Option<GeoPoint> {
        self.location
    }
}

impl Record for Statement {
    type Id = StatementId;
    type Draft = StatementDraft;
    type Patch = StatementPatch;

    fn id(&self) -> &StatementId {
        &self.id
    }

    fn author(&self) -> Option<&UserId> {
        self.author.as_ref()
    }

    fn coordinates(&self) -> Option<GeoPoint> {
        None
    }
}

impl Record for Evidence {
    type Id = EvidenceId;
    type Draft = EvidenceDraft;
    type Patch = EvidencePatch;

    fn id(&self) -> &EvidenceId {
        &self.id
    }

    fn author(&self) -> Option<&UserId> {
        self.uploaded_by.as_ref()
    }

    fn coordinates(&self) -> Option<GeoPoint> {
        None
    }
}

impl Record for Report {
    type Id = ReportId;
    type Draft = ReportDraft;
    type Patch = ReportPatch;

    fn id(&self) -> &ReportId {
        &self.id
    }

    fn author(&self) -> Option<&UserId> {
        self.author.as_ref()
    }

    fn coordinates(&self) -> Option<GeoPoint> {
        None
    }
}
