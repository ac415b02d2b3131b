//! Request payloads for the mutation and auth endpoints.
//!
//! Drafts are the bodies submitted on create; patches are typed single-field
//! updates submitted as one-key JSON objects, matching the backend's
//! `PATCH {field: value}` contract.

use crate::types::{CaseStatus, GeoPoint, ReportStatus, Role, StatementKind, StatementStatus};
use casebook_ids::{CaseId, OfficerId, StatementId, UserId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Body for `POST /cases`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDraft {
    pub title: String,
    #[serde(rename = "type")]
    pub case_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_by_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<OfficerId>,
}

/// Body for `POST /statements`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementDraft {
    pub case_id: CaseId,
    pub person_name: String,
    #[serde(rename = "type")]
    pub kind: StatementKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub officer: Option<String>,
    pub narrative: String,
}

/// Body for `POST /evidence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<CaseId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement_id: Option<StatementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub file_name: String,
}

/// Body for `POST /reports`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    pub case_id: CaseId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Field-level update to a case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CasePatch {
    Status(CaseStatus),
}

impl CasePatch {
    pub fn to_body(&self) -> Value {
        match self {
            CasePatch::Status(status) => json!({ "status": status }),
        }
    }
}

/// Field-level update to a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementPatch {
    Narrative(String),
    Status(StatementStatus),
}

impl StatementPatch {
    pub fn to_body(&self) -> Value {
        match self {
            StatementPatch::Narrative(narrative) => json!({ "narrative": narrative }),
            StatementPatch::Status(status) => json!({ "status": status }),
        }
    }
}

/// Field-level update to a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportPatch {
    Title(String),
    Description(String),
    Status(ReportStatus),
}

impl ReportPatch {
    pub fn to_body(&self) -> Value {
        match self {
            ReportPatch::Title(title) => json!({ "title": title }),
            ReportPatch::Description(description) => json!({ "description": description }),
            ReportPatch::Status(status) => json!({ "status": status }),
        }
    }
}

/// Evidence records have no updatable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvidencePatch {}

impl EvidencePatch {
    pub fn to_body(&self) -> Value {
        match *self {}
    }
}

/// Body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Account summary embedded in the login response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    pub name: String,
    pub role: Role,
}

/// Response from `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserAccount,
}
