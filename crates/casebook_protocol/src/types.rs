//! Resource records and session types.
//!
//! Field names follow the backend's camelCase convention; the record id is
//! serialized as `_id`. Status enums keep the backend's wire spelling and
//! expose `label()` for the human-readable form the console renders.

use casebook_ids::{CaseId, EvidenceId, OfficerId, ReportId, StatementId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role attached to an authenticated session.
///
/// New accounts default to `Officer`; `Admin` is granted server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Officer,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Officer => "officer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "officer" => Ok(Role::Officer),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// An authenticated session established at login.
///
/// Passed explicitly into every capability check; the console never reads
/// identity from ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub name: String,
    pub role: Role,
}

/// Reference to an officer, as embedded in assigned records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficerRef {
    #[serde(rename = "_id")]
    pub id: OfficerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Case lifecycle status. Wire names are historical; `label()` gives the
/// display form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Open,
    Pending,
    Closed,
}

impl CaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CaseStatus::Open => "open",
            CaseStatus::Pending => "pending",
            CaseStatus::Closed => "closed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CaseStatus::Open => "Pending",
            CaseStatus::Pending => "Under Investigation",
            CaseStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(CaseStatus::Open),
            "pending" => Ok(CaseStatus::Pending),
            "closed" => Ok(CaseStatus::Closed),
            other => Err(format!("unknown case status: {other}")),
        }
    }
}

/// A reported case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    #[serde(rename = "_id")]
    pub id: CaseId,
    pub title: String,
    #[serde(rename = "type")]
    pub case_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: CaseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_by_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<OfficerRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// The kind of person a statement was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Witness,
    Suspect,
    Victim,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Witness => "witness",
            StatementKind::Suspect => "suspect",
            StatementKind::Victim => "victim",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "witness" => Ok(StatementKind::Witness),
            "suspect" => Ok(StatementKind::Suspect),
            "victim" => Ok(StatementKind::Victim),
            other => Err(format!("unknown statement kind: {other}")),
        }
    }
}

/// Review status of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementStatus {
    Pending,
    Reviewed,
    Verified,
}

impl StatementStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            StatementStatus::Pending => "pending",
            StatementStatus::Reviewed => "reviewed",
            StatementStatus::Verified => "verified",
        }
    }
}

impl fmt::Display for StatementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatementStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(StatementStatus::Pending),
            "reviewed" => Ok(StatementStatus::Reviewed),
            "verified" => Ok(StatementStatus::Verified),
            other => Err(format!("unknown statement status: {other}")),
        }
    }
}

/// A recorded statement attached to a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    #[serde(rename = "_id")]
    pub id: StatementId,
    pub case_id: CaseId,
    pub person_name: String,
    #[serde(rename = "type")]
    pub kind: StatementKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub officer: Option<String>,
    pub narrative: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StatementStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// An evidence item attached to a case or statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    #[serde(rename = "_id")]
    pub id: EvidenceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<CaseId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement_id: Option<StatementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// Publication status of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Draft,
    Final,
}

impl ReportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::Draft => "draft",
            ReportStatus::Final => "final",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ReportStatus::Draft),
            "final" => Ok(ReportStatus::Final),
            other => Err(format!("unknown report status: {other}")),
        }
    }
}

/// An investigation report attached to a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "_id")]
    pub id: ReportId,
    pub case_id: CaseId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ReportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// One event on a case's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub title: String,
    pub actor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Response from `GET /cases/{id}/timeline`: the case plus its events in
/// chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseTimeline {
    pub case: CaseRecord,
    #[serde(rename = "timeline")]
    pub events: Vec<TimelineEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_record_roundtrip() {
        let json = r#"{
            "_id": "66f1a2b3c4d5e6f7a8b9c0d1",
            "title": "Market stall break-in",
            "type": "Burglary",
            "status": "open",
            "reportedByName": "A. Citizen",
            "assignedTo": {"_id": "off-7", "name": "J. Okello", "email": "jo@example.org"},
            "location": {"lat": 0.3476, "lng": 32.5825},
            "createdAt": "2025-03-14T09:30:00Z"
        }"#;
        let case: CaseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(case.status, CaseStatus::Open);
        assert_eq!(case.case_type, "Burglary");
        assert_eq!(case.assigned_to.as_ref().unwrap().name, "J. Okello");
        assert!(case.location.is_some());

        let back = serde_json::to_string(&case).unwrap();
        let reparsed: CaseRecord = serde_json::from_str(&back).unwrap();
        assert_eq!(reparsed, case);
    }

    #[test]
    fn test_case_status_wire_names_and_labels() {
        assert_eq!(
            serde_json::to_string(&CaseStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(CaseStatus::Open.label(), "Pending");
        assert_eq!(CaseStatus::Pending.label(), "Under Investigation");
        assert_eq!("closed".parse::<CaseStatus>().unwrap(), CaseStatus::Closed);
        assert!("resolved".parse::<CaseStatus>().is_err());
    }

    #[test]
    fn test_statement_type_field_name() {
        let json = r#"{
            "_id": "st-1",
            "caseId": "c-1",
            "personName": "M. Nankya",
            "type": "witness",
            "narrative": "Saw two men near the stall.",
            "createdAt": "2025-03-14T10:00:00Z"
        }"#;
        let stmt: Statement = serde_json::from_str(json).unwrap();
        assert_eq!(stmt.kind, StatementKind::Witness);
        assert!(stmt.status.is_none());
        let back = serde_json::to_string(&stmt).unwrap();
        assert!(back.contains("\"type\":\"witness\""));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("officer".parse::<Role>().unwrap(), Role::Officer);
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_report_status_roundtrip() {
        assert_eq!(
            serde_json::to_string(&ReportStatus::Final).unwrap(),
            "\"final\""
        );
        assert_eq!("draft".parse::<ReportStatus>().unwrap(), ReportStatus::Draft);
    }

    #[test]
    fn test_case_timeline_decoding() {
        let json = r#"{
            "case": {
                "_id": "c-1",
                "title": "Market stall break-in",
                "type": "Burglary",
                "status": "pending",
                "createdAt": "2025-03-14T09:30:00Z"
            },
            "timeline": [
                {
                    "title": "Case opened",
                    "actor": "A. Admin",
                    "description": "Reported at the central desk",
                    "timestamp": "2025-03-14T09:30:00Z"
                },
                {
                    "title": "Statement recorded",
                    "actor": "J. Okello",
                    "link": "/statements/st-1",
                    "timestamp": "2025-03-14T10:00:00Z"
                }
            ]
        }"#;
        let timeline: CaseTimeline = serde_json::from_str(json).unwrap();
        assert_eq!(timeline.case.status, CaseStatus::Pending);
        assert_eq!(timeline.events.len(), 2);
        assert_eq!(timeline.events[0].title, "Case opened");
        assert!(timeline.events[0].link.is_none());
        assert_eq!(timeline.events[1].link.as_deref(), Some("/statements/st-1"));
    }
}
