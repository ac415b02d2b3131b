//! Backend API Client
//!
//! One method per backend endpoint, JSON request and response bodies, bearer
//! auth on everything except login. List endpoints return a [`Page`] decoded
//! from the backend's per-resource envelope; mutation failures carry the
//! backend's `{msg}` body through [`RequestError::Rejected`].

use casebook_ids::{CaseId, EvidenceId, OfficerId, ReportId, StatementId};
use casebook_protocol::{
    CaseDraft, CasePatch, CaseRecord, CaseStatus, CaseTimeline, ErrorBody, Evidence, EvidenceDraft,
    FetchError, ListQuery, LoginRequest, LoginResponse, OfficerRef, Page, Pagination, Report,
    ReportDraft, ReportPatch, RequestError, Statement, StatementDraft, StatementPatch,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Default timeout for backend requests (15 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Envelope for `GET /cases`.
#[derive(Debug, Deserialize)]
struct CasesEnvelope {
    cases: Vec<CaseRecord>,
    pagination: Pagination,
}

/// Envelope for `GET /statements`.
#[derive(Debug, Deserialize)]
struct StatementsEnvelope {
    statements: Vec<Statement>,
    pagination: Pagination,
}

/// Envelope for `GET /evidence`.
#[derive(Debug, Deserialize)]
struct EvidenceEnvelope {
    evidence: Vec<Evidence>,
    pagination: Pagination,
}

/// Envelope for `GET /reports`.
#[derive(Debug, Deserialize)]
struct ReportsEnvelope {
    reports: Vec<Report>,
    pagination: Pagination,
}

/// Envelope for `GET /cases/officers`.
#[derive(Debug, Deserialize)]
struct OfficersEnvelope {
    officers: Vec<OfficerRef>,
}

/// Client for the record-management backend API
#[derive(Debug, Clone)]
pub struct ConsoleClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ConsoleClient {
    /// Create a client for the backend at the given base URL (no trailing slash)
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach a bearer token to every subsequent request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Decode a response, mapping non-2xx to `Rejected` with the `{msg}` body.
    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, RequestError> {
        let status = resp.status();
        if status.is_success() {
            return resp
                .json::<T>()
                .await
                .map_err(|e| RequestError::Transport(format!("invalid response body: {e}")));
        }
        let msg = match resp.json::<ErrorBody>().await {
            Ok(body) => body.msg,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        Err(RequestError::Rejected {
            status: status.as_u16(),
            msg,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, RequestError> {
        let resp = self
            .authed(self.http.get(self.url(path)).query(params))
            .send()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;
        Self::decode(resp).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<T, RequestError> {
        let resp = self
            .authed(self.http.post(self.url(path)).json(body))
            .send()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;
        Self::decode(resp).await
    }

    async fn patch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<T, RequestError> {
        let resp = self
            .authed(self.http.patch(self.url(path)).json(body))
            .send()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;
        Self::decode(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), RequestError> {
        let resp = self
            .authed(self.http.delete(self.url(path)))
            .send()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let msg = match resp.json::<ErrorBody>().await {
            Ok(body) => body.msg,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        Err(RequestError::Rejected {
            status: status.as_u16(),
            msg,
        })
    }

    // --- Auth ---

    /// `POST /auth/login`
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, RequestError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post_json("/auth/login", &body).await
    }

    // --- List endpoints ---

    /// `GET /cases`
    pub async fn list_cases(&self, query: &ListQuery) -> Result<Page<CaseRecord>, FetchError> {
        let env: CasesEnvelope = self
            .get_json("/cases", &query.to_params())
            .await
            .map_err(fetch_error)?;
        Ok(Page {
            items: env.cases,
            pagination: env.pagination,
        })
    }

    /// `GET /statements`
    pub async fn list_statements(&self, query: &ListQuery) -> Result<Page<Statement>, FetchError> {
        let env: StatementsEnvelope = self
            .get_json("/statements", &query.to_params())
            .await
            .map_err(fetch_error)?;
        Ok(Page {
            items: env.statements,
            pagination: env.pagination,
        })
    }

    /// `GET /evidence`
    pub async fn list_evidence(&self, query: &ListQuery) -> Result<Page<Evidence>, FetchError> {
        let env: EvidenceEnvelope = self
            .get_json("/evidence", &query.to_params())
            .await
            .map_err(fetch_error)?;
        Ok(Page {
            items: env.evidence,
            pagination: env.pagination,
        })
    }

    /// `GET /reports`
    pub async fn list_reports(&self, query: &ListQuery) -> Result<Page<Report>, FetchError> {
        let env: ReportsEnvelope = self
            .get_json("/reports", &query.to_params())
            .await
            .map_err(fetch_error)?;
        Ok(Page {
            items: env.reports,
            pagination: env.pagination,
        })
    }

    /// `GET /cases/officers` — assignable officers for the pickers
    pub async fn list_officers(&self) -> Result<Vec<OfficerRef>, RequestError> {
        let env: OfficersEnvelope = self.get_json("/cases/officers", &[]).await?;
        Ok(env.officers)
    }

    /// `GET /cases/{id}/timeline` — the case plus its chronological events
    pub async fn case_timeline(&self, id: &CaseId) -> Result<CaseTimeline, RequestError> {
        self.get_json(&format!("/cases/{id}/timeline"), &[]).await
    }

    // --- Case mutations ---

    /// `POST /cases`
    pub async fn create_case(&self, draft: &CaseDraft) -> Result<CaseRecord, RequestError> {
        self.post_json("/cases", draft).await
    }

    /// `PATCH /cases/{id}/status`
    pub async fn set_case_status(
        &self,
        id: &CaseId,
        status: CaseStatus,
    ) -> Result<CaseRecord, RequestError> {
        self.patch_json(
            &format!("/cases/{id}/status"),
            &CasePatch::Status(status).to_body(),
        )
        .await
    }

    /// `PATCH /cases/{id}/assign`
    pub async fn assign_case(
        &self,
        id: &CaseId,
        officer: &OfficerId,
    ) -> Result<CaseRecord, RequestError> {
        self.patch_json(
            &format!("/cases/{id}/assign"),
            &serde_json::json!({ "officerId": officer }),
        )
        .await
    }

    /// `DELETE /cases/{id}`
    pub async fn delete_case(&self, id: &CaseId) -> Result<(), RequestError> {
        self.delete(&format!("/cases/{id}")).await
    }

    // --- Statement mutations ---

    /// `POST /statements`
    pub async fn create_statement(
        &self,
        draft: &StatementDraft,
    ) -> Result<Statement, RequestError> {
        self.post_json("/statements", draft).await
    }

    /// `PATCH /statements/{id}`
    pub async fn update_statement(
        &self,
        id: &StatementId,
        patch: &StatementPatch,
    ) -> Result<Statement, RequestError> {
        self.patch_json(&format!("/statements/{id}"), &patch.to_body())
            .await
    }

    /// `DELETE /statements/{id}`
    pub async fn delete_statement(&self, id: &StatementId) -> Result<(), RequestError> {
        self.delete(&format!("/statements/{id}")).await
    }

    // --- Evidence mutations ---

    /// `POST /evidence`
    pub async fn create_evidence(&self, draft: &EvidenceDraft) -> Result<Evidence, RequestError> {
        self.post_json("/evidence", draft).await
    }

    /// `DELETE /evidence/{id}`
    pub async fn delete_evidence(&self, id: &EvidenceId) -> Result<(), RequestError> {
        self.delete(&format!("/evidence/{id}")).await
    }

    // --- Report mutations ---

    /// `POST /reports`
    pub async fn create_report(&self, draft: &ReportDraft) -> Result<Report, RequestError> {
        self.post_json("/reports", draft).await
    }

    /// `PATCH /reports/{id}`
    pub async fn update_report(
        &self,
        id: &ReportId,
        patch: &ReportPatch,
    ) -> Result<Report, RequestError> {
        self.patch_json(&format!("/reports/{id}"), &patch.to_body())
            .await
    }

    /// `DELETE /reports/{id}`
    pub async fn delete_report(&self, id: &ReportId) -> Result<(), RequestError> {
        self.delete(&format!("/reports/{id}")).await
    }
}

fn fetch_error(err: RequestError) -> FetchError {
    match err {
        RequestError::Rejected { status, msg } => FetchError::Rejected { status, msg },
        RequestError::Transport(msg) => FetchError::Transport(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ConsoleClient::new("http://localhost:5000/api/");
        assert_eq!(client.url("/cases"), "http://localhost:5000/api/cases");
    }

    #[test]
    fn test_cases_envelope_decoding() {
        let json = r#"{
            "cases": [{
                "_id": "c-1",
                "title": "Stolen bicycle",
                "type": "Theft",
                "status": "open",
                "createdAt": "2025-03-01T10:00:00Z"
            }],
            "pagination": {"current": 1, "pages": 3, "total": 27, "hasNext": true, "hasPrev": false}
        }"#;
        let env: CasesEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(env.cases.len(), 1);
        assert_eq!(env.cases[0].id.as_str(), "c-1");
        assert_eq!(env.pagination.total, 27);
        assert!(env.pagination.has_next);
    }

    #[test]
    fn test_fetch_error_preserves_status_and_msg() {
        let err = fetch_error(RequestError::Rejected {
            status: 401,
            msg: "Token expired".to_string(),
        });
        assert_eq!(
            err,
            FetchError::Rejected {
                status: 401,
                msg: "Token expired".to_string()
            }
        );
    }
}
