//! [`ResourceBackend`] implementations over the backend API client.
//!
//! One thin wrapper per resource kind; each implements only the mutations its
//! endpoints actually expose and inherits the rejection defaults for the rest.

use crate::console::ResourceBackend;
use async_trait::async_trait;
use casebook_client::ConsoleClient;
use casebook_ids::{CaseId, EvidenceId, OfficerId, ReportId, StatementId};
use casebook_protocol::{
    CaseDraft, CasePatch, CaseRecord, Evidence, EvidenceDraft, FetchError, ListQuery, Page, Report,
    ReportDraft, ReportPatch, RequestError, Statement, StatementDraft, StatementPatch,
};

pub struct CaseBackend {
    client: ConsoleClient,
}

impl CaseBackend {
    pub fn new(client: ConsoleClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceBackend<CaseRecord> for CaseBackend {
    async fn find(&self, query: &ListQuery) -> Result<Page<CaseRecord>, FetchError> {
        self.client.list_cases(query).await
    }

    async fn create(&self, draft: CaseDraft) -> Result<CaseRecord, RequestError> {
        self.client.create_case(&draft).await
    }

    async fn patch(&self, id: &CaseId, patch: CasePatch) -> Result<CaseRecord, RequestError> {
        match patch {
            CasePatch::Status(status) => self.client.set_case_status(id, status).await,
        }
    }

    async fn delete(&self, id: &CaseId) -> Result<(), RequestError> {
        self.client.delete_case(id).await
    }

    async fn assign(&self, id: &CaseId, officer: &OfficerId) -> Result<CaseRecord, RequestError> {
        self.client.assign_case(id, officer).await
    }
}

pub struct StatementBackend {
    client: ConsoleClient,
}

impl StatementBackend {
    pub fn new(client: ConsoleClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceBackend<Statement> for StatementBackend {
    async fn find(&self, query: &ListQuery) -> Result<Page<Statement>, FetchError> {
        self.client.list_statements(query).await
    }

    async fn create(&self, draft: StatementDraft) -> Result<Statement, RequestError> {
        self.client.create_statement(&draft).await
    }

    async fn patch(
        &self,
        id: &StatementId,
        patch: StatementPatch,
    ) -> Result<Statement, RequestError> {
        self.client.update_statement(id, &patch).await
    }

    async fn delete(&self, id: &StatementId) -> Result<(), RequestError> {
        self.client.delete_statement(id).await
    }
}

pub struct EvidenceBackend {
    client: ConsoleClient,
}

impl EvidenceBackend {
    pub fn new(client: ConsoleClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceBackend<Evidence> for EvidenceBackend {
    async fn find(&self, query: &ListQuery) -> Result<Page<Evidence>, FetchError> {
        self.client.list_evidence(query).await
    }

    async fn create(&self, draft: EvidenceDraft) -> Result<Evidence, RequestError> {
        self.client.create_evidence(&draft).await
    }

    async fn delete(&self, id: &EvidenceId) -> Result<(), RequestError> {
        self.client.delete_evidence(id).await
    }
}

pub struct ReportBackend {
    client: ConsoleClient,
}

impl ReportBackend {
    pub fn new(client: ConsoleClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceBackend<Report> for ReportBackend {
    async fn find(&self, query: &ListQuery) -> Result<Page<Report>, FetchError> {
        self.client.list_reports(query).await
    }

    async fn create(&self, draft: ReportDraft) -> Result<Report, RequestError> {
        self.client.create_report(&draft).await
    }

    async fn patch(&self, id: &ReportId, patch: ReportPatch) -> Result<Report, RequestError> {
        self.client.update_report(id, &patch).await
    }

    async fn delete(&self, id: &ReportId) -> Result<(), RequestError> {
        self.client.delete_report(id).await
    }
}
