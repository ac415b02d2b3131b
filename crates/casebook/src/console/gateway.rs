//! Role-gated mutations with point reconciliation.
//!
//! Every mutation is checked against the session's capabilities before the
//! backend is contacted; an insufficient role short-circuits with a
//! permission error and no network call. On backend success the page store is
//! reconciled exactly once; on failure it is left untouched.

use super::backend::ResourceBackend;
use super::record::Record;
use super::store::PageStore;
use casebook_ids::{OfficerId, UserId};
use casebook_protocol::{MutationError, Role, Session};
use std::sync::Arc;

/// The capability a mutation variant requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    UpdateField,
    Delete,
    Assign,
}

/// The single capability check. `author` is the record's creator, consulted
/// only for deletion; no session denies everything.
pub fn can_perform(session: Option<&Session>, action: Action, author: Option<&UserId>) -> bool {
    let Some(session) = session else {
        return false;
    };
    match action {
        Action::Create => true,
        Action::UpdateField | Action::Assign => session.role == Role::Admin,
        Action::Delete => {
            session.role == Role::Admin || author.is_some_and(|a| *a == session.user_id)
        }
    }
}

/// One requested mutation against a resource collection.
pub enum MutationRequest<R: Record> {
    Create(R::Draft),
    UpdateField { id: R::Id, patch: R::Patch },
    Delete { id: R::Id },
    Assign { id: R::Id, officer: OfficerId },
}

impl<R: Record> MutationRequest<R> {
    pub fn action(&self) -> Action {
        match self {
            MutationRequest::Create(_) => Action::Create,
            MutationRequest::UpdateField { .. } => Action::UpdateField,
            MutationRequest::Delete { .. } => Action::Delete,
            MutationRequest::Assign { .. } => Action::Assign,
        }
    }
}

/// Performs mutations and reconciles the store on success.
pub struct MutationGateway<R: Record> {
    backend: Arc<dyn ResourceBackend<R>>,
}

impl<R: Record> MutationGateway<R> {
    pub fn new(backend: Arc<dyn ResourceBackend<R>>) -> Self {
        Self { backend }
    }

    /// Check capability, contact the backend, reconcile. Returns the updated
    /// record for create/update/assign, `None` for delete.
    pub async fn perform(
        &self,
        request: MutationRequest<R>,
        session: Option<&Session>,
        store: &mut PageStore<R>,
    ) -> Result<Option<R>, MutationError> {
        let author = match &request {
            MutationRequest::Delete { id } => store.get(id).and_then(Record::author).cloned(),
            _ => None,
        };
        if !can_perform(session, request.action(), author.as_ref()) {
            return Err(MutationError::Permission(
                "your role does not allow this action".to_string(),
            ));
        }

        match request {
            MutationRequest::Create(draft) => {
                let created = self.backend.create(draft).await?;
                store.upsert_one(created.clone());
                Ok(Some(created))
            }
            MutationRequest::UpdateField { id, patch } => {
                let updated = self.backend.patch(&id, patch).await?;
                store.patch_one(&id, |item| *item = updated.clone());
                Ok(Some(updated))
            }
            MutationRequest::Assign { id, officer } => {
                let updated = self.backend.assign(&id, &officer).await?;
                store.patch_one(&id, |item| *item = updated.clone());
                Ok(Some(updated))
            }
            MutationRequest::Delete { id } => {
                self.backend.delete(&id).await?;
                store.remove_one(&id);
                Ok(None)
            }
        }
    }
}
