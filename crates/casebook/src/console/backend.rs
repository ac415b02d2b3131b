//! Backend seam the controller fetches and mutates through.

use super::record::Record;
use async_trait::async_trait;
use casebook_ids::OfficerId;
use casebook_protocol::{FetchError, ListQuery, Page, RequestError};

fn unsupported(op: &str) -> RequestError {
    RequestError::Rejected {
        status: 405,
        msg: format!("{op} is not supported for this resource"),
    }
}

/// Remote operations for one resource kind.
///
/// `find` is mandatory; mutations default to a 405-style rejection so each
/// backend only implements the operations its resource actually has.
#[async_trait]
pub trait ResourceBackend<R: Record>: Send + Sync {
    async fn find(&self, query: &ListQuery) -> Result<Page<R>, FetchError>;

    async fn create(&self, _draft: R::Draft) -> Result<R, RequestError> {
        Err(unsupported("create"))
    }

    async fn patch(&self, _id: &R::Id, _patch: R::Patch) -> Result<R, RequestError> {
        Err(unsupported("update"))
    }

    async fn delete(&self, _id: &R::Id) -> Result<(), RequestError> {
        Err(unsupported("delete"))
    }

    async fn assign(&self, _id: &R::Id, _officer: &OfficerId) -> Result<R, RequestError> {
        Err(unsupported("assign"))
    }
}
