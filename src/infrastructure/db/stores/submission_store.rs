use crate::infrastructure::db::database::DatabaseError;
use crate::infrastructure::db::dto::SubmissionRow;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionRepositoryError {
    NotFound,
    Conflict,
    InvalidInput,
    StorageUnavailable,
}

impl From<DatabaseError> for SubmissionRepositoryError {
    fn from(_: DatabaseError) -> Self {
        SubmissionRepositoryError::StorageUnavailable
    }
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Fetch a submission by its ID. Returns `None` if it doesn't exist.
    async fn get(
        &self,
        submission_id: uuid::Uuid,
    ) -> Result<Option<SubmissionRow>, SubmissionRepositoryError>;
    /// Create a submission and return exactly what was stored in the database.
    async fn insert(&self, row: &SubmissionRow) -> Result<SubmissionRow, SubmissionRepositoryError>;
    /// Delete a submission by its ID. Returns an error if it doesn't exist.
    async fn delete(&self, submission_id: uuid::Uuid) -> Result<(), SubmissionRepositoryError>;
}

/// A no-op submission store used when persistence is not configured.
pub struct DisabledSubmissionStore;

#[async_trait]
impl SubmissionStore for DisabledSubmissionStore {
    async fn get(
        &self,
        _submission_id: uuid::Uuid,
    ) -> Result<Option<SubmissionRow>, SubmissionRepositoryError> {
        Err(SubmissionRepositoryError::StorageUnavailable)
    }

    async fn insert(
        &self,
        _row: &SubmissionRow,
    ) -> Result<SubmissionRow, SubmissionRepositoryError> {
        Err(SubmissionRepositoryError::StorageUnavailable)
    }

    async fn delete(&self, _submission_id: uuid::Uuid) -> Result<(), SubmissionRepositoryError> {
        Err(SubmissionRepositoryError::StorageUnavailable)
    }
}
