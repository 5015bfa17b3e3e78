use crate::infrastructure::db::database::DatabaseError;
use crate::infrastructure::db::dto::{DeliveryAttemptRow, DeliveryAttemptStats};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryAttemptRepositoryError {
    NotFound,
    Conflict,
    InvalidInput,
    StorageUnavailable,
}

impl From<DatabaseError> for DeliveryAttemptRepositoryError {
    fn from(_: DatabaseError) -> Self {
        DeliveryAttemptRepositoryError::StorageUnavailable
    }
}

#[async_trait]
pub trait DeliveryAttemptStore: Send + Sync {
    /// Fetch an attempt by its ID. Returns `None` if it doesn't exist.
    async fn get(
        &self,
        attempt_id: uuid::Uuid,
    ) -> Result<Option<DeliveryAttemptRow>, DeliveryAttemptRepositoryError>;
    /// List attempts for a submission, oldest first.
    async fn list_by_submission(
        &self,
        submission_id: uuid::Uuid,
    ) -> Result<Vec<DeliveryAttemptRow>, DeliveryAttemptRepositoryError>;
    /// Create an attempt and return exactly what was stored in the database.
    /// Returns `Conflict` when an attempt with the same submission and
    /// attempt number already exists.
    async fn insert(
        &self,
        row: &DeliveryAttemptRow,
    ) -> Result<DeliveryAttemptRow, DeliveryAttemptRepositoryError>;
    /// Update an attempt and return exactly what was stored in the database.
    async fn update(
        &self,
        row: &DeliveryAttemptRow,
    ) -> Result<DeliveryAttemptRow, DeliveryAttemptRepositoryError>;
    /// Delete an attempt by its ID. Returns an error if it doesn't exist.
    async fn delete(&self, attempt_id: uuid::Uuid) -> Result<(), DeliveryAttemptRepositoryError>;
    /// Return aggregate attempt counts by status.
    async fn stats(&self) -> Result<DeliveryAttemptStats, DeliveryAttemptRepositoryError>;
}

/// A no-op attempt store used when persistence is not configured.
pub struct DisabledDeliveryAttemptStore;

#[async_trait]
impl DeliveryAttemptStore for DisabledDeliveryAttemptStore {
    async fn get(
        &self,
        _attempt_id: uuid::Uuid,
    ) -> Result<Option<DeliveryAttemptRow>, DeliveryAttemptRepositoryError> {
        Err(DeliveryAttemptRepositoryError::StorageUnavailable)
    }

    async fn list_by_submission(
        &self,
        _submission_id: uuid::Uuid,
    ) -> Result<Vec<DeliveryAttemptRow>, DeliveryAttemptRepositoryError> {
        Err(DeliveryAttemptRepositoryError::StorageUnavailable)
    }

    async fn insert(
        &self,
        _row: &DeliveryAttemptRow,
    ) -> Result<DeliveryAttemptRow, DeliveryAttemptRepositoryError> {
        Err(DeliveryAttemptRepositoryError::StorageUnavailable)
    }

    async fn update(
        &self,
        _row: &DeliveryAttemptRow,
    ) -> Result<DeliveryAttemptRow, DeliveryAttemptRepositoryError> {
        Err(DeliveryAttemptRepositoryError::StorageUnavailable)
    }

    async fn delete(&self, _attempt_id: uuid::Uuid) -> Result<(), DeliveryAttemptRepositoryError> {
        Err(DeliveryAttemptRepositoryError::StorageUnavailable)
    }

    async fn stats(&self) -> Result<DeliveryAttemptStats, DeliveryAttemptRepositoryError> {
        Err(DeliveryAttemptRepositoryError::StorageUnavailable)
    }
}
