use crate::infrastructure::db::dto::{DeliveryAttemptRow, DeliveryAttemptStats};
use crate::infrastructure::db::stores::delivery_attempt_store::{
    DeliveryAttemptRepositoryError, DeliveryAttemptStore,
};
use std::sync::Arc;

/// Store errors pass through untouched here. The delivery workflow tells a
/// `Conflict` (another delivery already started) apart from storage being
/// down, so collapsing variants would lose information it acts on.
pub struct DeliveryAttemptRepository {
    store: Arc<dyn DeliveryAttemptStore>,
}

impl DeliveryAttemptRepository {
    /// Build a repository that uses the given store implementation.
    pub fn new(store: Arc<dyn DeliveryAttemptStore>) -> Self {
        Self { store }
    }

    /// Fetch an attempt by its ID. Returns `None` if it doesn't exist.
    pub async fn get(
        &self,
        attempt_id: uuid::Uuid,
    ) -> Result<Option<DeliveryAttemptRow>, DeliveryAttemptRepositoryError> {
        self.store.get(attempt_id).await
    }

    /// List attempts for a submission, oldest first.
    pub async fn list_by_submission(
        &self,
        submission_id: uuid::Uuid,
    ) -> Result<Vec<DeliveryAttemptRow>, DeliveryAttemptRepositoryError> {
        self.store.list_by_submission(submission_id).await
    }

    /// Create an attempt and return what was stored in the database.
    pub async fn insert(
        &self,
        row: &DeliveryAttemptRow,
    ) -> Result<DeliveryAttemptRow, DeliveryAttemptRepositoryError> {
        self.store.insert(row).await
    }

    /// Update an attempt and return what was stored in the database.
    pub async fn update(
        &self,
        row: &DeliveryAttemptRow,
    ) -> Result<DeliveryAttemptRow, DeliveryAttemptRepositoryError> {
        self.store.update(row).await
    }

    /// Delete an attempt by its ID. Returns an error if it doesn't exist.
    pub async fn delete(
        &self,
        attempt_id: uuid::Uuid,
    ) -> Result<(), DeliveryAttemptRepositoryError> {
        self.store.delete(attempt_id).await
    }

    /// Return aggregate attempt counts by status.
    pub async fn stats(&self) -> Result<DeliveryAttemptStats, DeliveryAttemptRepositoryError> {
        self.store.stats().await
    }
}
