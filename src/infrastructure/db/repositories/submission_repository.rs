use crate::infrastructure::db::dto::SubmissionRow;
use crate::infrastructure::db::stores::submission_store::{
    SubmissionRepositoryError, SubmissionStore,
};
use std::sync::Arc;

pub struct SubmissionRepository {
    store: Arc<dyn SubmissionStore>,
}

impl SubmissionRepository {
    /// Build a repository that uses the given store implementation.
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self { store }
    }

    /// Fetch a submission by its ID. Returns `None` if it doesn't exist.
    pub async fn get(
        &self,
        submission_id: uuid::Uuid,
    ) -> Result<Option<SubmissionRow>, SubmissionRepositoryError> {
        self.store.get(submission_id).await
    }

    /// Create a submission and return what was stored in the database.
    pub async fn insert(
        &self,
        row: &SubmissionRow,
    ) -> Result<SubmissionRow, SubmissionRepositoryError> {
        self.store.insert(row).await
    }

    /// Delete a submission by its ID. Returns an error if it doesn't exist.
    pub async fn delete(&self, submission_id: uuid::Uuid) -> Result<(), SubmissionRepositoryError> {
        self.store.delete(submission_id).await
    }
}
