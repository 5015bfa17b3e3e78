use crate::infrastructure::db::database::DatabaseError;
use crate::infrastructure::db::dto::FormRow;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRepositoryError {
    NotFound,
    Conflict,
    InvalidInput,
    StorageUnavailable,
}

impl From<DatabaseError> for FormRepositoryError {
    fn from(_: DatabaseError) -> Self {
        FormRepositoryError::StorageUnavailable
    }
}

#[async_trait]
pub trait FormStore: Send + Sync {
    /// Fetch a form by its ID. Returns `None` if it doesn't exist.
    async fn get(&self, form_id: uuid::Uuid) -> Result<Option<FormRow>, FormRepositoryError>;
    /// Create a form and return exactly what was stored in the database.
    async fn insert(&self, row: &FormRow) -> Result<FormRow, FormRepositoryError>;
    /// Delete a form by its ID. Returns an error if it doesn't exist.
    async fn delete(&self, form_id: uuid::Uuid) -> Result<(), FormRepositoryError>;
}

/// A no-op form store used when persistence is not configured.
pub struct DisabledFormStore;

#[async_trait]
impl FormStore for DisabledFormStore {
    async fn get(&self, _form_id: uuid::Uuid) -> Result<Option<FormRow>, FormRepositoryError> {
        Err(FormRepositoryError::StorageUnavailable)
    }

    async fn insert(&self, _row: &FormRow) -> Result<FormRow, FormRepositoryError> {
        Err(FormRepositoryError::StorageUnavailable)
    }

    async fn delete(&self, _form_id: uuid::Uuid) -> Result<(), FormRepositoryError> {
        Err(FormRepositoryError::StorageUnavailable)
    }
}
