use crate::infrastructure::db::dto::FormRow;
use crate::infrastructure::db::stores::form_store::{FormRepositoryError, FormStore};
use std::sync::Arc;

pub struct FormRepository {
    store: Arc<dyn FormStore>,
}

impl FormRepository {
    /// Build a repository that uses the given store implementation.
    pub fn new(store: Arc<dyn FormStore>) -> Self {
        Self { store }
    }

    /// Fetch a form by its ID. Returns `None` if it doesn't exist.
    pub async fn get(&self, form_id: uuid::Uuid) -> Result<Option<FormRow>, FormRepositoryError> {
        self.store.get(form_id).await
    }

    /// Create a form and return what was stored in the database.
    pub async fn insert(&self, row: &FormRow) -> Result<FormRow, FormRepositoryError> {
        self.store.insert(row).await
    }

    /// Delete a form by its ID. Returns an error if it doesn't exist.
    pub async fn delete(&self, form_id: uuid::Uuid) -> Result<(), FormRepositoryError> {
        self.store.delete(form_id).await
    }
}
