use std::sync::Arc;

use crate::infrastructure::db::database::{Database, DatabaseError};
use crate::infrastructure::db::postgres::PostgresDatabase;
use crate::infrastructure::db::postgres::delivery_attempt_store_postgres::DeliveryAttemptStorePostgres;
use crate::infrastructure::db::postgres::form_store_postgres::FormStorePostgres;
use crate::infrastructure::db::postgres::submission_store_postgres::SubmissionStorePostgres;
use crate::infrastructure::db::repositories::delivery_attempt_repository::DeliveryAttemptRepository;
use crate::infrastructure::db::repositories::form_repository::FormRepository;
use crate::infrastructure::db::repositories::submission_repository::SubmissionRepository;

#[derive(Clone)]
pub struct Repositories {
    pub db: Option<Arc<PostgresDatabase>>,
    pub form: Arc<FormRepository>,
    pub submission: Arc<SubmissionRepository>,
    pub delivery_attempt: Arc<DeliveryAttemptRepository>,
}

impl Repositories {
    /// Build all repositories backed by Postgres stores.
    pub fn postgres(db: Arc<PostgresDatabase>) -> Self {
        let form_store = Arc::new(FormStorePostgres::new(db.clone()));
        let submission_store = Arc::new(SubmissionStorePostgres::new(db.clone()));
        let attempt_store = Arc::new(DeliveryAttemptStorePostgres::new(db.clone()));

        Self {
            db: Some(db.clone()),
            form: Arc::new(FormRepository::new(form_store)),
            submission: Arc::new(SubmissionRepository::new(submission_store)),
            delivery_attempt: Arc::new(DeliveryAttemptRepository::new(attempt_store)),
        }
    }

    /// Execute a raw SQL statement, used by the readiness probe.
    pub async fn execute(&self, query: &str) -> Result<u64, DatabaseError> {
        let Some(db) = self.db.as_ref() else {
            return Err(DatabaseError::Connection("db_unavailable".to_string()));
        };
        db.execute(query).await
    }
}
