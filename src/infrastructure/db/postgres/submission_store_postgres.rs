use crate::infrastructure::db::dto::SubmissionRow;
use crate::infrastructure::db::postgres::PostgresDatabase;
use crate::infrastructure::db::stores::submission_store::{
    SubmissionRepositoryError, SubmissionStore,
};
use async_trait::async_trait;
use sqlx::PgConnection;

#[derive(Clone)]
pub struct SubmissionStorePostgres {
    db: std::sync::Arc<PostgresDatabase>,
}

impl SubmissionStorePostgres {
    /// Build a Postgres-backed submission store.
    pub fn new(db: std::sync::Arc<PostgresDatabase>) -> Self {
        Self { db }
    }

    async fn get_impl_conn(
        conn: &mut PgConnection,
        submission_id: uuid::Uuid,
    ) -> Result<Option<SubmissionRow>, SubmissionRepositoryError> {
        let row = sqlx::query_as::<_, SubmissionRow>(
            "SELECT
                id,
                form_id,
                data,
                submitted_at
            FROM submissions
            WHERE id = $1",
        )
        .bind(submission_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|_| SubmissionRepositoryError::StorageUnavailable)?;

        Ok(row)
    }

    async fn insert_impl_conn(
        conn: &mut PgConnection,
        row: &SubmissionRow,
    ) -> Result<SubmissionRow, SubmissionRepositoryError> {
        let stored = sqlx::query_as::<_, SubmissionRow>(
            "INSERT INTO submissions (
                id,
                form_id,
                data,
                submitted_at
            )
            VALUES ($1,$2,$3,$4)
            RETURNING
                id,
                form_id,
                data,
                submitted_at",
        )
        .bind(row.id)
        .bind(row.form_id)
        .bind(&row.data)
        .bind(row.submitted_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            if crate::infrastructure::db::database::is_unique_violation(&e) {
                SubmissionRepositoryError::Conflict
            } else {
                SubmissionRepositoryError::StorageUnavailable
            }
        })?;

        Ok(stored)
    }

    async fn delete_impl_conn(
        conn: &mut PgConnection,
        submission_id: uuid::Uuid,
    ) -> Result<(), SubmissionRepositoryError> {
        let result = sqlx::query("DELETE FROM submissions WHERE id = $1")
            .bind(submission_id)
            .execute(&mut *conn)
            .await
            .map_err(|_| SubmissionRepositoryError::StorageUnavailable)?;

        if result.rows_affected() == 0 {
            return Err(SubmissionRepositoryError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl SubmissionStore for SubmissionStorePostgres {
    async fn get(
        &self,
        submission_id: uuid::Uuid,
    ) -> Result<Option<SubmissionRow>, SubmissionRepositoryError> {
        self.db
            .with_conn(move |conn| Box::pin(Self::get_impl_conn(conn, submission_id)))
            .await
    }

    async fn insert(&self, row: &SubmissionRow) -> Result<SubmissionRow, SubmissionRepositoryError> {
        let row = row.clone();
        self.db
            .with_conn(move |conn| {
                let row = row;
                Box::pin(async move { Self::insert_impl_conn(conn, &row).await })
            })
            .await
    }

    async fn delete(&self, submission_id: uuid::Uuid) -> Result<(), SubmissionRepositoryError> {
        self.db
            .with_conn(move |conn| Box::pin(Self::delete_impl_conn(conn, submission_id)))
            .await
    }
}
