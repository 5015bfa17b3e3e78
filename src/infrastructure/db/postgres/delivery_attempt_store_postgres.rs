use crate::infrastructure::db::database::is_unique_violation;
use crate::infrastructure::db::dto::{DeliveryAttemptRow, DeliveryAttemptStats};
use crate::infrastructure::db::postgres::PostgresDatabase;
use crate::infrastructure::db::stores::delivery_attempt_store::{
    DeliveryAttemptRepositoryError, DeliveryAttemptStore,
};
use async_trait::async_trait;
use sqlx::PgConnection;

#[derive(Clone)]
pub struct DeliveryAttemptStorePostgres {
    db: std::sync::Arc<PostgresDatabase>,
}

impl DeliveryAttemptStorePostgres {
    /// Build a Postgres-backed delivery attempt store.
    pub fn new(db: std::sync::Arc<PostgresDatabase>) -> Self {
        Self { db }
    }

    async fn get_impl_conn(
        conn: &mut PgConnection,
        attempt_id: uuid::Uuid,
    ) -> Result<Option<DeliveryAttemptRow>, DeliveryAttemptRepositoryError> {
        let row = sqlx::query_as::<_, DeliveryAttemptRow>(
            "SELECT
                id,
                form_id,
                submission_id,
                webhook_url,
                status,
                attempt_count,
                response_code,
                response_body,
                error_message,
                delivered_at,
                created_at,
                updated_at
            FROM delivery_attempts
            WHERE id = $1",
        )
        .bind(attempt_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|_| DeliveryAttemptRepositoryError::StorageUnavailable)?;

        Ok(row)
    }

    async fn list_by_submission_impl_conn(
        conn: &mut PgConnection,
        submission_id: uuid::Uuid,
    ) -> Result<Vec<DeliveryAttemptRow>, DeliveryAttemptRepositoryError> {
        let rows = sqlx::query_as::<_, DeliveryAttemptRow>(
            "SELECT
                id,
                form_id,
                submission_id,
                webhook_url,
                status,
                attempt_count,
                response_code,
                response_body,
                error_message,
                delivered_at,
                created_at,
                updated_at
            FROM delivery_attempts
            WHERE submission_id = $1
            ORDER BY attempt_count ASC",
        )
        .bind(submission_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|_| DeliveryAttemptRepositoryError::StorageUnavailable)?;

        Ok(rows)
    }

    async fn insert_impl_conn(
        conn: &mut PgConnection,
        row: &DeliveryAttemptRow,
    ) -> Result<DeliveryAttemptRow, DeliveryAttemptRepositoryError> {
        let stored = sqlx::query_as::<_, DeliveryAttemptRow>(
            "INSERT INTO delivery_attempts (
                id,
                form_id,
                submission_id,
                webhook_url,
                status,
                attempt_count,
                response_code,
                response_body,
                error_message,
                delivered_at,
                created_at,
                updated_at
            )
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12)
            RETURNING
                id,
                form_id,
                submission_id,
                webhook_url,
                status,
                attempt_count,
                response_code,
                response_body,
                error_message,
                delivered_at,
                created_at,
                updated_at",
        )
        .bind(row.id)
        .bind(row.form_id)
        .bind(row.submission_id)
        .bind(&row.webhook_url)
        .bind(&row.status)
        .bind(row.attempt_count)
        .bind(row.response_code)
        .bind(&row.response_body)
        .bind(&row.error_message)
        .bind(row.delivered_at)
        .bind(row.created_at)
        .bind(row.updated_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DeliveryAttemptRepositoryError::Conflict
            } else {
                DeliveryAttemptRepositoryError::StorageUnavailable
            }
        })?;

        Ok(stored)
    }

    async fn update_impl_conn(
        conn: &mut PgConnection,
        row: &DeliveryAttemptRow,
    ) -> Result<DeliveryAttemptRow, DeliveryAttemptRepositoryError> {
        let stored = sqlx::query_as::<_, DeliveryAttemptRow>(
            "UPDATE delivery_attempts SET
                status = $2,
                response_code = $3,
                response_body = $4,
                error_message = $5,
                delivered_at = $6,
                updated_at = $7
            WHERE id = $1
            RETURNING
                id,
                form_id,
                submission_id,
                webhook_url,
                status,
                attempt_count,
                response_code,
                response_body,
                error_message,
                delivered_at,
                created_at,
                updated_at",
        )
        .bind(row.id)
        .bind(&row.status)
        .bind(row.response_code)
        .bind(&row.response_body)
        .bind(&row.error_message)
        .bind(row.delivered_at)
        .bind(row.updated_at)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|_| DeliveryAttemptRepositoryError::StorageUnavailable)?;

        match stored {
            Some(row) => Ok(row),
            None => Err(DeliveryAttemptRepositoryError::NotFound),
        }
    }

    async fn delete_impl_conn(
        conn: &mut PgConnection,
        attempt_id: uuid::Uuid,
    ) -> Result<(), DeliveryAttemptRepositoryError> {
        let result = sqlx::query("DELETE FROM delivery_attempts WHERE id = $1")
            .bind(attempt_id)
            .execute(&mut *conn)
            .await
            .map_err(|_| DeliveryAttemptRepositoryError::StorageUnavailable)?;

        if result.rows_affected() == 0 {
            return Err(DeliveryAttemptRepositoryError::NotFound);
        }

        Ok(())
    }

    async fn stats_impl_conn(
        conn: &mut PgConnection,
    ) -> Result<DeliveryAttemptStats, DeliveryAttemptRepositoryError> {
        let stats = sqlx::query_as::<_, DeliveryAttemptStats>(
            "SELECT
                COALESCE(COUNT(*) FILTER (WHERE status = 'pending'), 0) AS pending,
                COALESCE(COUNT(*) FILTER (WHERE status = 'success'), 0) AS success,
                COALESCE(COUNT(*) FILTER (WHERE status = 'failed'), 0) AS failed
            FROM delivery_attempts",
        )
        .fetch_one(&mut *conn)
        .await
        .map_err(|_| DeliveryAttemptRepositoryError::StorageUnavailable)?;

        Ok(stats)
    }
}

#[async_trait]
impl DeliveryAttemptStore for DeliveryAttemptStorePostgres {
    async fn get(
        &self,
        attempt_id: uuid::Uuid,
    ) -> Result<Option<DeliveryAttemptRow>, DeliveryAttemptRepositoryError> {
        self.db
            .with_conn(move |conn| Box::pin(Self::get_impl_conn(conn, attempt_id)))
            .await
    }

    async fn list_by_submission(
        &self,
        submission_id: uuid::Uuid,
    ) -> Result<Vec<DeliveryAttemptRow>, DeliveryAttemptRepositoryError> {
        self.db
            .with_conn(move |conn| {
                Box::pin(Self::list_by_submission_impl_conn(conn, submission_id))
            })
            .await
    }

    async fn insert(
        &self,
        row: &DeliveryAttemptRow,
    ) -> Result<DeliveryAttemptRow, DeliveryAttemptRepositoryError> {
        let row = row.clone();
        self.db
            .with_conn(move |conn| {
                let row = row;
                Box::pin(async move { Self::insert_impl_conn(conn, &row).await })
            })
            .await
    }

    async fn update(
        &self,
        row: &DeliveryAttemptRow,
    ) -> Result<DeliveryAttemptRow, DeliveryAttemptRepositoryError> {
        let row = row.clone();
        self.db
            .with_conn(move |conn| {
                let row = row;
                Box::pin(async move { Self::update_impl_conn(conn, &row).await })
            })
            .await
    }

    async fn delete(&self, attempt_id: uuid::Uuid) -> Result<(), DeliveryAttemptRepositoryError> {
        self.db
            .with_conn(move |conn| Box::pin(Self::delete_impl_conn(conn, attempt_id)))
            .await
    }

    async fn stats(&self) -> Result<DeliveryAttemptStats, DeliveryAttemptRepositoryError> {
        self.db
            .with_conn(move |conn| Box::pin(Self::stats_impl_conn(conn)))
            .await
    }
}
