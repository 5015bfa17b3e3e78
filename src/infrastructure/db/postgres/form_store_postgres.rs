use crate::infrastructure::db::dto::FormRow;
use crate::infrastructure::db::postgres::PostgresDatabase;
use crate::infrastructure::db::stores::form_store::{FormRepositoryError, FormStore};
use async_trait::async_trait;
use sqlx::PgConnection;

#[derive(Clone)]
pub struct FormStorePostgres {
    db: std::sync::Arc<PostgresDatabase>,
}

impl FormStorePostgres {
    /// Build a Postgres-backed form store.
    pub fn new(db: std::sync::Arc<PostgresDatabase>) -> Self {
        Self { db }
    }

    async fn get_impl_conn(
        conn: &mut PgConnection,
        form_id: uuid::Uuid,
    ) -> Result<Option<FormRow>, FormRepositoryError> {
        let row = sqlx::query_as::<_, FormRow>(
            "SELECT
                id,
                title,
                webhook_enabled,
                webhook_url,
                webhook_method,
                webhook_headers,
                created_at,
                updated_at
            FROM forms
            WHERE id = $1",
        )
        .bind(form_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|_| FormRepositoryError::StorageUnavailable)?;

        Ok(row)
    }

    async fn insert_impl_conn(
        conn: &mut PgConnection,
        row: &FormRow,
    ) -> Result<FormRow, FormRepositoryError> {
        let stored = sqlx::query_as::<_, FormRow>(
            "INSERT INTO forms (
                id,
                title,
                webhook_enabled,
                webhook_url,
                webhook_method,
                webhook_headers,
                created_at,
                updated_at
            )
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
            RETURNING
                id,
                title,
                webhook_enabled,
                webhook_url,
                webhook_method,
                webhook_headers,
                created_at,
                updated_at",
        )
        .bind(row.id)
        .bind(&row.title)
        .bind(row.webhook_enabled)
        .bind(&row.webhook_url)
        .bind(&row.webhook_method)
        .bind(&row.webhook_headers)
        .bind(row.created_at)
        .bind(row.updated_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            if crate::infrastructure::db::database::is_unique_violation(&e) {
                FormRepositoryError::Conflict
            } else {
                FormRepositoryError::StorageUnavailable
            }
        })?;

        Ok(stored)
    }

    async fn delete_impl_conn(
        conn: &mut PgConnection,
        form_id: uuid::Uuid,
    ) -> Result<(), FormRepositoryError> {
        let result = sqlx::query("DELETE FROM forms WHERE id = $1")
            .bind(form_id)
            .execute(&mut *conn)
            .await
            .map_err(|_| FormRepositoryError::StorageUnavailable)?;

        if result.rows_affected() == 0 {
            return Err(FormRepositoryError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl FormStore for FormStorePostgres {
    async fn get(&self, form_id: uuid::Uuid) -> Result<Option<FormRow>, FormRepositoryError> {
        self.db
            .with_conn(move |conn| Box::pin(Self::get_impl_conn(conn, form_id)))
            .await
    }

    async fn insert(&self, row: &FormRow) -> Result<FormRow, FormRepositoryError> {
        let row = row.clone();
        self.db
            .with_conn(move |conn| {
                let row = row;
                Box::pin(async move { Self::insert_impl_conn(conn, &row).await })
            })
            .await
    }

    async fn delete(&self, form_id: uuid::Uuid) -> Result<(), FormRepositoryError> {
        self.db
            .with_conn(move |conn| Box::pin(Self::delete_impl_conn(conn, form_id)))
            .await
    }
}
