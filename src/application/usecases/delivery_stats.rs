// Use case: delivery_stats.

use crate::application::context::AppContext;
use crate::infrastructure::db::dto::DeliveryAttemptStats;

/// Returns aggregate delivery attempt counts by status.
pub struct DeliveryStatsUseCase;

#[derive(Debug)]
pub enum DeliveryStatsError {
    Storage(String),
}

impl DeliveryStatsUseCase {
    pub async fn execute(ctx: &AppContext) -> Result<DeliveryAttemptStats, DeliveryStatsError> {
        ctx.repos
            .delivery_attempt
            .stats()
            .await
            .map_err(|e| DeliveryStatsError::Storage(format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{DeliveryStatsError, DeliveryStatsUseCase};
    use crate::application::context::test_support::test_context;
    use crate::infrastructure::db::dto::{DeliveryAttemptRow, DeliveryAttemptStats};
    use crate::infrastructure::db::repositories::delivery_attempt_repository::DeliveryAttemptRepository;
    use crate::infrastructure::db::stores::delivery_attempt_store::{
        DeliveryAttemptRepositoryError, DeliveryAttemptStore,
    };
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FixedStatsStore {
        stats: DeliveryAttemptStats,
    }

    #[async_trait]
    impl DeliveryAttemptStore for FixedStatsStore {
        async fn get(
            &self,
            _attempt_id: uuid::Uuid,
        ) -> Result<Option<DeliveryAttemptRow>, DeliveryAttemptRepositoryError> {
            Ok(None)
        }

        async fn list_by_submission(
            &self,
            _submission_id: uuid::Uuid,
        ) -> Result<Vec<DeliveryAttemptRow>, DeliveryAttemptRepositoryError> {
            Ok(Vec::new())
        }

        async fn insert(
            &self,
            row: &DeliveryAttemptRow,
        ) -> Result<DeliveryAttemptRow, DeliveryAttemptRepositoryError> {
            Ok(row.clone())
        }

        async fn update(
            &self,
            row: &DeliveryAttemptRow,
        ) -> Result<DeliveryAttemptRow, DeliveryAttemptRepositoryError> {
            Ok(row.clone())
        }

        async fn delete(
            &self,
            _attempt_id: uuid::Uuid,
        ) -> Result<(), DeliveryAttemptRepositoryError> {
            Ok(())
        }

        async fn stats(&self) -> Result<DeliveryAttemptStats, DeliveryAttemptRepositoryError> {
            Ok(self.stats)
        }
    }

    #[tokio::test]
    async fn given_recorded_attempts_when_stats_requested_should_return_counts() {
        let store = FixedStatsStore {
            stats: DeliveryAttemptStats {
                pending: 1,
                success: 4,
                failed: 2,
            },
        };
        let mut ctx = test_context();
        ctx.repos.delivery_attempt = Arc::new(DeliveryAttemptRepository::new(Arc::new(store)));

        let stats = DeliveryStatsUseCase::execute(&ctx).await.unwrap();

        assert_eq!(stats.pending, 1);
        assert_eq!(stats.success, 4);
        assert_eq!(stats.failed, 2);
    }

    #[tokio::test]
    async fn given_store_down_when_stats_requested_should_return_storage_error() {
        let ctx = test_context();

        let result = DeliveryStatsUseCase::execute(&ctx).await;

        assert!(matches!(result, Err(DeliveryStatsError::Storage(_))));
    }
}
