use std::sync::Arc;

use crate::config::Settings;
use crate::domain::workflows::retry_policy::RetryPolicy;
use crate::infrastructure::db::repositories::Repositories;
use crate::infrastructure::http::WebhookTransport;

/// Shared application resources used by use cases.
pub struct AppContext {
    pub repos: Repositories,
    pub transport: Arc<dyn WebhookTransport>,
    pub settings: Settings,
}

impl AppContext {
    /// Build a new application context with shared repositories, the webhook
    /// transport, and loaded settings.
    pub fn new(repos: Repositories, transport: Arc<dyn WebhookTransport>, settings: Settings) -> Self {
        Self {
            repos,
            transport,
            settings,
        }
    }

    /// The backoff schedule configured for webhook deliveries.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.settings.webhook_delivery.max_attempts,
            base_delay_ms: self.settings.webhook_delivery.backoff_base_ms,
            max_delay_ms: self.settings.webhook_delivery.backoff_max_ms,
        }
    }
}

#[cfg(test)]
pub mod test_support {
    use super::AppContext;
    use crate::config::{Db, Observability, Server, Settings, WebhookDelivery};
    use crate::infrastructure::db::dto::{
        DeliveryAttemptRow, DeliveryAttemptStats, FormRow, SubmissionRow,
    };
    use crate::infrastructure::db::repositories::Repositories;
    use crate::infrastructure::db::repositories::delivery_attempt_repository::DeliveryAttemptRepository;
    use crate::infrastructure::db::repositories::form_repository::FormRepository;
    use crate::infrastructure::db::repositories::submission_repository::SubmissionRepository;
    use crate::infrastructure::db::stores::delivery_attempt_store::{
        DeliveryAttemptRepositoryError, DeliveryAttemptStore,
    };
    use crate::infrastructure::db::stores::form_store::{FormRepositoryError, FormStore};
    use crate::infrastructure::db::stores::submission_store::{
        SubmissionRepositoryError, SubmissionStore,
    };
    use crate::infrastructure::http::{DispatchOutcome, WebhookRequest, WebhookTransport};
    use async_trait::async_trait;
    use std::sync::Arc;

    #[derive(Clone)]
    pub struct NullFormStore;

    #[async_trait]
    impl FormStore for NullFormStore {
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

    #[derive(Clone)]
    pub struct NullSubmissionStore;

    #[async_trait]
    impl SubmissionStore for NullSubmissionStore {
        async fn get(
            &self,
            _submission_id: uuid::Uuid,
        ) -> Result<Option<SubmissionRow>, SubmissionRepositoryError> {
            Err(SubmissionRepositoryError::StorageUnavailable)
        }

        async fn insert(
            &self,
            _row: &SubmissionRow,
        ) -> Result<SubmissionRow, SubmissionRepositoryError> {
            Err(SubmissionRepositoryError::StorageUnavailable)
        }

        async fn delete(
            &self,
            _submission_id: uuid::Uuid,
        ) -> Result<(), SubmissionRepositoryError> {
            Err(SubmissionRepositoryError::StorageUnavailable)
        }
    }

    #[derive(Clone)]
    pub struct NullDeliveryAttemptStore;

    #[async_trait]
    impl DeliveryAttemptStore for NullDeliveryAttemptStore {
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

        async fn delete(
            &self,
            _attempt_id: uuid::Uuid,
        ) -> Result<(), DeliveryAttemptRepositoryError> {
            Err(DeliveryAttemptRepositoryError::StorageUnavailable)
        }

        async fn stats(&self) -> Result<DeliveryAttemptStats, DeliveryAttemptRepositoryError> {
            Err(DeliveryAttemptRepositoryError::StorageUnavailable)
        }
    }

    /// A transport that refuses every request; tests swap in their own.
    pub struct NullTransport;

    #[async_trait]
    impl WebhookTransport for NullTransport {
        async fn send(&self, _request: &WebhookRequest) -> DispatchOutcome {
            DispatchOutcome {
                ok: false,
                status_code: None,
                body_text: None,
                error: Some("transport disabled".to_string()),
            }
        }
    }

    pub fn test_settings() -> Settings {
        Settings {
            server: Server {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            db: Db {
                url: "postgres://localhost/unused".to_string(),
                max_connections: 1,
            },
            webhook_delivery: WebhookDelivery {
                request_timeout_ms: 2000,
                max_attempts: 3,
                backoff_base_ms: 1000,
                backoff_max_ms: 30000,
            },
            observability: Observability {
                service_name: "formrelay-test".to_string(),
                enable_metrics: false,
            },
        }
    }

    pub fn test_context() -> AppContext {
        // Step 1: Build repositories backed by null stores (tests override as needed).
        let repos = Repositories {
            db: None,
            form: Arc::new(FormRepository::new(Arc::new(NullFormStore))),
            submission: Arc::new(SubmissionRepository::new(Arc::new(NullSubmissionStore))),
            delivery_attempt: Arc::new(DeliveryAttemptRepository::new(Arc::new(
                NullDeliveryAttemptStore,
            ))),
        };
        // Step 2: Return a context with a refusing transport and test settings.
        AppContext {
            repos,
            transport: Arc::new(NullTransport),
            settings: test_settings(),
        }
    }
}
