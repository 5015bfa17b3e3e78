// Use case: trigger_delivery.

use crate::application::context::AppContext;
use crate::application::usecases::deliver_submission::{
    DeliverSubmissionError, DeliverSubmissionResult, DeliverSubmissionUseCase,
};
use crate::domain::entities::submission::SubmissionDataError;
use tracing::info;

/// Entry point for one webhook delivery: resolves the form and submission,
/// screens disabled configs, then hands off to the delivery sequence.
pub struct TriggerDeliveryUseCase;

#[derive(Debug)]
pub enum TriggerDeliveryError {
    FormNotFound,
    SubmissionNotFound,
    InvalidData(String),
    AlreadyInProgress,
    Storage(String),
}

#[derive(Debug, Clone)]
pub struct TriggerDeliveryCommand {
    pub submission_id: uuid::Uuid,
    pub form_id: uuid::Uuid,
}

#[derive(Debug, Clone)]
pub enum TriggerDeliveryOutcome {
    /// Webhooks are not enabled for the form; nothing was attempted.
    Skipped,
    Delivered {
        status_code: u16,
        attempts: u32,
    },
    Failed {
        error: String,
        attempts: u32,
    },
}

impl TriggerDeliveryUseCase {
    pub async fn execute(
        ctx: &AppContext,
        cmd: TriggerDeliveryCommand,
    ) -> Result<TriggerDeliveryOutcome, TriggerDeliveryError> {
        // Step 1: Load the form; its webhook config is read fresh here and
        // snapshotted for the whole sequence.
        let form_row = ctx
            .repos
            .form
            .get(cmd.form_id)
            .await
            .map_err(|e| TriggerDeliveryError::Storage(format!("{e:?}")))?
            .ok_or(TriggerDeliveryError::FormNotFound)?;
        let form = form_row.into_form();

        // Step 2: Load the submission scoped to the form. A submission that
        // belongs to a different form is treated as absent.
        let submission_row = ctx
            .repos
            .submission
            .get(cmd.submission_id)
            .await
            .map_err(|e| TriggerDeliveryError::Storage(format!("{e:?}")))?
            .ok_or(TriggerDeliveryError::SubmissionNotFound)?;
        if submission_row.form_id != cmd.form_id {
            return Err(TriggerDeliveryError::SubmissionNotFound);
        }

        // Step 3: Disabled or unconfigured webhooks short-circuit to success
        // without writing anything.
        if form.webhook.target().is_none() {
            info!(form_id = %form.id, submission_id = %cmd.submission_id, "webhooks not enabled; skipping delivery");
            return Ok(TriggerDeliveryOutcome::Skipped);
        }

        // Step 4: Validate the stored answers into the typed union before
        // any attempt row exists.
        let submission = submission_row.try_into_submission().map_err(
            |SubmissionDataError::Invalid(detail)| TriggerDeliveryError::InvalidData(detail),
        )?;

        // Step 5: Run the delivery sequence and surface its verdict.
        let result = DeliverSubmissionUseCase::execute(ctx, &form, &submission)
            .await
            .map_err(|e| match e {
                DeliverSubmissionError::AlreadyInProgress => {
                    TriggerDeliveryError::AlreadyInProgress
                }
            })?;

        Ok(match result {
            DeliverSubmissionResult::Delivered {
                status_code,
                attempts,
            } => {
                info!(
                    form_id = %form.id,
                    submission_id = %submission.id,
                    status_code,
                    attempts,
                    "webhook delivered"
                );
                TriggerDeliveryOutcome::Delivered {
                    status_code,
                    attempts,
                }
            }
            DeliverSubmissionResult::Failed { error, attempts } => {
                info!(
                    form_id = %form.id,
                    submission_id = %submission.id,
                    attempts,
                    error = %error,
                    "webhook delivery failed"
                );
                TriggerDeliveryOutcome::Failed { error, attempts }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{
        TriggerDeliveryCommand, TriggerDeliveryError, TriggerDeliveryOutcome,
        TriggerDeliveryUseCase,
    };
    use crate::application::context::AppContext;
    use crate::application::context::test_support::test_context;
    use crate::domain::entities::form::{Form, WebhookConfig, WebhookMethod};
    use crate::domain::value_objects::ids::FormId;
    use crate::domain::value_objects::timestamps::Timestamp;
    use crate::infrastructure::db::dto::{
        DeliveryAttemptRow, DeliveryAttemptStats, FormRow, SubmissionRow,
    };
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
    use serde_json::json;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::{Arc, Mutex};
    use time::OffsetDateTime;

    struct DummyFormStore {
        rows: Mutex<HashMap<uuid::Uuid, FormRow>>,
    }

    impl DummyFormStore {
        fn with(rows: Vec<FormRow>) -> Self {
            Self {
                rows: Mutex::new(rows.into_iter().map(|row| (row.id, row)).collect()),
            }
        }
    }

    #[async_trait]
    impl FormStore for DummyFormStore {
        async fn get(&self, form_id: uuid::Uuid) -> Result<Option<FormRow>, FormRepositoryError> {
            Ok(self.rows.lock().unwrap().get(&form_id).cloned())
        }

        async fn insert(&self, row: &FormRow) -> Result<FormRow, FormRepositoryError> {
            self.rows.lock().unwrap().insert(row.id, row.clone());
            Ok(row.clone())
        }

        async fn delete(&self, form_id: uuid::Uuid) -> Result<(), FormRepositoryError> {
            match self.rows.lock().unwrap().remove(&form_id) {
                Some(_) => Ok(()),
                None => Err(FormRepositoryError::NotFound),
            }
        }
    }

    struct DummySubmissionStore {
        rows: Mutex<HashMap<uuid::Uuid, SubmissionRow>>,
    }

    impl DummySubmissionStore {
        fn with(rows: Vec<SubmissionRow>) -> Self {
            Self {
                rows: Mutex::new(rows.into_iter().map(|row| (row.id, row)).collect()),
            }
        }
    }

    #[async_trait]
    impl SubmissionStore for DummySubmissionStore {
        async fn get(
            &self,
            submission_id: uuid::Uuid,
        ) -> Result<Option<SubmissionRow>, SubmissionRepositoryError> {
            Ok(self.rows.lock().unwrap().get(&submission_id).cloned())
        }

        async fn insert(
            &self,
            row: &SubmissionRow,
        ) -> Result<SubmissionRow, SubmissionRepositoryError> {
            self.rows.lock().unwrap().insert(row.id, row.clone());
            Ok(row.clone())
        }

        async fn delete(
            &self,
            submission_id: uuid::Uuid,
        ) -> Result<(), SubmissionRepositoryError> {
            match self.rows.lock().unwrap().remove(&submission_id) {
                Some(_) => Ok(()),
                None => Err(SubmissionRepositoryError::NotFound),
            }
        }
    }

    struct RecordingAttemptStore {
        rows: Mutex<HashMap<uuid::Uuid, DeliveryAttemptRow>>,
    }

    impl RecordingAttemptStore {
        fn new() -> Self {
            Self {
                rows: Mutex::new(HashMap::new()),
            }
        }

        fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl DeliveryAttemptStore for RecordingAttemptStore {
        async fn get(
            &self,
            attempt_id: uuid::Uuid,
        ) -> Result<Option<DeliveryAttemptRow>, DeliveryAttemptRepositoryError> {
            Ok(self.rows.lock().unwrap().get(&attempt_id).cloned())
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
            self.rows.lock().unwrap().insert(row.id, row.clone());
            Ok(row.clone())
        }

        async fn update(
            &self,
            row: &DeliveryAttemptRow,
        ) -> Result<DeliveryAttemptRow, DeliveryAttemptRepositoryError> {
            self.rows.lock().unwrap().insert(row.id, row.clone());
            Ok(row.clone())
        }

        async fn delete(
            &self,
            _attempt_id: uuid::Uuid,
        ) -> Result<(), DeliveryAttemptRepositoryError> {
            Ok(())
        }

        async fn stats(&self) -> Result<DeliveryAttemptStats, DeliveryAttemptRepositoryError> {
            Ok(DeliveryAttemptStats {
                pending: 0,
                success: 0,
                failed: 0,
            })
        }
    }

    struct FixedTransport {
        outcome: DispatchOutcome,
        sent: Mutex<usize>,
    }

    impl FixedTransport {
        fn ok() -> Self {
            Self {
                outcome: DispatchOutcome {
                    ok: true,
                    status_code: Some(200),
                    body_text: Some("ok".to_string()),
                    error: None,
                },
                sent: Mutex::new(0),
            }
        }

        fn sent_count(&self) -> usize {
            *self.sent.lock().unwrap()
        }
    }

    #[async_trait]
    impl WebhookTransport for FixedTransport {
        async fn send(&self, _request: &WebhookRequest) -> DispatchOutcome {
            *self.sent.lock().unwrap() += 1;
            self.outcome.clone()
        }
    }

    fn form_row(webhook: WebhookConfig) -> FormRow {
        let form = Form {
            id: FormId::new(),
            title: "Customer intake".to_string(),
            webhook,
            created_at: Timestamp::now_utc(),
            updated_at: Timestamp::now_utc(),
        };
        FormRow::from_form(&form)
    }

    fn enabled_webhook() -> WebhookConfig {
        WebhookConfig {
            enabled: true,
            url: Some("https://hooks.example.com/intake".to_string()),
            method: WebhookMethod::Post,
            headers: BTreeMap::new(),
        }
    }

    fn submission_row(form_id: uuid::Uuid, data: serde_json::Value) -> SubmissionRow {
        SubmissionRow {
            id: uuid::Uuid::new_v4(),
            form_id,
            data,
            submitted_at: OffsetDateTime::now_utc(),
        }
    }

    fn wire_context(
        forms: Vec<FormRow>,
        submissions: Vec<SubmissionRow>,
        attempts: Arc<RecordingAttemptStore>,
        transport: Arc<FixedTransport>,
    ) -> AppContext {
        let mut ctx = test_context();
        ctx.repos.form = Arc::new(FormRepository::new(Arc::new(DummyFormStore::with(forms))));
        ctx.repos.submission = Arc::new(SubmissionRepository::new(Arc::new(
            DummySubmissionStore::with(submissions),
        )));
        ctx.repos.delivery_attempt = Arc::new(DeliveryAttemptRepository::new(attempts));
        ctx.transport = transport;
        ctx
    }

    #[tokio::test]
    async fn given_unknown_form_when_executed_should_return_form_not_found() {
        let attempts = Arc::new(RecordingAttemptStore::new());
        let transport = Arc::new(FixedTransport::ok());
        let ctx = wire_context(vec![], vec![], attempts, transport);

        let result = TriggerDeliveryUseCase::execute(
            &ctx,
            TriggerDeliveryCommand {
                submission_id: uuid::Uuid::new_v4(),
                form_id: uuid::Uuid::new_v4(),
            },
        )
        .await;

        assert!(matches!(result, Err(TriggerDeliveryError::FormNotFound)));
    }

    #[tokio::test]
    async fn given_unknown_submission_when_executed_should_return_submission_not_found() {
        let form = form_row(enabled_webhook());
        let form_id = form.id;
        let attempts = Arc::new(RecordingAttemptStore::new());
        let transport = Arc::new(FixedTransport::ok());
        let ctx = wire_context(vec![form], vec![], attempts, transport);

        let result = TriggerDeliveryUseCase::execute(
            &ctx,
            TriggerDeliveryCommand {
                submission_id: uuid::Uuid::new_v4(),
                form_id,
            },
        )
        .await;

        assert!(matches!(
            result,
            Err(TriggerDeliveryError::SubmissionNotFound)
        ));
    }

    #[tokio::test]
    async fn given_submission_of_another_form_when_executed_should_return_submission_not_found() {
        let form = form_row(enabled_webhook());
        let form_id = form.id;
        let other_form_submission = submission_row(uuid::Uuid::new_v4(), json!({"name": "Ada"}));
        let submission_id = other_form_submission.id;
        let attempts = Arc::new(RecordingAttemptStore::new());
        let transport = Arc::new(FixedTransport::ok());
        let ctx = wire_context(vec![form], vec![other_form_submission], attempts, transport);

        let result = TriggerDeliveryUseCase::execute(
            &ctx,
            TriggerDeliveryCommand {
                submission_id,
                form_id,
            },
        )
        .await;

        assert!(matches!(
            result,
            Err(TriggerDeliveryError::SubmissionNotFound)
        ));
    }

    #[tokio::test]
    async fn given_disabled_webhook_when_executed_should_skip_without_rows() {
        let form = form_row(WebhookConfig::disabled());
        let form_id = form.id;
        let submission = submission_row(form_id, json!({"name": "Ada"}));
        let submission_id = submission.id;
        let attempts = Arc::new(RecordingAttemptStore::new());
        let transport = Arc::new(FixedTransport::ok());
        let ctx = wire_context(
            vec![form],
            vec![submission],
            attempts.clone(),
            transport.clone(),
        );

        let outcome = TriggerDeliveryUseCase::execute(
            &ctx,
            TriggerDeliveryCommand {
                submission_id,
                form_id,
            },
        )
        .await
        .unwrap();

        assert!(matches!(outcome, TriggerDeliveryOutcome::Skipped));
        assert_eq!(attempts.len(), 0);
        assert_eq!(transport.sent_count(), 0);
    }

    #[tokio::test]
    async fn given_enabled_webhook_with_blank_url_when_executed_should_skip() {
        let form = form_row(WebhookConfig {
            enabled: true,
            url: Some("   ".to_string()),
            method: WebhookMethod::Post,
            headers: BTreeMap::new(),
        });
        let form_id = form.id;
        let submission = submission_row(form_id, json!({"name": "Ada"}));
        let submission_id = submission.id;
        let attempts = Arc::new(RecordingAttemptStore::new());
        let transport = Arc::new(FixedTransport::ok());
        let ctx = wire_context(
            vec![form],
            vec![submission],
            attempts.clone(),
            transport.clone(),
        );

        let outcome = TriggerDeliveryUseCase::execute(
            &ctx,
            TriggerDeliveryCommand {
                submission_id,
                form_id,
            },
        )
        .await
        .unwrap();

        assert!(matches!(outcome, TriggerDeliveryOutcome::Skipped));
        assert_eq!(transport.sent_count(), 0);
    }

    #[tokio::test]
    async fn given_malformed_stored_data_when_executed_should_reject_without_rows() {
        let form = form_row(enabled_webhook());
        let form_id = form.id;
        let submission = submission_row(form_id, json!({"age": 41}));
        let submission_id = submission.id;
        let attempts = Arc::new(RecordingAttemptStore::new());
        let transport = Arc::new(FixedTransport::ok());
        let ctx = wire_context(
            vec![form],
            vec![submission],
            attempts.clone(),
            transport.clone(),
        );

        let result = TriggerDeliveryUseCase::execute(
            &ctx,
            TriggerDeliveryCommand {
                submission_id,
                form_id,
            },
        )
        .await;

        assert!(matches!(result, Err(TriggerDeliveryError::InvalidData(_))));
        assert_eq!(attempts.len(), 0);
        assert_eq!(transport.sent_count(), 0);
    }

    #[tokio::test]
    async fn given_valid_submission_when_executed_should_deliver() {
        let form = form_row(enabled_webhook());
        let form_id = form.id;
        let submission = submission_row(form_id, json!({"name": "Ada"}));
        let submission_id = submission.id;
        let attempts = Arc::new(RecordingAttemptStore::new());
        let transport = Arc::new(FixedTransport::ok());
        let ctx = wire_context(
            vec![form],
            vec![submission],
            attempts.clone(),
            transport.clone(),
        );

        let outcome = TriggerDeliveryUseCase::execute(
            &ctx,
            TriggerDeliveryCommand {
                submission_id,
                form_id,
            },
        )
        .await
        .unwrap();

        assert!(matches!(
            outcome,
            TriggerDeliveryOutcome::Delivered {
                status_code: 200,
                attempts: 1
            }
        ));
        assert_eq!(attempts.len(), 1);
        assert_eq!(transport.sent_count(), 1);
    }

    #[tokio::test]
    async fn given_form_store_down_when_executed_should_return_storage_error() {
        let ctx = test_context();

        let result = TriggerDeliveryUseCase::execute(
            &ctx,
            TriggerDeliveryCommand {
                submission_id: uuid::Uuid::new_v4(),
                form_id: uuid::Uuid::new_v4(),
            },
        )
        .await;

        assert!(matches!(result, Err(TriggerDeliveryError::Storage(_))));
    }
}
