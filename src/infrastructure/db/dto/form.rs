use std::collections::BTreeMap;

use crate::domain::entities::form::{Form, WebhookConfig, WebhookMethod};
use crate::domain::value_objects::ids::FormId;
use crate::domain::value_objects::timestamps::Timestamp;
use time::OffsetDateTime;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FormRow {
    pub id: uuid::Uuid,
    pub title: String,
    pub webhook_enabled: bool,
    pub webhook_url: Option<String>,
    pub webhook_method: String,
    pub webhook_headers: serde_json::Value,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl FormRow {
    pub fn from_form(form: &Form) -> Self {
        let headers = form
            .webhook
            .headers
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect::<serde_json::Map<_, _>>();

        Self {
            id: form.id.0,
            title: form.title.clone(),
            webhook_enabled: form.webhook.enabled,
            webhook_url: form.webhook.url.clone(),
            webhook_method: form.webhook.method.as_str().to_string(),
            webhook_headers: serde_json::Value::Object(headers),
            created_at: form.created_at.as_inner(),
            updated_at: form.updated_at.as_inner(),
        }
    }

    pub fn into_form(self) -> Form {
        Form {
            id: FormId(self.id),
            title: self.title,
            webhook: WebhookConfig {
                enabled: self.webhook_enabled,
                url: self.webhook_url,
                method: WebhookMethod::parse(&self.webhook_method).unwrap_or_default(),
                headers: headers_from_json(&self.webhook_headers),
            },
            created_at: Timestamp::from(self.created_at),
            updated_at: Timestamp::from(self.updated_at),
        }
    }
}

fn headers_from_json(value: &serde_json::Value) -> BTreeMap<String, String> {
    let Some(object) = value.as_object() else {
        return BTreeMap::new();
    };
    object
        .iter()
        .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
        .collect()
}
