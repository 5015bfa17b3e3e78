use std::collections::BTreeMap;

use crate::domain::value_objects::ids::FormId;
use crate::domain::value_objects::timestamps::Timestamp;

/// HTTP method a webhook call is made with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookMethod {
    Post,
    Put,
    Patch,
}

impl WebhookMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookMethod::Post => "POST",
            WebhookMethod::Put => "PUT",
            WebhookMethod::Patch => "PATCH",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "POST" => Some(WebhookMethod::Post),
            "PUT" => Some(WebhookMethod::Put),
            "PATCH" => Some(WebhookMethod::Patch),
            _ => None,
        }
    }
}

impl Default for WebhookMethod {
    fn default() -> Self {
        WebhookMethod::Post
    }
}

/// Webhook settings owned by a form.
///
/// A delivery sequence works against one immutable snapshot of this config,
/// taken when the delivery is triggered. Config edits made mid-retry are not
/// picked up until the next delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    pub enabled: bool,
    pub url: Option<String>,
    pub method: WebhookMethod,
    pub headers: BTreeMap<String, String>,
}

impl WebhookConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            url: None,
            method: WebhookMethod::default(),
            headers: BTreeMap::new(),
        }
    }

    /// The URL to deliver to, or `None` when delivery should short-circuit.
    ///
    /// Returns `None` when the config is disabled or the URL is missing or
    /// blank, which callers treat as a no-op success.
    pub fn target(&self) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct Form {
    pub id: FormId,
    pub title: String,
    pub webhook: WebhookConfig,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
