use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

use crate::domain::entities::form::WebhookMethod;

/// One outgoing webhook call, fully resolved.
#[derive(Debug, Clone)]
pub struct WebhookRequest {
    pub url: String,
    pub method: WebhookMethod,
    pub headers: BTreeMap<String, String>,
    pub body: serde_json::Value,
}

/// What happened on the wire for a single request.
///
/// `ok` is the delivery verdict; `error` is set when no HTTP response came
/// back at all (connect failure, timeout, DNS).
#[derive(Debug, Clone, Default)]
pub struct DispatchOutcome {
    pub ok: bool,
    pub status_code: Option<u16>,
    pub body_text: Option<String>,
    pub error: Option<String>,
}

/// Sends one webhook request. Implementations never retry; scheduling
/// repeats is the caller's job.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn send(&self, request: &WebhookRequest) -> DispatchOutcome;
}

pub struct HttpDispatcher {
    client: reqwest::Client,
}

impl HttpDispatcher {
    /// Build a dispatcher whose requests time out after `timeout`.
    pub fn new(timeout: std::time::Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl WebhookTransport for HttpDispatcher {
    async fn send(&self, request: &WebhookRequest) -> DispatchOutcome {
        // Step 1: Pick the HTTP method configured on the form.
        let builder = match request.method {
            WebhookMethod::Post => self.client.post(&request.url),
            WebhookMethod::Put => self.client.put(&request.url),
            WebhookMethod::Patch => self.client.patch(&request.url),
        };

        // Step 2: Send the JSON body with the resolved headers.
        let response = builder
            .headers(build_headers(&request.headers))
            .json(&request.body)
            .send()
            .await;

        // Step 3: Classify the outcome.
        match response {
            Ok(resp) => {
                let status = resp.status().as_u16();
                let body_text = resp.text().await.ok();
                DispatchOutcome {
                    ok: success_status(status),
                    status_code: Some(status),
                    body_text,
                    error: None,
                }
            }
            Err(err) => DispatchOutcome {
                ok: false,
                status_code: None,
                body_text: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// 2xx and 3xx responses count as delivered; redirects mean the receiver
/// accepted the request somewhere.
fn success_status(status: u16) -> bool {
    (200..400).contains(&status)
}

/// Resolve the header map for a request: JSON content type first, then the
/// form's custom headers on top so they can override it. Headers that are
/// not valid HTTP are skipped rather than failing the delivery.
fn build_headers(custom: &BTreeMap<String, String>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in custom {
        let Ok(name) = HeaderName::from_bytes(name.as_bytes()) else {
            tracing::warn!(header = %name, "skipping invalid webhook header name");
            continue;
        };
        let Ok(value) = HeaderValue::from_str(value) else {
            tracing::warn!(header = %name, "skipping invalid webhook header value");
            continue;
        };
        headers.insert(name, value);
    }

    headers
}
