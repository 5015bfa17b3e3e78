mod dispatcher;

pub use dispatcher::{DispatchOutcome, HttpDispatcher, WebhookRequest, WebhookTransport};
