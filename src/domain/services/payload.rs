use serde::Serialize;

use crate::domain::entities::form::Form;
use crate::domain::entities::submission::{Submission, SubmissionData};

/// The JSON document posted to a form's webhook endpoint.
///
/// Field names here are the wire contract; receivers key on them, so renames
/// are breaking changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionPayload {
    pub form_id: String,
    pub submission_id: String,
    pub submitted_at: String,
    pub form_title: String,
    pub data: SubmissionData,
}

/// Assemble the webhook payload for one submission.
///
/// Answers are passed through verbatim under `data`; only the envelope fields
/// are derived here.
pub fn build_payload(form: &Form, submission: &Submission) -> SubmissionPayload {
    SubmissionPayload {
        form_id: submission.form_id.to_string(),
        submission_id: submission.id.to_string(),
        submitted_at: submission.submitted_at.to_rfc3339(),
        form_title: form.title.clone(),
        data: submission.data.clone(),
    }
}
