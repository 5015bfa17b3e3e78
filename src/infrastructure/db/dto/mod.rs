pub mod delivery_attempt;
pub mod form;
pub mod submission;

pub use delivery_attempt::{DeliveryAttemptRow, DeliveryAttemptStats};
pub use form::FormRow;
pub use submission::SubmissionRow;
