pub mod delivery_attempt_store;
pub mod form_store;
pub mod submission_store;
