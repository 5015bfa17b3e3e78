pub mod deliver_submission;
pub mod delivery_stats;
pub mod list_attempts;
pub mod trigger_delivery;
