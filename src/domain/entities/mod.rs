pub mod delivery;
pub mod form;
pub mod submission;
