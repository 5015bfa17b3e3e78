pub mod delivery_attempt_repository;
pub mod factory;
pub mod form_repository;
pub mod submission_repository;

pub use factory::Repositories;
