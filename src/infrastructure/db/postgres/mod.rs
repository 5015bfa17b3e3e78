mod database;
pub mod delivery_attempt_store_postgres;
pub mod form_store_postgres;
pub mod submission_store_postgres;

pub use database::PostgresDatabase;
