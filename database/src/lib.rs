pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use config::{DatabaseConfig, DEFAULT_DATABASE_URL};
pub use error::DatabaseError;
pub use store::{MatchStore, SqliteStore};
