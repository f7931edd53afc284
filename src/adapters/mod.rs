// Adapters layer: concrete implementations for external systems (record store, http).

pub mod http;
pub mod sqlite_store;

pub use sqlite_store::{connect, PoolSettings, SqliteSchoolStore};
