pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::AppConfig;

pub use crate::adapters::{connect, PoolSettings, SqliteSchoolStore};
pub use crate::core::{retry::RetryPolicy, school_service::SchoolService};
pub use crate::utils::error::{Result, SchoolError};
