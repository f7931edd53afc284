pub mod retry;
pub mod school_service;

pub use crate::domain::model::{NewSchool, PaginationSpec, RankedPage, School, SchoolPage};
pub use crate::domain::ports::SchoolStore;
pub use crate::utils::error::Result;
