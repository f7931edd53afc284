use crate::domain::model::{NewSchool, PaginationSpec, School, SchoolPage};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Keyed record store for schools. Implementations assign identity and
/// timestamps and must surface failures as `SchoolError::Database`.
#[async_trait]
pub trait SchoolStore: Send + Sync {
    async fn create(&self, school: &NewSchool) -> Result<School>;
    async fn find_page(&self, pagination: PaginationSpec) -> Result<SchoolPage>;
}
