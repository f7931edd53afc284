use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A persisted school. `id` and the timestamps are owned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Caller-supplied school as it arrives on the wire, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchoolInput {
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub address: Value,
    #[serde(default)]
    pub latitude: Value,
    #[serde(default)]
    pub longitude: Value,
}

/// A validated school ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSchool {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A school together with its distance from the query point. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSchool {
    #[serde(flatten)]
    pub school: School,
    #[serde(rename = "distance")]
    pub distance_km: f64,
}

/// Page/limit pair with its derived offset. Always well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSpec {
    page: i64,
    limit: i64,
}

impl PaginationSpec {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, crate::utils::sanitize::MAX_LIMIT),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PaginationSpec {
    fn default() -> Self {
        Self::new(
            crate::utils::sanitize::DEFAULT_PAGE,
            crate::utils::sanitize::DEFAULT_LIMIT,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(spec: PaginationSpec, total: i64) -> Self {
        let total = total.max(0);
        Self {
            page: spec.page(),
            limit: spec.limit(),
            total,
            total_pages: (total + spec.limit() - 1) / spec.limit(),
        }
    }
}

/// One store-ordered page of schools.
#[derive(Debug, Clone, PartialEq)]
pub struct SchoolPage {
    pub schools: Vec<School>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPage {
    pub schools: Vec<RankedSchool>,
    pub pagination: Pagination,
}
