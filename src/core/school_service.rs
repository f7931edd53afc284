use crate::core::retry::{retry_if_transient, RetryPolicy};
use crate::core::SchoolStore;
use crate::domain::geo::shortest_distance_km;
use crate::domain::model::{NewSchool, PaginationSpec, RankedPage, RankedSchool, School};
use crate::domain::validator::assert_storable;
use crate::utils::error::{Result, SchoolError};

pub struct SchoolService<S: SchoolStore> {
    store: S,
    retry: RetryPolicy,
}

impl<S: SchoolStore> SchoolService<S> {
    pub fn new(store: S) -> Self {
        Self::with_retry_policy(store, RetryPolicy::default())
    }

    pub fn with_retry_policy(store: S, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }

    /// Persists an already validated school, retrying transient store faults.
    pub async fn add_school(&self, school: NewSchool) -> Result<School> {
        assert_storable(&school)?;

        let saved = retry_if_transient(&self.retry, "create school", SchoolError::is_transient, || {
            self.store.create(&school)
        })
        .await?;

        tracing::info!("Created school {} ({})", saved.id, saved.name);
        Ok(saved)
    }

    /// Fetches one store-ordered page and ranks it by distance from the query
    /// point. Ranking is confined to the fetched page: page 2 is the second
    /// store page re-ordered, not the 11th-20th nearest schools overall.
    pub async fn list_schools_by_distance(
        &self,
        latitude: f64,
        longitude: f64,
        pagination: PaginationSpec,
    ) -> Result<RankedPage> {
        let page = retry_if_transient(&self.retry, "list schools", SchoolError::is_transient, || {
            self.store.find_page(pagination)
        })
        .await?;

        tracing::debug!(
            "Ranking {} schools from page {} around ({}, {})",
            page.schools.len(),
            pagination.page(),
            latitude,
            longitude
        );

        let mut schools: Vec<RankedSchool> = page
            .schools
            .into_iter()
            .map(|school| {
                let distance_km =
                    shortest_distance_km(latitude, longitude, school.latitude, school.longitude);
                RankedSchool {
                    school,
                    distance_km,
                }
            })
            .collect();

        schools.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        Ok(RankedPage {
            schools,
            pagination: page.pagination,
        })
    }
}
