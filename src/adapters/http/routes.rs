use crate::adapters::http::response::success;
use crate::core::school_service::SchoolService;
use crate::core::SchoolStore;
use crate::domain::model::SchoolInput;
use crate::domain::validator::{ensure_coordinates, validated_school};
use crate::utils::error::{Result, SchoolError};
use crate::utils::sanitize::{sanitize_numeric_param, sanitize_pagination_params};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

// Just inside the open coordinate intervals.
const LATITUDE_BOUND: f64 = 89.999999;
const LONGITUDE_BOUND: f64 = 179.999999;

#[derive(Debug, Default, Deserialize)]
pub struct ListSchoolsQuery {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

fn as_value(param: &Option<String>) -> Value {
    param.clone().map(Value::String).unwrap_or(Value::Null)
}

fn clamp_latitude(value: &Value) -> f64 {
    sanitize_numeric_param(value, 0.0, -LATITUDE_BOUND, LATITUDE_BOUND)
}

fn clamp_longitude(value: &Value) -> f64 {
    sanitize_numeric_param(value, 0.0, -LONGITUDE_BOUND, LONGITUDE_BOUND)
}

pub fn school_routes<S: SchoolStore + 'static>(service: Arc<SchoolService<S>>) -> Router {
    Router::new()
        .route("/addSchool", post(add_school::<S>).fallback(route_not_found))
        .route("/listSchools", get(list_schools::<S>).fallback(route_not_found))
        .with_state(service)
}

async fn add_school<S: SchoolStore + 'static>(
    State(service): State<Arc<SchoolService<S>>>,
    body: std::result::Result<Json<SchoolInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(input) = body.map_err(|rejection| {
        SchoolError::validation(vec![format!("Invalid request body: {}", rejection.body_text())])
    })?;

    let mut school = validated_school(&input)?;
    school.latitude = clamp_latitude(&input.latitude);
    school.longitude = clamp_longitude(&input.longitude);

    let saved = service.add_school(school).await?;

    Ok((
        StatusCode::CREATED,
        Json(success(saved, Some("School added successfully"))),
    ))
}

async fn list_schools<S: SchoolStore + 'static>(
    State(service): State<Arc<SchoolService<S>>>,
    query: std::result::Result<Query<ListSchoolsQuery>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query.map_err(|rejection| {
        SchoolError::validation(vec![format!("Invalid query string: {}", rejection.body_text())])
    })?;

    let latitude = as_value(&query.latitude);
    let longitude = as_value(&query.longitude);
    ensure_coordinates(&latitude, &longitude)?;

    let pagination = sanitize_pagination_params(query.page.as_deref(), query.limit.as_deref());
    let ranked = service
        .list_schools_by_distance(
            clamp_latitude(&latitude),
            clamp_longitude(&longitude),
            pagination,
        )
        .await?;

    Ok((StatusCode::OK, Json(success(ranked, None))))
}

pub async fn welcome() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to School Management System API" }))
}

pub async fn route_not_found() -> SchoolError {
    SchoolError::not_found("Route")
}
