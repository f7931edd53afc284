//! Acceptance rules for school records and query coordinates.
//!
//! Validators report violations instead of failing; callers decide whether a
//! non-empty list becomes a [`SchoolError::Validation`](crate::utils::error::SchoolError).

use crate::domain::model::{NewSchool, SchoolInput};
use crate::utils::error::{Result, SchoolError};
use crate::utils::sanitize::parse_real;
use crate::utils::security::{contains_invalid_characters, contains_sql_injection};
use serde_json::Value;

pub const MAX_TEXT_LENGTH: usize = 255;

/// Exact poles and the exact date line are refused as a product policy,
/// not for any geometric reason.
const POLE_LATITUDE: f64 = 90.0;
const DATE_LINE_LONGITUDE: f64 = 180.0;

enum Purpose {
    Location,
    Search,
}

impl Purpose {
    fn pole_message(&self) -> &'static str {
        match self {
            Purpose::Location => {
                "Exact pole coordinates (±90°) are generally not valid school locations"
            }
            Purpose::Search => {
                "Exact pole coordinates (±90°) are generally not useful for school searches"
            }
        }
    }

    fn date_line_message(&self) -> &'static str {
        match self {
            Purpose::Location => {
                "Exact international date line coordinates (±180°) are generally not valid school locations"
            }
            Purpose::Search => {
                "Exact international date line coordinates (±180°) are generally not useful for school searches"
            }
        }
    }
}

pub fn is_valid_latitude(lat: f64) -> bool {
    lat > -POLE_LATITUDE && lat < POLE_LATITUDE
}

pub fn is_valid_longitude(lon: f64) -> bool {
    lon > -DATE_LINE_LONGITUDE && lon < DATE_LINE_LONGITUDE
}

fn non_empty_text(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.trim().is_empty())
}

fn check_latitude(lat: f64, purpose: &Purpose) -> Option<String> {
    if lat.abs() == POLE_LATITUDE {
        Some(purpose.pole_message().to_string())
    } else if !is_valid_latitude(lat) {
        Some("Latitude must be between -90 and 90".to_string())
    } else {
        None
    }
}

fn check_longitude(lon: f64, purpose: &Purpose) -> Option<String> {
    if lon.abs() == DATE_LINE_LONGITUDE {
        Some(purpose.date_line_message().to_string())
    } else if !is_valid_longitude(lon) {
        Some("Longitude must be between -180 and 180".to_string())
    } else {
        None
    }
}

/// Checks every field of a school and collects all violations.
pub fn validate_school(school: &SchoolInput) -> Vec<String> {
    let mut errors = Vec::new();

    match non_empty_text(&school.name) {
        None => errors.push("Name is required and must be a non-empty string".to_string()),
        Some(name) if name.chars().count() > MAX_TEXT_LENGTH => {
            errors.push("Name must be less than 255 characters".to_string())
        }
        Some(name) if contains_invalid_characters(name) || contains_sql_injection(name) => errors
            .push(
                "School name contains invalid characters or potentially harmful content"
                    .to_string(),
            ),
        Some(_) => {}
    }

    match non_empty_text(&school.address) {
        None => errors.push("Address is required and must be a non-empty string".to_string()),
        Some(address) if address.chars().count() > MAX_TEXT_LENGTH => {
            errors.push("Address must be less than 255 characters".to_string())
        }
        Some(address) if contains_sql_injection(address) => {
            errors.push("Address contains potentially harmful content".to_string())
        }
        Some(_) => {}
    }

    match parse_real(&school.latitude) {
        None => errors.push("Latitude is required and must be a valid number".to_string()),
        Some(lat) => errors.extend(check_latitude(lat, &Purpose::Location)),
    }

    match parse_real(&school.longitude) {
        None => errors.push("Longitude is required and must be a valid number".to_string()),
        Some(lon) => errors.extend(check_longitude(lon, &Purpose::Location)),
    }

    errors
}

/// Checks a query point.
///
/// Unsafe or unparseable input short-circuits with a single violation; once
/// both values parse, latitude and longitude range violations are reported
/// together.
pub fn validate_coordinates(latitude: &Value, longitude: &Value) -> Vec<String> {
    if latitude.as_str().is_some_and(contains_sql_injection) {
        return vec!["Latitude contains potentially harmful content".to_string()];
    }
    if longitude.as_str().is_some_and(contains_sql_injection) {
        return vec!["Longitude contains potentially harmful content".to_string()];
    }

    let Some(lat) = parse_real(latitude) else {
        return vec!["Latitude is required and must be a valid number".to_string()];
    };
    let Some(lon) = parse_real(longitude) else {
        return vec!["Longitude is required and must be a valid number".to_string()];
    };

    check_latitude(lat, &Purpose::Search)
        .into_iter()
        .chain(check_longitude(lon, &Purpose::Search))
        .collect()
}

/// Runs [`validate_school`] and turns the input into a [`NewSchool`].
pub fn validated_school(input: &SchoolInput) -> Result<NewSchool> {
    let errors = validate_school(input);
    if !errors.is_empty() {
        return Err(SchoolError::validation(errors));
    }

    let text = |value: &Value| value.as_str().unwrap_or_default().trim().to_string();
    match (parse_real(&input.latitude), parse_real(&input.longitude)) {
        (Some(latitude), Some(longitude)) => Ok(NewSchool {
            name: text(&input.name),
            address: text(&input.address),
            latitude,
            longitude,
        }),
        _ => Err(SchoolError::Internal {
            message: "coordinates changed between validation and conversion".to_string(),
        }),
    }
}

pub fn ensure_coordinates(latitude: &Value, longitude: &Value) -> Result<()> {
    let errors = validate_coordinates(latitude, longitude);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchoolError::validation(errors))
    }
}

/// Last check before a write. Content that reaches this point should already
/// have passed [`validate_school`].
pub fn assert_storable(school: &NewSchool) -> Result<()> {
    let harmful = [&school.name, &school.address]
        .iter()
        .any(|s| contains_invalid_characters(s) || contains_sql_injection(s));
    if harmful {
        return Err(SchoolError::database(
            "Potentially harmful content detected in input",
        ));
    }

    if !is_valid_latitude(school.latitude) || !is_valid_longitude(school.longitude) {
        return Err(SchoolError::database("Coordinates out of storable range"));
    }

    Ok(())
}
