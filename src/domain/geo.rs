//! Great-circle distances on a spherical Earth.

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two points given in degrees.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Like [`distance_km`], but measures across the antimeridian when that is the
/// shorter way round.
pub fn shortest_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (mut lon1, mut lon2) = (lon1, lon2);

    if (lon1 - lon2).abs() > 180.0 {
        if lon1 < 0.0 {
            lon1 += 360.0;
        } else {
            lon2 += 360.0;
        }
    }

    distance_km(lat1, lon1, lat2, lon2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_york_to_los_angeles() {
        let d = distance_km(40.7128, -74.0060, 34.0522, -118.2437);
        assert!((3930.0..=3950.0).contains(&d), "got {d}");
    }

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(distance_km(40.7128, -74.0060, 40.7128, -74.0060), 0.0);
        assert_eq!(distance_km(-33.8688, 151.2093, -33.8688, 151.2093), 0.0);
        assert_eq!(shortest_distance_km(0.0, 179.5, 0.0, 179.5), 0.0);
    }

    #[test]
    fn test_symmetric_and_non_negative() {
        let points = [
            (40.7128, -74.0060),
            (34.0522, -118.2437),
            (-33.8688, 151.2093),
            (51.5074, -0.1278),
            (0.0, 0.0),
            (-89.5, 179.9),
        ];
        for &(a_lat, a_lon) in &points {
            for &(b_lat, b_lon) in &points {
                let ab = distance_km(a_lat, a_lon, b_lat, b_lon);
                let ba = distance_km(b_lat, b_lon, a_lat, a_lon);
                assert!(ab >= 0.0);
                assert!((ab - ba).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_antimeridian_crossing_is_short() {
        let corrected = shortest_distance_km(40.0, 179.9, 40.0, -179.9);
        assert!(corrected < 50.0, "got {corrected}");
        assert!(corrected > 10.0, "got {corrected}");

        let reversed = shortest_distance_km(40.0, -179.9, 40.0, 179.9);
        assert!((corrected - reversed).abs() < 1e-9);
    }

    #[test]
    fn test_correction_only_applies_across_the_line() {
        let plain = distance_km(10.0, 20.0, 15.0, 25.0);
        assert_eq!(shortest_distance_km(10.0, 20.0, 15.0, 25.0), plain);
    }
}
