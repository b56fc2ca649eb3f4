//! Planar coordinates and the proximity rule.
//!
//! Latitude and longitude are treated as plane coordinates, not geodesic
//! ones. The threshold is labelled in miles but no unit conversion happens:
//! distance is measured in whatever unit the coordinates were entered in.

use serde::{Deserialize, Serialize};

/// Maximum distance at which a store is visible and may take orders.
pub const PROXIMITY_THRESHOLD_MILES: f64 = 30.0;

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude, conventionally in `[0.0, 100.0]`.
    pub latitude: f64,
    /// Longitude, conventionally in `[0.0, 100.0]`.
    pub longitude: f64,
}

impl Coordinates {
    /// Create a coordinate pair.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Straight-line distance to `other`.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        distance(*self, *other)
    }
}

/// Euclidean distance between two coordinate pairs.
#[must_use]
pub fn distance(a: Coordinates, b: Coordinates) -> f64 {
    let dlat = a.latitude - b.latitude;
    let dlon = a.longitude - b.longitude;
    dlat.hypot(dlon)
}

/// Whether `distance` is within [`PROXIMITY_THRESHOLD_MILES`] (inclusive).
#[must_use]
pub fn within_range(distance: f64) -> bool {
    distance <= PROXIMITY_THRESHOLD_MILES
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[(f64, f64)] = &[
        (0.0, 0.0),
        (20.0, 0.0),
        (40.0, 0.0),
        (12.5, 99.75),
        (100.0, 100.0),
        (33.3, 66.6),
    ];

    #[test]
    fn test_distance_is_symmetric() {
        for &(a_lat, a_lon) in SAMPLES {
            for &(b_lat, b_lon) in SAMPLES {
                let a = Coordinates::new(a_lat, a_lon);
                let b = Coordinates::new(b_lat, b_lon);
                assert!((distance(a, b) - distance(b, a)).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        for &(lat, lon) in SAMPLES {
            let p = Coordinates::new(lat, lon);
            assert!(distance(p, p).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_distance_three_four_five() {
        let d = Coordinates::new(0.0, 0.0).distance_to(&Coordinates::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_within_range_boundary_is_inclusive() {
        assert!(within_range(30.0));
        assert!(!within_range(30.000_001));
    }

    #[test]
    fn test_within_range_is_monotonic() {
        let distances = [0.0, 5.0, 20.0, 29.99, 30.0, 30.01, 40.0, 141.42];
        for &d1 in &distances {
            for &d2 in &distances {
                if d1 <= d2 && within_range(d2) {
                    assert!(within_range(d1), "{d1} should be in range when {d2} is");
                }
            }
        }
    }

    #[test]
    fn test_scenario_distances() {
        let origin = Coordinates::new(0.0, 0.0);
        let near = distance(origin, Coordinates::new(20.0, 0.0));
        let far = distance(origin, Coordinates::new(40.0, 0.0));
        assert!((near - 20.0).abs() < f64::EPSILON);
        assert!((far - 40.0).abs() < f64::EPSILON);
        assert!(within_range(near));
        assert!(!within_range(far));
    }
}
