//! Shared value types used by storage backends and provider adapters.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Checks the pair is a representable WGS84 coordinate.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(CoreError::invalid_coordinates(self.lat, self.lng));
        }
        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(CoreError::invalid_coordinates(self.lat, self.lng));
        }
        Ok(())
    }

    /// Great-circle distance to another point in meters (haversine).
    pub fn distance_m(&self, other: &GeoPoint) -> f64 {
        const EARTH_RADIUS_M: f64 = 6_371_000.0;

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlng = (other.lng - self.lng).to_radians();

        let a = (dlat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_M * c
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_zero_for_same_point() {
        let p = GeoPoint::new(40.7128, -74.0060);
        assert!(p.distance_m(&p) < 1e-6);
    }

    #[test]
    fn test_distance_nyc_to_philadelphia() {
        // Roughly 130 km apart
        let nyc = GeoPoint::new(40.7128, -74.0060);
        let philly = GeoPoint::new(39.9526, -75.1652);
        let d = nyc.distance_m(&philly);
        assert!(d > 120_000.0 && d < 140_000.0, "got {d}");
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(GeoPoint::new(40.7, -74.0).validate().is_ok());
        assert!(GeoPoint::new(90.0, 180.0).validate().is_ok());
        assert!(GeoPoint::new(91.0, 0.0).validate().is_err());
        assert!(GeoPoint::new(0.0, -180.5).validate().is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let p = GeoPoint::new(51.5074, -0.1278);
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json["lat"], 51.5074);
        assert_eq!(json["lng"], -0.1278);
    }
}
