use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::constants::EARTH_RADIUS_METERS;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Spherical mercator projection in meters. Distances are locally
    /// proportional to ground distances, which is what the nearest-node
    /// index relies on.
    pub fn project(&self) -> [f64; 2] {
        let lat_rad = self.lat.to_radians();
        let lng_rad = self.lng.to_radians();
        let x = EARTH_RADIUS_METERS * lng_rad;
        let y = EARTH_RADIUS_METERS * (lat_rad / 2.0 + PI / 4.0).tan().ln();
        [x, y]
    }

    pub fn haversine_distance(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let dlat = lat2 - lat1;
        let dlng = (other.lng - self.lng).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_METERS * c
    }
}

impl From<&GeoPoint> for geo_types::Point {
    fn from(value: &GeoPoint) -> Self {
        geo_types::Point::new(value.lng, value.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // Plaça de Catalunya to Sagrada Família
        let a = GeoPoint::new(41.3870, 2.1701);
        let b = GeoPoint::new(41.4036, 2.1744);

        let distance = a.haversine_distance(&b);
        assert!((distance - 1882.0).abs() < 10.0, "distance was {distance}");
    }

    #[test]
    fn test_projection_keeps_relative_order() {
        let origin = GeoPoint::new(41.39, 2.17);
        let near = GeoPoint::new(41.391, 2.171);
        let far = GeoPoint::new(41.40, 2.18);

        let [ox, oy] = origin.project();
        let dist = |p: &GeoPoint| {
            let [x, y] = p.project();
            (x - ox).hypot(y - oy)
        };

        assert!(dist(&near) < dist(&far));
    }

    #[test]
    fn test_into_geo_point() {
        let point = geo_types::Point::from(&GeoPoint::new(41.39, 2.17));
        assert_eq!(point.x(), 2.17);
        assert_eq!(point.y(), 41.39);
    }

    #[test]
    fn test_is_valid() {
        assert!(GeoPoint::new(41.39, 2.17).is_valid());
        assert!(!GeoPoint::new(91.0, 2.17).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 2.17).is_valid());
    }
}
