use std::future::Future;

use serde::Deserialize;

use crate::error::GeocodeError;
use crate::geopoint::GeoPoint;

/// Origin or destination of a route request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Location {
    Coordinates(GeoPoint),
    Place(String),
}

impl Location {
    /// Reads `"lat lon"` or `"lat, lon"` as coordinates, anything else as a
    /// place name to geocode.
    pub fn parse(text: &str) -> Location {
        let text = text.trim();
        let parts: Vec<&str> = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();

        if let [lat, lng] = parts[..] {
            if let (Ok(lat), Ok(lng)) = (lat.parse::<f64>(), lng.parse::<f64>()) {
                let point = GeoPoint::new(lat, lng);
                if point.is_valid() {
                    return Location::Coordinates(point);
                }
            }
        }

        Location::Place(text.to_string())
    }
}

/// Resolves free text to coordinates. `Ok(None)` means the lookup succeeded
/// but found nothing.
pub trait Geocoder: Send + Sync {
    fn resolve(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Option<GeoPoint>, GeocodeError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(
            Location::parse("41.3870 2.1701"),
            Location::Coordinates(GeoPoint::new(41.3870, 2.1701))
        );
        assert_eq!(
            Location::parse(" 41.3870, 2.1701 "),
            Location::Coordinates(GeoPoint::new(41.3870, 2.1701))
        );
    }

    #[test]
    fn test_parse_place() {
        assert_eq!(
            Location::parse("Sagrada Família"),
            Location::Place("Sagrada Família".to_string())
        );
        assert_eq!(
            Location::parse("Carrer 22 Arago"),
            Location::Place("Carrer 22 Arago".to_string())
        );
    }

    #[test]
    fn test_out_of_range_numbers_are_places() {
        assert_eq!(
            Location::parse("1000 2000"),
            Location::Place("1000 2000".to_string())
        );
    }

    #[test]
    fn test_deserialize_location() {
        let coordinates: Location = serde_json::from_str(r#"{"lat": 41.0, "lng": 2.0}"#).unwrap();
        assert_eq!(coordinates, Location::Coordinates(GeoPoint::new(41.0, 2.0)));

        let place: Location = serde_json::from_str(r#""Park Güell""#).unwrap();
        assert_eq!(place, Location::Place("Park Güell".to_string()));
    }
}
