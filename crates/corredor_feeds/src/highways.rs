use corredor_routing::congestion::HighwaySegment;
use corredor_routing::error::FeedError;
use corredor_routing::geopoint::GeoPoint;
use serde::Deserialize;

use crate::error::FeedClientError;

#[derive(Deserialize)]
struct HighwayRecord {
    #[serde(rename = "Tram")]
    id: i64,
    #[serde(rename = "Coordenades")]
    coordinates: String,
}

/// `x1,y1,x2,y2,...` longitude/latitude pairs.
fn parse_coordinates(line: usize, value: &str) -> Result<Vec<GeoPoint>, FeedError> {
    let values = value
        .split(',')
        .map(|v| {
            v.trim().parse::<f64>().map_err(|_| FeedError::Malformed {
                line,
                reason: format!("invalid coordinate \"{v}\""),
            })
        })
        .collect::<Result<Vec<f64>, FeedError>>()?;

    if values.len() % 2 != 0 {
        return Err(FeedError::Malformed {
            line,
            reason: "odd number of coordinate values".to_string(),
        });
    }

    values
        .chunks_exact(2)
        .map(|pair| {
            let point = GeoPoint::new(pair[1], pair[0]);
            if point.is_valid() {
                Ok(point)
            } else {
                Err(FeedError::Malformed {
                    line,
                    reason: format!("coordinate out of range \"{},{}\"", pair[0], pair[1]),
                })
            }
        })
        .collect()
}

/// Parses the highway geometry CSV (`Tram,Tram_Components,Coordenades`).
/// The result is sorted by ascending segment id.
pub fn parse_highways(content: &str) -> Result<Vec<HighwaySegment>, FeedClientError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut highways = vec![];

    for (i, record) in reader.deserialize::<HighwayRecord>().enumerate() {
        let record = record?;
        // header is line 1
        let coordinates = parse_coordinates(i + 2, &record.coordinates)?;
        highways.push(HighwaySegment {
            id: record.id,
            coordinates,
        });
    }

    highways.sort_by_key(|highway| highway.id);
    Ok(highways)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "Tram,Tram_Components,Coordenades
2,Diagonal (Ronda de Dalt a Doctor Marañón),\"2.112035,41.384191,2.101502,41.376889\"
1,Diagonal (Doctor Marañón a Ronda de Dalt),\"2.101256,41.376738,2.111944,41.384050,2.112100,41.384200\"
";

    #[test]
    fn test_parse_highways() {
        let highways = parse_highways(CSV).unwrap();

        assert_eq!(highways.len(), 2);
        assert_eq!(highways[0].id, 1);
        assert_eq!(highways[0].coordinates.len(), 3);
        assert_eq!(highways[1].coordinates[0], GeoPoint::new(41.384191, 2.112035));
    }

    #[test]
    fn test_odd_coordinates_are_malformed() {
        let csv = "Tram,Tram_Components,Coordenades\n1,x,\"2.1,41.3,2.2\"\n";
        assert!(matches!(
            parse_highways(csv),
            Err(FeedClientError::Feed(FeedError::Malformed { line: 2, .. }))
        ));
    }

    #[test]
    fn test_invalid_coordinate_is_malformed() {
        let csv = "Tram,Tram_Components,Coordenades\n1,x,\"2.1,north\"\n";
        assert!(matches!(
            parse_highways(csv),
            Err(FeedClientError::Feed(FeedError::Malformed { .. }))
        ));
    }

    #[test]
    fn test_out_of_range_coordinate_is_malformed() {
        let csv = "Tram,Tram_Components,Coordenades\n1,x,\"2.1,41.3\"\n2,y,\"2.1,95.0,2.2,41.3\"\n";
        assert!(matches!(
            parse_highways(csv),
            Err(FeedClientError::Feed(FeedError::Malformed { line: 3, .. }))
        ));
    }

    #[test]
    fn test_invalid_id_is_csv_error() {
        let csv = "Tram,Tram_Components,Coordenades\nabc,x,\"2.1,41.3\"\n";
        assert!(matches!(parse_highways(csv), Err(FeedClientError::Csv(_))));
    }
}
