use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{DEFAULT_SPEED_KMH, MPH_TO_KPH};

/// Posted speed limit(s) of a street, in km/h.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum DeclaredSpeed {
    #[default]
    Missing,
    Single(f64),
    Multiple(Vec<f64>),
}

impl DeclaredSpeed {
    pub fn from_values(values: Vec<f64>) -> Self {
        let mut values: Vec<f64> = values
            .into_iter()
            .filter(|v| v.is_finite() && *v > 0.0)
            .collect();

        match values.len() {
            0 => DeclaredSpeed::Missing,
            1 => DeclaredSpeed::Single(values.remove(0)),
            _ => DeclaredSpeed::Multiple(values),
        }
    }

    pub fn effective_speed_kmh(&self) -> f64 {
        match self {
            DeclaredSpeed::Missing => DEFAULT_SPEED_KMH,
            DeclaredSpeed::Single(speed) => *speed,
            DeclaredSpeed::Multiple(speeds) if speeds.is_empty() => DEFAULT_SPEED_KMH,
            DeclaredSpeed::Multiple(speeds) => speeds.iter().sum::<f64>() / speeds.len() as f64,
        }
    }
}

// https://wiki.openstreetmap.org/wiki/Key:maxspeed
pub fn parse_max_speed(value: &str) -> Option<f64> {
    let value = value.trim();
    match value {
        "walk" => Some(5.0),
        "none" => Some(150.0),
        _ => {
            if let Some(mph) = value.strip_suffix("mph") {
                mph.trim().parse::<f64>().ok().map(|v| v * MPH_TO_KPH)
            } else {
                value
                    .strip_suffix("km/h")
                    .unwrap_or(value)
                    .trim()
                    .parse::<f64>()
                    .ok()
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSpeedValue {
    Number(f64),
    Text(String),
}

impl RawSpeedValue {
    fn kmh(&self) -> Option<f64> {
        match self {
            RawSpeedValue::Number(v) => Some(*v),
            RawSpeedValue::Text(text) => parse_max_speed(text),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSpeed {
    One(RawSpeedValue),
    Many(Vec<RawSpeedValue>),
    Other(serde_json::Value),
}

impl<'de> Deserialize<'de> for DeclaredSpeed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<RawSpeed>::deserialize(deserializer)?;

        let values = match raw {
            None | Some(RawSpeed::Other(_)) => vec![],
            Some(RawSpeed::One(value)) => value.kmh().into_iter().collect(),
            Some(RawSpeed::Many(values)) => values.iter().filter_map(RawSpeedValue::kmh).collect(),
        };

        Ok(DeclaredSpeed::from_values(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_speed_of_multiple_is_mean() {
        let speed = DeclaredSpeed::Multiple(vec![30.0, 40.0, 50.0]);
        assert_eq!(speed.effective_speed_kmh(), 40.0);
    }

    #[test]
    fn test_missing_speed_falls_back_to_default() {
        assert_eq!(DeclaredSpeed::Missing.effective_speed_kmh(), 20.0);
    }

    #[test]
    fn test_parse_max_speed() {
        assert_eq!(parse_max_speed("50"), Some(50.0));
        assert_eq!(parse_max_speed("walk"), Some(5.0));
        assert_eq!(parse_max_speed("none"), Some(150.0));
        assert_eq!(parse_max_speed("30 km/h"), Some(30.0));
        assert!((parse_max_speed("20 mph").unwrap() - 32.1868).abs() < 1e-9);
        assert_eq!(parse_max_speed("signals"), None);
    }

    #[test]
    fn test_deserialize_variants() {
        let single: DeclaredSpeed = serde_json::from_str("\"30\"").unwrap();
        assert_eq!(single, DeclaredSpeed::Single(30.0));

        let number: DeclaredSpeed = serde_json::from_str("50").unwrap();
        assert_eq!(number, DeclaredSpeed::Single(50.0));

        let multiple: DeclaredSpeed = serde_json::from_str("[\"30\", 50]").unwrap();
        assert_eq!(multiple, DeclaredSpeed::Multiple(vec![30.0, 50.0]));

        let null: DeclaredSpeed = serde_json::from_str("null").unwrap();
        assert_eq!(null, DeclaredSpeed::Missing);
    }

    #[test]
    fn test_malformed_speed_is_missing() {
        let garbage: DeclaredSpeed = serde_json::from_str("\"fast\"").unwrap();
        assert_eq!(garbage, DeclaredSpeed::Missing);

        let partial: DeclaredSpeed = serde_json::from_str("[\"fast\", \"40\"]").unwrap();
        assert_eq!(partial, DeclaredSpeed::Single(40.0));

        let object: DeclaredSpeed = serde_json::from_str("{\"a\": 1}").unwrap();
        assert_eq!(object, DeclaredSpeed::Missing);
    }
}
