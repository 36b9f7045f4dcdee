use fxhash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::FeedError;
use crate::geopoint::GeoPoint;

/// Traffic intensity classification of a road segment, 0 (no data) to 6
/// (blocked).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct CongestionLevel(u8);

impl CongestionLevel {
    pub const NO_DATA: CongestionLevel = CongestionLevel(0);
    pub const BLOCKED: CongestionLevel = CongestionLevel(6);
    pub const MAX: u8 = 6;

    pub fn new(level: u8) -> Option<Self> {
        (level <= Self::MAX).then_some(CongestionLevel(level))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<i64> for CongestionLevel {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(CongestionLevel::new)
            .ok_or_else(|| format!("congestion level {value} is outside 0..=6"))
    }
}

impl From<CongestionLevel> for u8 {
    fn from(value: CongestionLevel) -> Self {
        value.0
    }
}

/// Surveyed road corridor, static companion data of the congestion feed.
#[derive(Debug, Clone, PartialEq)]
pub struct HighwaySegment {
    pub id: i64,
    pub coordinates: Vec<GeoPoint>,
}

/// Single reading of the congestion feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CongestionReading {
    pub segment_id: i64,
    pub level: CongestionLevel,
}

impl CongestionReading {
    pub fn new(segment_id: i64, level: i64) -> Result<Self, FeedError> {
        let level = CongestionLevel::try_from(level)
            .map_err(|_| FeedError::InvalidCongestionLevel { segment_id, level })?;

        Ok(CongestionReading { segment_id, level })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrafficSegment {
    pub id: i64,
    pub coordinates: Vec<GeoPoint>,
    pub level: CongestionLevel,
}

/// Pairs every highway with its reading by segment id. Highways without a
/// reading are left out, readings for unknown segments are ignored. The
/// result is sorted by ascending segment id.
pub fn join_segments(
    highways: &[HighwaySegment],
    readings: &[CongestionReading],
) -> Vec<TrafficSegment> {
    let mut levels: FxHashMap<i64, CongestionLevel> = FxHashMap::default();
    for reading in readings {
        levels.insert(reading.segment_id, reading.level);
    }

    let mut matched: FxHashSet<i64> = FxHashSet::default();

    let mut segments: Vec<TrafficSegment> = highways
        .iter()
        .filter_map(|highway| {
            let Some(&level) = levels.get(&highway.id) else {
                debug!(segment_id = highway.id, "No congestion reading for segment");
                return None;
            };
            matched.insert(highway.id);
            Some(TrafficSegment {
                id: highway.id,
                coordinates: highway.coordinates.clone(),
                level,
            })
        })
        .collect();

    let unknown = levels.keys().filter(|id| !matched.contains(*id)).count();
    if unknown > 0 {
        warn!(
            count = unknown,
            "Ignoring congestion readings for unknown segments"
        );
    }

    segments.sort_by_key(|segment| segment.id);
    segments
}
