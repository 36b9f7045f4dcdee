pub(crate) const INVALID_NODE: usize = usize::MAX;
pub(crate) const INVALID_EDGE: usize = usize::MAX;

pub(crate) const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

pub(crate) const MPH_TO_KPH: f64 = 1.60934;

/// Residential streets rarely carry a posted limit.
pub const DEFAULT_SPEED_KMH: f64 = 20.0;

/// Travel time multiplier indexed by congestion level. Level 0 means the
/// segment has no reading and is deliberately penalised above free flow.
pub const CONGESTION_FACTORS: [f64; 7] = [1.2, 1.0, 1.05, 1.2, 1.4, 1.7, 1e6];

/// Lower bound for itime in hours, keeps zero-length edges strictly positive.
pub const MIN_ITIME: f64 = 1e-9;
