use std::fmt;
use std::str::FromStr;

/// Mean Earth radius used for all distance calculations
pub const EARTH_RADIUS_KM: f64 = 6371.01;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoError {
    #[error("expected \"lat,lon\", got {0:?}")]
    Malformed(String),

    #[error("{value:?} is not a valid degree value")]
    InvalidNumber { value: String },
}

/// A latitude/longitude pair in decimal degrees. Values are not range
/// checked: a longitude of 181 is the same meridian as -179.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance on a spherical Earth (haversine form of the central angle).
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = lat2 - lat1;
        let dlon = (other.lon - self.lon).to_radians();

        let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let angle = 2.0 * h.sqrt().min(1.0).asin();

        EARTH_RADIUS_KM * angle
    }
}

fn parse_degrees(raw: &str) -> Result<f64, GeoError> {
    let trimmed = raw.trim();
    let value: f64 = trimmed.parse().map_err(|_| GeoError::InvalidNumber { value: trimmed.to_string() })?;
    if !value.is_finite() {
        return Err(GeoError::InvalidNumber { value: trimmed.to_string() });
    }
    Ok(value)
}

impl FromStr for Coordinate {
    type Err = GeoError;

    /// Reads the first two comma-separated parts; anything after them is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let (Some(lat), Some(lon)) = (parts.next(), parts.next()) else {
            return Err(GeoError::Malformed(s.to_string()));
        };
        Ok(Coordinate::new(parse_degrees(lat)?, parse_degrees(lon)?))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}
