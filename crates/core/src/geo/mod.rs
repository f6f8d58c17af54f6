//! Great-circle geometry on a spherical Earth.
//!
//! Leaf module: pure functions over [`Coordinate`], no shared state, safe
//! to call concurrently on every position update.

mod distance;
mod sampling;

pub use self::distance::{EARTH_RADIUS_METERS, distance_meters};
pub use self::sampling::{METERS_PER_DEGREE, sample_point_in_disc, sample_point_in_disc_with};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeoError {
    #[error("coordinate out of range: lat {lat}, lng {lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("radius must be positive, got {0}")]
    InvalidRadius(f64),
}

/// A point on the globe in decimal degrees.
///
/// Construction enforces lat ∈ [-90, 90] and lng ∈ [-180, 180], so a held
/// `Coordinate` is always well-formed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(GeoError::InvalidCoordinate { lat, lng });
        }

        Ok(Coordinate { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

// geo stores x = longitude, y = latitude.
impl From<Coordinate> for geo::Point {
    fn from(c: Coordinate) -> Self {
        geo::Point::new(c.lng, c.lat)
    }
}

impl TryFrom<geo::Point> for Coordinate {
    type Error = GeoError;

    fn try_from(p: geo::Point) -> Result<Self, GeoError> {
        Coordinate::new(p.y(), p.x())
    }
}
