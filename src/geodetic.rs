//! Geodetic (latitude, longitude, altitude) positions and their conversion to
//! Earth-centered Cartesian coordinates.
//!
//! The conversion uses a spherical Earth of radius [`EARTH_RADIUS_KM`]:
//!
//! ```text
//! r = R + altitude
//! x = r * cos(lat) * cos(lon)
//! y = r * cos(lat) * sin(lon)
//! z = r * sin(lat)
//! ```
//!
//! This is not an ellipsoidal (WGS-84) model. Positions computed here can be
//! off by tens of kilometers in absolute terms, but two bodies handed
//! coordinates from the same source are separated consistently, which is all
//! a single-epoch proximity screen needs.
//!
//! Latitude and longitude are not range-checked. Out-of-range values are
//! accepted as-is and simply produce whatever point the trigonometry yields.

use serde::{Deserialize, Serialize};

use crate::Position;

/// Reference sphere radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.8;

/// A position above the reference sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticPosition {
    /// Latitude in degrees, nominally [-90, 90].
    pub latitude_deg: f64,
    /// Longitude in degrees, nominally [-180, 180] (any wrap is accepted).
    pub longitude_deg: f64,
    /// Height above the reference sphere in kilometers.
    pub altitude_km: f64,
}

impl GeodeticPosition {
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_km: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_km,
        }
    }

    /// Earth-centered Cartesian position in kilometers.
    pub fn to_cartesian(&self) -> Position {
        let r = EARTH_RADIUS_KM + self.altitude_km;
        let (lat_sin, lat_cos) = self.latitude_deg.to_radians().sin_cos();
        let (lon_sin, lon_cos) = self.longitude_deg.to_radians().sin_cos();
        Position::new(r * lat_cos * lon_cos, r * lat_cos * lon_sin, r * lat_sin)
    }

    /// `true` when all three components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.latitude_deg.is_finite()
            && self.longitude_deg.is_finite()
            && self.altitude_km.is_finite()
    }
}
