//! Cataloged bodies as handed to the screening engine.
//!
//! A [`Body`] is owned by whatever supplied the catalog; the engine only
//! borrows a slice of them for the duration of one pass and copies the
//! identity ([`BodyRef`]) into the records it produces.

use serde::{Deserialize, Serialize};

use crate::GeodeticPosition;

/// A cataloged object with a position at the screening epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub name: String,
    /// Catalog identifier (e.g. NORAD catalog number).
    pub catalog_id: String,
    pub position: GeodeticPosition,
}

/// Identity of a body, detached from its position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyRef {
    pub name: String,
    pub catalog_id: String,
}

/// A body that cannot be screened.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputDataError {
    #[error("body {catalog_id} has a non-finite {field}")]
    NonFinite {
        catalog_id: String,
        field: &'static str,
    },
    #[error("body {catalog_id} appears more than once in the catalog")]
    DuplicateIdentity { catalog_id: String },
}

impl Body {
    pub fn new(
        name: impl Into<String>,
        catalog_id: impl Into<String>,
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_km: f64,
    ) -> Self {
        Self {
            name: name.into(),
            catalog_id: catalog_id.into(),
            position: GeodeticPosition::new(latitude_deg, longitude_deg, altitude_km),
        }
    }

    pub fn identity(&self) -> BodyRef {
        BodyRef {
            name: self.name.clone(),
            catalog_id: self.catalog_id.clone(),
        }
    }

    /// Reject bodies whose coordinates would poison the geometry.
    ///
    /// Only finiteness is checked; latitude/longitude ranges are not.
    pub fn validate(&self) -> Result<(), InputDataError> {
        let p = &self.position;
        if p.is_finite() {
            return Ok(());
        }
        let bad_field = if !p.latitude_deg.is_finite() {
            "latitude"
        } else if !p.longitude_deg.is_finite() {
            "longitude"
        } else {
            "altitude"
        };
        Err(InputDataError::NonFinite {
            catalog_id: self.catalog_id.clone(),
            field: bad_field,
        })
    }
}

impl std::fmt::Display for BodyRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.catalog_id)
    }
}
