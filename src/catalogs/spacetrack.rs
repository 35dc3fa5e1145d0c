//! Space-Track `tle_latest` JSON exports.
//!
//! Space-Track serves mean orbital elements, not positions. Element sets are
//! kept as-is in [`SpaceTrackElement`]; [`SpaceTrackElement::to_body`] then
//! maps them onto a geodetic position with a fixed placeholder mapping:
//!
//! | body field    | taken from                    |
//! |---------------|-------------------------------|
//! | latitude      | `INCLINATION` (deg)           |
//! | longitude     | `RA_OF_ASC_NODE` (deg)        |
//! | altitude (km) | `MEAN_MOTION` (rev/day) × 100 |
//!
//! This is a placeholder mapping, not orbital mechanics: inclination is not a
//! latitude and mean motion is not an altitude. Screening results built on it
//! are only as meaningful as this mapping. Replacing it with a propagated
//! position (e.g. SGP4 at the screening epoch) is the fix; the screener itself
//! does not change.
//!
//! Space-Track encodes numbers as JSON strings; both strings and numbers are
//! accepted.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::{info, warn};

use crate::Body;

/// Scale applied to mean motion to obtain the placeholder altitude.
pub const MEAN_MOTION_ALTITUDE_SCALE: f64 = 100.0;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn value(&self) -> Option<f64> {
        match self {
            Numeric::Number(v) => Some(*v),
            Numeric::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawElement {
    #[serde(rename = "OBJECT_NAME")]
    object_name: Option<String>,
    #[serde(rename = "NORAD_CAT_ID")]
    norad_cat_id: Option<Numeric>,
    #[serde(rename = "INCLINATION")]
    inclination: Option<Numeric>,
    #[serde(rename = "RA_OF_ASC_NODE")]
    ra_of_asc_node: Option<Numeric>,
    #[serde(rename = "MEAN_MOTION")]
    mean_motion: Option<Numeric>,
    #[serde(rename = "APOGEE")]
    apogee: Option<Numeric>,
    #[serde(rename = "PERIGEE")]
    perigee: Option<Numeric>,
}

/// One element set from a Space-Track export.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceTrackElement {
    pub object_name: String,
    pub norad_cat_id: String,
    pub inclination_deg: f64,
    pub ra_of_asc_node_deg: f64,
    /// Revolutions per day.
    pub mean_motion: f64,
    pub apogee_km: Option<f64>,
    pub perigee_km: Option<f64>,
}

impl SpaceTrackElement {
    /// Map the element set onto a body using the placeholder mapping
    /// described in the module docs.
    pub fn to_body(&self) -> Body {
        Body::new(
            self.object_name.clone(),
            self.norad_cat_id.clone(),
            self.inclination_deg,
            self.ra_of_asc_node_deg,
            self.mean_motion * MEAN_MOTION_ALTITUDE_SCALE,
        )
    }
}

fn element_from_raw(raw: RawElement) -> Option<SpaceTrackElement> {
    let norad_cat_id = match raw.norad_cat_id? {
        Numeric::Number(v) => format!("{}", v),
        Numeric::Text(s) => s.trim().to_string(),
    };
    Some(SpaceTrackElement {
        object_name: raw.object_name?,
        norad_cat_id,
        inclination_deg: raw.inclination?.value()?,
        ra_of_asc_node_deg: raw.ra_of_asc_node?.value()?,
        mean_motion: raw.mean_motion?.value()?,
        apogee_km: raw.apogee.and_then(|v| v.value()),
        perigee_km: raw.perigee.and_then(|v| v.value()),
    })
}

/// Parse a Space-Track JSON array. Entries missing a required field are
/// skipped with a warning; malformed JSON is an error.
pub fn parse_spacetrack_json(data: &str) -> anyhow::Result<Vec<SpaceTrackElement>> {
    let raw: Vec<RawElement> =
        serde_json::from_str(data).context("Space-Track export is not a JSON array of objects")?;
    let total = raw.len();
    let elements: Vec<SpaceTrackElement> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(i, r)| {
            let element = element_from_raw(r);
            if element.is_none() {
                warn!("Skipping Space-Track entry #{}: missing or non-numeric field", i);
            }
            element
        })
        .collect();
    info!("Parsed {} of {} Space-Track entries", elements.len(), total);
    Ok(elements)
}

/// Parse a Space-Track export and map every element set to a body.
pub fn load_spacetrack_bodies(data: &str) -> anyhow::Result<Vec<Body>> {
    Ok(parse_spacetrack_json(data)?
        .iter()
        .map(SpaceTrackElement::to_body)
        .collect())
}

pub fn load_spacetrack_bodies_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Body>> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    load_spacetrack_bodies(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "OBJECT_NAME": "ISS (ZARYA)",
            "NORAD_CAT_ID": "25544",
            "INCLINATION": "51.6416",
            "RA_OF_ASC_NODE": "247.4627",
            "MEAN_MOTION": "15.50103472",
            "APOGEE": "422.3",
            "PERIGEE": "418.7"
        },
        {
            "OBJECT_NAME": "NUMERIC FIELDS",
            "NORAD_CAT_ID": 5,
            "INCLINATION": 34.249149,
            "RA_OF_ASC_NODE": 305.68893,
            "MEAN_MOTION": 10.859251462
        },
        {
            "OBJECT_NAME": "NO MEAN MOTION",
            "NORAD_CAT_ID": "11",
            "INCLINATION": "32.869292",
            "RA_OF_ASC_NODE": "232.6275"
        }
    ]"#;

    #[test]
    fn parses_string_and_numeric_fields() {
        let elements = parse_spacetrack_json(SAMPLE).unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].norad_cat_id, "25544");
        assert_eq!(elements[0].apogee_km, Some(422.3));
        assert_eq!(elements[1].norad_cat_id, "5");
        assert_eq!(elements[1].perigee_km, None);
    }

    #[test]
    fn applies_placeholder_mapping() {
        let bodies = load_spacetrack_bodies(SAMPLE).unwrap();
        let iss = &bodies[0];
        assert_eq!(iss.name, "ISS (ZARYA)");
        assert_eq!(iss.position.latitude_deg, 51.6416);
        assert_eq!(iss.position.longitude_deg, 247.4627);
        assert!((iss.position.altitude_km - 1550.103472).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_array_payload() {
        assert!(parse_spacetrack_json(r#"{"Login":"Failed"}"#).is_err());
    }
}
