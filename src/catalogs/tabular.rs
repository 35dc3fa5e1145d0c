//! Plain CSV body catalogs.
//!
//! Expected header:
//!
//! ```text
//! name,catalog_id,latitude_deg,longitude_deg,altitude_km
//! ```
//!
//! Numeric columns are parsed as `f64`, so `nan` or `inf` are accepted here
//! and left for the screener to reject.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::Body;

#[derive(Debug, Deserialize)]
struct BodyRow {
    name: String,
    catalog_id: String,
    latitude_deg: f64,
    longitude_deg: f64,
    altitude_km: f64,
}

impl From<BodyRow> for Body {
    fn from(row: BodyRow) -> Self {
        Body::new(
            row.name,
            row.catalog_id,
            row.latitude_deg,
            row.longitude_deg,
            row.altitude_km,
        )
    }
}

/// Read bodies from any CSV source.
pub fn read_bodies<R: Read>(reader: R) -> anyhow::Result<Vec<Body>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);
    rdr.deserialize::<BodyRow>()
        .enumerate()
        .map(|(i, row)| {
            row.map(Body::from)
                .with_context(|| format!("bad catalog row {}", i + 1))
        })
        .collect()
}

/// Read bodies from a CSV file.
pub fn read_body_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Body>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open catalog {}", path.display()))?;
    read_bodies(file).with_context(|| format!("failed to read catalog {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_and_skips_comments() {
        let data = "\
name,catalog_id,latitude_deg,longitude_deg,altitude_km
# scheduled for deorbit
SAT1, 1, 0.0, 0.0, 400.0
SAT2,2,0.01,0.01,400.5
";
        let bodies = read_bodies(data.as_bytes()).unwrap();
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies[0].catalog_id, "1");
        assert_eq!(bodies[1].position.altitude_km, 400.5);
    }

    #[test]
    fn nan_passes_through_for_the_screener() {
        let data = "name,catalog_id,latitude_deg,longitude_deg,altitude_km\nX,9,NaN,0,400\n";
        let bodies = read_bodies(data.as_bytes()).unwrap();
        assert!(bodies[0].position.latitude_deg.is_nan());
        assert!(bodies[0].validate().is_err());
    }

    #[test]
    fn malformed_row_reports_its_position() {
        let data = "name,catalog_id,latitude_deg,longitude_deg,altitude_km\n\
                    A,1,0,0,400\n\
                    B,2,north,0,400\n";
        let err = read_bodies(data.as_bytes()).unwrap_err();
        assert!(format!("{:#}", err).contains("bad catalog row 2"), "{:#}", err);
    }
}
