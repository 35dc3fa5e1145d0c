//! Readers that turn catalog files into [`Body`](crate::Body) lists.
//!
//! Fetching catalogs over the network is left to the caller; these readers
//! only parse files or strings that are already at hand.

pub mod spacetrack;
pub mod tabular;

use std::path::Path;

use crate::Body;

/// On-disk catalog layouts understood by [`load_catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// CSV with `name,catalog_id,latitude_deg,longitude_deg,altitude_km` columns.
    Csv,
    /// Space-Track `tle_latest` JSON export.
    SpaceTrack,
}

impl CatalogFormat {
    /// Guess the format from a file extension (`.json` is Space-Track,
    /// anything else CSV).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => CatalogFormat::SpaceTrack,
            _ => CatalogFormat::Csv,
        }
    }
}

/// Load a catalog file in the given format.
pub fn load_catalog<P: AsRef<Path>>(path: P, format: CatalogFormat) -> anyhow::Result<Vec<Body>> {
    match format {
        CatalogFormat::Csv => tabular::read_body_csv(path),
        CatalogFormat::SpaceTrack => spacetrack::load_spacetrack_bodies_from_file(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(CatalogFormat::from_path("a/b/tle.JSON"), CatalogFormat::SpaceTrack);
        assert_eq!(CatalogFormat::from_path("bodies.csv"), CatalogFormat::Csv);
        assert_eq!(CatalogFormat::from_path("bodies"), CatalogFormat::Csv);
    }
}
