use numpy::PyArray1;
use pyo3::prelude::*;

use conjunct::Body;

/// A tracked object at a geodetic position.
///
/// Attributes:
///     name: Display name.
///     catalog_id: Catalog identifier (e.g. NORAD number).
///     latitude_deg: Geodetic latitude in degrees.
///     longitude_deg: Longitude in degrees.
///     altitude_km: Height above the spherical Earth in km.
#[pyclass(name = "Body", frozen, from_py_object)]
#[derive(Clone)]
pub(crate) struct PyBody {
    pub(crate) inner: Body,
}

#[pymethods]
impl PyBody {
    #[new]
    fn new(
        name: String,
        catalog_id: String,
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_km: f64,
    ) -> Self {
        PyBody {
            inner: Body::new(name, catalog_id, latitude_deg, longitude_deg, altitude_km),
        }
    }

    #[getter]
    fn name(&self) -> &str {
        &self.inner.name
    }

    #[getter]
    fn catalog_id(&self) -> &str {
        &self.inner.catalog_id
    }

    #[getter]
    fn latitude_deg(&self) -> f64 {
        self.inner.position.latitude_deg
    }

    #[getter]
    fn longitude_deg(&self) -> f64 {
        self.inner.position.longitude_deg
    }

    #[getter]
    fn altitude_km(&self) -> f64 {
        self.inner.position.altitude_km
    }

    /// Earth-centred Cartesian position (x, y, z) in km.
    fn to_cartesian<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        let p = self.inner.position.to_cartesian();
        PyArray1::from_vec(py, vec![p.x, p.y, p.z])
    }

    fn __repr__(&self) -> String {
        format!(
            "Body(name={:?}, catalog_id={:?}, lat={:.4}°, lon={:.4}°, alt={:.3} km)",
            self.inner.name,
            self.inner.catalog_id,
            self.inner.position.latitude_deg,
            self.inner.position.longitude_deg,
            self.inner.position.altitude_km,
        )
    }

    fn __str__(&self) -> String {
        self.inner.identity().to_string()
    }
}
