use pyo3::prelude::*;

use conjunct::ConjunctionRecord;

/// A pair of bodies found within the collision threshold.
#[pyclass(name = "Conjunction", frozen, from_py_object)]
#[derive(Clone)]
pub(crate) struct PyConjunction {
    pub(crate) inner: ConjunctionRecord,
}

#[pymethods]
impl PyConjunction {
    /// Record identifier (UUID string).
    #[getter]
    fn id(&self) -> String {
        self.inner.id.to_string()
    }

    #[getter]
    fn primary_name(&self) -> &str {
        &self.inner.primary.name
    }

    #[getter]
    fn primary_id(&self) -> &str {
        &self.inner.primary.catalog_id
    }

    #[getter]
    fn secondary_name(&self) -> &str {
        &self.inner.secondary.name
    }

    #[getter]
    fn secondary_id(&self) -> &str {
        &self.inner.secondary.catalog_id
    }

    #[getter]
    fn min_distance_km(&self) -> f64 {
        self.inner.min_distance_km
    }

    /// "CRITICAL", "WARNING" or "INFO".
    #[getter]
    fn risk_level(&self) -> &'static str {
        self.inner.tier.as_str()
    }

    #[getter]
    fn probability_score(&self) -> u8 {
        self.inner.probability_score
    }

    #[getter]
    fn status(&self) -> &'static str {
        self.inner.status.as_str()
    }

    /// Detection time as an RFC 3339 string (UTC).
    #[getter]
    fn detected_at(&self) -> String {
        self.inner.detected_at.to_rfc3339()
    }

    fn __repr__(&self) -> String {
        format!(
            "Conjunction({} <-> {}, {:.3} km, {})",
            self.inner.primary,
            self.inner.secondary,
            self.inner.min_distance_km,
            self.inner.tier.as_str(),
        )
    }
}
