//! Python bindings for conjunct via PyO3.
//!
//! Exposes the conjunction screener to Python as the `conjunctrs` module.

mod body;
mod conjunction;
mod helpers;

use numpy::ndarray;
use numpy::{PyArray1, PyArray2, PyReadonlyArray2};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use conjunct::catalogs::{load_catalog as load_catalog_file, CatalogFormat};
use conjunct::{ConjunctionScreener, MemoryStore, NoopNotifier, RiskThresholds};

use crate::body::PyBody;
use crate::conjunction::PyConjunction;
use crate::helpers::{config_err, parse_bodies, positions_to_bodies, screening_config};

/// Screen bodies for conjunctions and return the reported pairs.
///
/// Nothing is persisted and no notifications are sent.
///
/// Args:
///     bodies: List of Body objects, or an Nx3 numpy array of
///         (latitude_deg, longitude_deg, altitude_km).
///     collision_threshold_km: Report pairs closer than this. Default 5.0.
///     warning_threshold_km: WARNING below this. Default 3.5.
///     critical_threshold_km: CRITICAL below this. Default 2.0.
///     parallel: Evaluate pairs on the rayon thread pool. Default False.
///
/// Returns:
///     list of Conjunction, in catalog pair order.
#[pyfunction]
#[pyo3(signature = (
    bodies,
    collision_threshold_km = 5.0,
    warning_threshold_km = 3.5,
    critical_threshold_km = 2.0,
    parallel = false,
))]
fn screen(
    py: Python<'_>,
    bodies: &Bound<'_, pyo3::PyAny>,
    collision_threshold_km: f64,
    warning_threshold_km: f64,
    critical_threshold_km: f64,
    parallel: bool,
) -> PyResult<Vec<PyConjunction>> {
    let catalog = parse_bodies(bodies)?;
    let config = screening_config(
        collision_threshold_km,
        warning_threshold_km,
        critical_threshold_km,
        parallel,
    )?;
    let screener = ConjunctionScreener::new(config).map_err(config_err)?;

    let report = py
        .detach(|| {
            let mut store = MemoryStore::new();
            screener.screen(&catalog, &mut store, &NoopNotifier)
        })
        .map_err(|e| pyo3::exceptions::PyRuntimeError::new_err(e.to_string()))?;

    Ok(report
        .conjunctions
        .into_iter()
        .map(|inner| PyConjunction { inner })
        .collect())
}

/// Pairwise scan over a position array, without building records.
///
/// Args:
///     positions: Nx3 numpy array of (latitude_deg, longitude_deg, altitude_km).
///     collision_threshold_km, warning_threshold_km, critical_threshold_km,
///     parallel: As for `screen`.
///
/// Returns:
///     dict with keys:
///         'pairs': Kx2 uint64 array of row indices (i < j).
///         'distances_km': length-K float array.
///         'risk_levels': list of K strings.
///         'probability_scores': length-K uint8 array.
///         'pairs_examined': int
///         'rejected': uint64 array of rows with non-finite values.
#[pyfunction]
#[pyo3(signature = (
    positions,
    collision_threshold_km = 5.0,
    warning_threshold_km = 3.5,
    critical_threshold_km = 2.0,
    parallel = false,
))]
fn screen_positions<'py>(
    py: Python<'py>,
    positions: PyReadonlyArray2<f64>,
    collision_threshold_km: f64,
    warning_threshold_km: f64,
    critical_threshold_km: f64,
    parallel: bool,
) -> PyResult<Bound<'py, PyDict>> {
    let catalog = positions_to_bodies(positions)?;
    let config = screening_config(
        collision_threshold_km,
        warning_threshold_km,
        critical_threshold_km,
        parallel,
    )?;
    let screener = ConjunctionScreener::new(config).map_err(config_err)?;
    let scan = py.detach(|| screener.evaluate(&catalog));

    let k = scan.candidates.len();
    let mut pairs = ndarray::Array2::<u64>::zeros((k, 2));
    for (i, c) in scan.candidates.iter().enumerate() {
        pairs[[i, 0]] = c.primary as u64;
        pairs[[i, 1]] = c.secondary as u64;
    }

    let dict = PyDict::new(py);
    dict.set_item("pairs", PyArray2::from_owned_array(py, pairs))?;
    dict.set_item(
        "distances_km",
        PyArray1::from_vec(py, scan.candidates.iter().map(|c| c.distance_km).collect()),
    )?;
    dict.set_item(
        "risk_levels",
        scan.candidates
            .iter()
            .map(|c| c.classification.tier.as_str())
            .collect::<Vec<_>>(),
    )?;
    dict.set_item(
        "probability_scores",
        PyArray1::from_vec(
            py,
            scan.candidates
                .iter()
                .map(|c| c.classification.probability_score)
                .collect(),
        ),
    )?;
    dict.set_item("pairs_examined", scan.pairs_examined)?;
    dict.set_item(
        "rejected",
        PyArray1::from_vec(py, scan.rejected.iter().map(|r| r.index as u64).collect()),
    )?;
    Ok(dict)
}

/// Classify a single separation.
///
/// Returns:
///     (risk_level, probability_score), or None at or beyond the collision
///     threshold.
#[pyfunction]
#[pyo3(signature = (
    distance_km,
    collision_threshold_km = 5.0,
    warning_threshold_km = 3.5,
    critical_threshold_km = 2.0,
))]
fn classify(
    distance_km: f64,
    collision_threshold_km: f64,
    warning_threshold_km: f64,
    critical_threshold_km: f64,
) -> Option<(&'static str, u8)> {
    let thresholds = RiskThresholds {
        critical_km: critical_threshold_km,
        warning_km: warning_threshold_km,
        collision_km: collision_threshold_km,
    };
    conjunct::classify(distance_km, &thresholds).map(|c| (c.tier.as_str(), c.probability_score))
}

/// Load a catalog file as a list of Body.
///
/// Args:
///     path: CSV or Space-Track JSON file.
///     format: "csv" or "spacetrack". None = guess from the extension.
#[pyfunction]
#[pyo3(signature = (path, format = None))]
fn load_catalog(path: &str, format: Option<&str>) -> PyResult<Vec<PyBody>> {
    let format = match format {
        None => CatalogFormat::from_path(path),
        Some("csv") => CatalogFormat::Csv,
        Some("spacetrack") => CatalogFormat::SpaceTrack,
        Some(other) => {
            return Err(pyo3::exceptions::PyValueError::new_err(format!(
                "unknown catalog format {:?}",
                other
            )))
        }
    };
    let bodies = load_catalog_file(path, format)
        .map_err(|e| pyo3::exceptions::PyIOError::new_err(format!("{:#}", e)))?;
    Ok(bodies.into_iter().map(|inner| PyBody { inner }).collect())
}

/// conjunctrs: static-epoch conjunction screening
///
/// Pairwise proximity screening of orbiting bodies, exposed to Python via
/// PyO3.
#[pymodule]
fn conjunctrs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyBody>()?;
    m.add_class::<PyConjunction>()?;
    m.add_function(wrap_pyfunction!(screen, m)?)?;
    m.add_function(wrap_pyfunction!(screen_positions, m)?)?;
    m.add_function(wrap_pyfunction!(classify, m)?)?;
    m.add_function(wrap_pyfunction!(load_catalog, m)?)?;
    Ok(())
}
