use numpy::PyReadonlyArray2;
use pyo3::prelude::*;

use conjunct::{Body, ConfigError, ScreeningConfig};

use crate::body::PyBody;

/// Build a screening config from keyword arguments, validating thresholds.
pub(crate) fn screening_config(
    collision_threshold_km: f64,
    warning_threshold_km: f64,
    critical_threshold_km: f64,
    parallel: bool,
) -> PyResult<ScreeningConfig> {
    let config = ScreeningConfig {
        collision_threshold_km,
        warning_threshold_km,
        critical_threshold_km,
        parallel,
        ..Default::default()
    };
    config.validate().map_err(config_err)?;
    Ok(config)
}

pub(crate) fn config_err(e: ConfigError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(e.to_string())
}

/// Parse bodies from a list of Body objects or an Nx3 array of
/// (latitude_deg, longitude_deg, altitude_km). Array rows are named by index.
pub(crate) fn parse_bodies(bodies: &Bound<'_, pyo3::PyAny>) -> PyResult<Vec<Body>> {
    if let Ok(list) = bodies.cast::<pyo3::types::PyList>() {
        return list
            .iter()
            .map(|item| {
                let b: PyBody = item.extract()?;
                Ok(b.inner)
            })
            .collect();
    }
    if let Ok(arr) = bodies.extract::<PyReadonlyArray2<f64>>() {
        return positions_to_bodies(arr);
    }
    Err(pyo3::exceptions::PyTypeError::new_err(
        "bodies must be a list of Body objects or an Nx3 array of (lat, lon, alt)",
    ))
}

pub(crate) fn positions_to_bodies(positions: PyReadonlyArray2<f64>) -> PyResult<Vec<Body>> {
    let arr = positions.as_array();
    if arr.shape()[1] != 3 {
        return Err(pyo3::exceptions::PyValueError::new_err(format!(
            "positions must have 3 columns (lat, lon, alt), got {}",
            arr.shape()[1]
        )));
    }
    Ok((0..arr.shape()[0])
        .map(|i| {
            Body::new(
                format!("#{}", i),
                i.to_string(),
                arr[[i, 0]],
                arr[[i, 1]],
                arr[[i, 2]],
            )
        })
        .collect())
}
