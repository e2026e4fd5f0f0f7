//! Python bindings for scancat
//!
//! Exposes `classify` over JSON strings so Python callers can pass the
//! header and slice table they already hold.

// Suppress false positive warnings from PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

mod classifier;
mod errors;
mod utils;

pub use classifier::*;
pub use errors::*;

/// Python module definition
#[pymodule]
fn _scancat(py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("ScancatError", py.get_type_bound::<errors::PyScancatError>())?;
    m.add("DicomError", py.get_type_bound::<errors::PyDicomError>())?;
    m.add(
        "InvalidValueError",
        py.get_type_bound::<errors::PyInvalidValueError>(),
    )?;
    m.add("ConfigError", py.get_type_bound::<errors::PyConfigError>())?;
    m.add(
        "ClassificationError",
        py.get_type_bound::<errors::PyClassificationError>(),
    )?;

    m.add_function(wrap_pyfunction!(py_classify, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
