//! Python exception types for scancat

// Suppress warnings from PyO3's create_exception! macro about gil-refs feature
#![allow(unexpected_cfgs)]

use crate::error::ScancatError;
use pyo3::{create_exception, exceptions::PyException, prelude::*};

create_exception!(
    scancat,
    PyScancatError,
    PyException,
    "Base exception for all scancat errors"
);

create_exception!(
    scancat,
    PyDicomError,
    PyScancatError,
    "DICOM or file reading error"
);

create_exception!(
    scancat,
    PyInvalidValueError,
    PyScancatError,
    "Malformed header, slice table or series document"
);

create_exception!(
    scancat,
    PyConfigError,
    PyScancatError,
    "Unusable custom classification configuration"
);

create_exception!(
    scancat,
    PyClassificationError,
    PyScancatError,
    "Series could not be classified"
);

/// Convert Rust ScancatError to appropriate Python exception
pub fn convert_error(err: ScancatError) -> PyErr {
    let msg = err.to_string();
    match err {
        ScancatError::DicomError(_) | ScancatError::IoError(_) => PyDicomError::new_err(msg),
        ScancatError::InvalidValue(_) | ScancatError::Json(_) => PyInvalidValueError::new_err(msg),
        ScancatError::Config(_) => PyConfigError::new_err(msg),
        ScancatError::InvalidImageType(_)
        | ScancatError::RangedAnatomyOrder { .. }
        | ScancatError::MissingRangeToken(_)
        | ScancatError::UnsupportedModality(_) => PyClassificationError::new_err(msg),
    }
}
