//! Python entry point for series classification

use pyo3::prelude::*;
use std::path::PathBuf;
use std::str::FromStr;

use super::errors::convert_error;
use super::utils::parse_json;
use crate::api::SeriesClassifier;
use crate::header::Header;
use crate::resolve::CustomClassifications;
use crate::types::{Modality, SliceTable};

/// Classify one series
///
/// Args:
///     modality: CT, MR, PT or OPHTHA (aliases such as PET or OCT accepted)
///     header_json: Series header as a JSON object string
///     slices_json: Per-image rows as a JSON list string
///     acquisition_label: Acquisition label (optional)
///     config_path: Custom classification rules file, str or os.PathLike (optional, MR only)
///
/// Returns:
///     str: JSON object with modality, classification, info and ophtha
///
/// Raises:
///     InvalidValueError: If the header or slices are malformed
///     ConfigError: If the custom classification file is unusable
///     ClassificationError: If the series cannot be classified
///
/// Example:
///     >>> import json
///     >>> from scancat import classify
///     >>> result = json.loads(classify("MR", '{"SeriesDescription": "T2W_FLAIR"}', "[]"))
///     >>> result["classification"]["Measurement"]
///     ['T2']
#[pyfunction]
#[pyo3(name = "classify")]
#[pyo3(signature = (modality, header_json, slices_json, acquisition_label=None, config_path=None))]
pub fn py_classify(
    modality: &str,
    header_json: &str,
    slices_json: &str,
    acquisition_label: Option<&str>,
    config_path: Option<PathBuf>,
) -> PyResult<String> {
    let modality = Modality::from_str(modality).map_err(convert_error)?;
    let header = parse_json("header_json", header_json)
        .and_then(Header::from_json)
        .map_err(convert_error)?;
    let slices = parse_json("slices_json", slices_json)
        .and_then(SliceTable::from_json)
        .map_err(convert_error)?;

    let mut classifier = SeriesClassifier::new();
    if let Some(path) = config_path {
        let custom = CustomClassifications::load(path).map_err(convert_error)?;
        classifier = classifier.with_custom_classifications(custom);
    }

    classifier
        .classify(modality, &header, &slices, acquisition_label)
        .and_then(|result| result.to_json())
        .map_err(convert_error)
}
