use crate::types::Anatomy;
use thiserror::Error;

/// Result type for scancat operations
pub type Result<T> = std::result::Result<T, ScancatError>;

/// Error types for scancat operations
#[derive(Error, Debug)]
pub enum ScancatError {
    /// `ImageType` is present in the header but is not a list
    #[error(
        "Cannot determine if scan coverage should be computed. Header 'ImageType' is not a list \
         (found {0}). Re-run metadata import and validation."
    )]
    InvalidImageType(String),

    /// A ranged anatomy label runs against the canonical body sequence
    #[error(
        "Ranged anatomy does not conform to sequence. First anatomy index ('{first_index}') is \
         greater than last anatomy index ('{last_index}'). First anatomy ('{first}') should come \
         before last anatomy ('{last}')"
    )]
    RangedAnatomyOrder {
        first_index: usize,
        last_index: usize,
        first: Anatomy,
        last: Anatomy,
    },

    /// Ranged anatomy was requested for a label without a `to` token
    #[error("Argument label ('{0}') must contain 'to'.")]
    MissingRangeToken(String),

    /// Modality string is not one we classify
    #[error("Unsupported modality: {0}")]
    UnsupportedModality(String),

    /// Invalid input value
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Custom classification configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for ScancatError {
    fn from(e: dicom_object::ReadError) -> Self {
        ScancatError::DicomError(format!("{}", e))
    }
}
