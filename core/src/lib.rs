pub mod api;
pub mod classifiers;
pub mod cli;
pub mod error;
pub mod header;
pub mod patterns;
pub mod resolve;
pub mod series;
pub mod types;

#[cfg(feature = "python")]
mod python;

pub use api::{SeriesClassification, SeriesClassifier};
pub use classifiers::OphthaDetails;
pub use cli::report::TextReport;
pub use error::{Result, ScancatError};
pub use header::Header;
pub use resolve::CustomClassifications;
pub use series::SeriesDocument;
pub use types::*;
