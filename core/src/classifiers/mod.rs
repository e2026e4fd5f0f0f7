//! Modality classifiers
//!
//! Each classifier is a decision tree with ordered, mutually exclusive
//! branches at the top and additive tag layers below. Branch order is part of
//! the behavior.

pub mod common;
pub mod ct;
pub mod mr;
pub mod ophtha;
pub mod pt;

pub use ct::classify_ct;
pub use mr::classify_mr;
pub use ophtha::{classify_ophtha, OphthaDetails};
pub use pt::classify_pt;

use crate::header::Header;
use crate::types::{Classification, Info, SliceTable};

/// Inputs of one classification call
#[derive(Debug, Clone)]
pub struct SeriesContext<'a> {
    pub header: &'a Header,
    pub slices: &'a SliceTable,
    pub acquisition_label: Option<&'a str>,
    /// Cleaned `SeriesDescription`
    pub series_description: Option<String>,
}

impl<'a> SeriesContext<'a> {
    pub fn new(
        header: &'a Header,
        slices: &'a SliceTable,
        acquisition_label: Option<&'a str>,
    ) -> Self {
        Self {
            header,
            slices,
            acquisition_label: acquisition_label.filter(|label| !label.is_empty()),
            series_description: header.series_description(),
        }
    }

    pub fn series_description(&self) -> Option<&str> {
        self.series_description.as_deref()
    }
}

/// Classification and info produced together for one series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classified {
    pub classification: Classification,
    pub info: Info,
}

impl Classified {
    pub fn new(classification: Classification, info: Info) -> Self {
        Self {
            classification,
            info,
        }
    }

    /// Localizer short-circuit: `Scan Type = ["Localizer"]` and nothing else
    pub fn localizer() -> Self {
        Self::new(Classification::localizer(), Info::new())
    }
}
