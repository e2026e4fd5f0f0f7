//! Resolvers shared by the modality classifiers
//!
//! - [`coverage`]: axial scan coverage and the anatomy it implies
//! - [`anatomy`]: label anatomy, ranged anatomy and the anatomy cascade
//! - [`custom`]: user-configured label overrides

pub mod anatomy;
pub mod coverage;
pub mod custom;

pub use anatomy::{
    anatomy_from_label, classify_anatomy, resolve_anatomy, resolve_ranged_anatomy, RangedAnatomy,
};
pub use coverage::{
    anatomy_from_scan_coverage, compute_scan_coverage, compute_scan_coverage_if_original,
    ScanCoverage, CAP_MIN_COVERAGE_MM, HEAD_MAX_COVERAGE_MM, WHOLE_BODY_MIN_COVERAGE_MM,
};
pub use custom::{parse_classification_string, CustomClassifications};
