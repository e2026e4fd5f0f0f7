//! Core type definitions for series classification
//!
//! - [`Modality`]: modalities with a classifier (CT, MR, PT, OPHTHA)
//! - [`Anatomy`]: body region tags and the canonical [`SEQUENCE_ANATOMY`]
//! - [`Classification`]: category name to tag list output
//! - [`Info`]: derived scalar metadata output
//! - [`SliceTable`]: per-image rows of a series
//! - [`ImageType`]: DICOM ImageType values

pub mod classification;
mod enums;
mod image_type;
mod info;
mod slice_table;

pub use classification::Classification;
pub use enums::{Anatomy, Modality, ReconstructionWindow, ScanOrientation, SEQUENCE_ANATOMY};
pub use image_type::{ImageType, PixelKind};
pub use info::Info;
pub use slice_table::{SliceTable, IMAGE_ORIENTATION_PATIENT, IMAGE_POSITION_PATIENT};
