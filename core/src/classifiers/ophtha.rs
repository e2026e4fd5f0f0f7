//! Ophthalmology classification: modality and type from the protocol name or
//! acquisition device, laterality and OCT type

use super::{Classified, SeriesContext};
use crate::header::tags::{
    ACQUISITION_DEVICE_CODE_VALUE, COLUMNS, IMAGE_LATERALITY, PROTOCOL_NAME, STUDY_DESCRIPTION,
};
use crate::patterns::ophtha::{is_left, is_oct, is_oct_op, is_oct_opt, is_right};
use crate::types::classification::{LATERALITY, OCT_TYPE};
use crate::types::{Classification, Info};
use log::{debug, info};
use serde::Serialize;

pub const OCT: &str = "OCT";
/// Fundus photography
pub const FP: &str = "FP";

pub const RIGHT_EYE: &str = "Right Eye";
pub const LEFT_EYE: &str = "Left Eye";

/// Acquisition device code of a standard OCT scanner
pub const OCT_DEVICE_CODE: &str = "A-00FBE";
/// Acquisition device code of a fundus OCT scanner
pub const FUNDUS_OCT_DEVICE_CODE: &str = "A-00E8A";

const STANDARD_FIELD: &str = "Standard Field";
const WIDE_FIELD: &str = "Wide Field";

/// Modality, type and sub-type implied by a protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Protocol {
    pub modality: &'static str,
    pub image_type: &'static str,
    pub sub_type: Option<&'static str>,
}

const fn protocol(
    modality: &'static str,
    image_type: &'static str,
    sub_type: Option<&'static str>,
) -> Protocol {
    Protocol {
        modality,
        image_type,
        sub_type,
    }
}

/// Known `ProtocolName` values, matched exactly
pub const PROTOCOLS: &[(&str, Protocol)] = &[
    ("FA", protocol(FP, "Fluorescein Angiography", Some(STANDARD_FIELD))),
    ("FA-4W Sweep", protocol(FP, "Fluorescein Angiography", Some(WIDE_FIELD))),
    ("FA Wide Field", protocol(FP, "Fluorescein Angiography", Some(WIDE_FIELD))),
    ("ICG", protocol(FP, "Indocyanine Green Angiography", Some(STANDARD_FIELD))),
    ("ICG-4W Sweep", protocol(FP, "Indocyanine Green Angiography", Some(WIDE_FIELD))),
    ("FAF", protocol(FP, "Fundus Autofluorescence", Some(STANDARD_FIELD))),
    ("FAF-4W", protocol(FP, "Fundus Autofluorescence", Some(WIDE_FIELD))),
    ("Color", protocol(FP, "Color", Some(STANDARD_FIELD))),
    ("Color Wide Field", protocol(FP, "Color", Some(WIDE_FIELD))),
    ("Red-Free", protocol(FP, "Red-Free", Some(STANDARD_FIELD))),
    ("IR", protocol(FP, "Infrared", Some(STANDARD_FIELD))),
    ("Macular Cube 512x128", protocol(OCT, "Macular Cube", None)),
    ("Macular Cube 200x200", protocol(OCT, "Macular Cube", None)),
    ("Optic Disc Cube 200x200", protocol(OCT, "Optic Disc Cube", None)),
    ("HD 5 Line Raster", protocol(OCT, "Raster", None)),
    ("Radial Scan", protocol(OCT, "Radial", None)),
];

pub fn lookup_protocol(name: &str) -> Option<Protocol> {
    PROTOCOLS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, protocol)| *protocol)
}

/// Ophthalmic modality details reported next to the classification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OphthaDetails {
    #[serde(rename = "Modality", skip_serializing_if = "Option::is_none")]
    pub modality: Option<String>,
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub image_type: Option<String>,
    #[serde(rename = "Sub-Type", skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
}

impl OphthaDetails {
    fn from_protocol(protocol: Protocol) -> Self {
        Self {
            modality: Some(protocol.modality.to_string()),
            image_type: Some(protocol.image_type.to_string()),
            sub_type: protocol.sub_type.map(str::to_string),
        }
    }

    fn modality(modality: &str, image_type: Option<&str>) -> Self {
        Self {
            modality: Some(modality.to_string()),
            image_type: image_type.map(str::to_string),
            sub_type: None,
        }
    }

    pub fn is_oct(&self) -> bool {
        self.modality.as_deref() == Some(OCT)
    }
}

/// Modality resolution
///
/// # Algorithm
///
/// 1. Exact `ProtocolName` lookup in [`PROTOCOLS`]
/// 2. Device code `A-00FBE` → OCT
/// 3. Any device code with `StudyDescription == "CF"` → FP / Color
/// 4. OCT in the acquisition label → OCT
fn resolve_modality(ctx: &SeriesContext, device_code: Option<&str>) -> Option<OphthaDetails> {
    if let Some(protocol) = ctx.header.get_str(PROTOCOL_NAME).and_then(lookup_protocol) {
        debug!("Protocol name matched {:?}", protocol);
        return Some(OphthaDetails::from_protocol(protocol));
    }
    if device_code == Some(OCT_DEVICE_CODE) {
        return Some(OphthaDetails::modality(OCT, None));
    }
    if device_code.is_some_and(|code| !code.is_empty())
        && ctx.header.get_str(STUDY_DESCRIPTION) == Some("CF")
    {
        return Some(OphthaDetails::modality(FP, Some("Color")));
    }
    if is_oct(&ctx.acquisition_label) {
        return Some(OphthaDetails::modality(OCT, None));
    }
    None
}

/// `ImageLaterality` first, then right before left in the label
fn resolve_laterality(ctx: &SeriesContext) -> Option<&'static str> {
    match ctx.header.get_str(IMAGE_LATERALITY) {
        Some("R") | Some("OD") => return Some(RIGHT_EYE),
        Some("L") | Some("OS") => return Some(LEFT_EYE),
        _ => {}
    }
    if is_right(&ctx.acquisition_label) {
        Some(RIGHT_EYE)
    } else if is_left(&ctx.acquisition_label) {
        Some(LEFT_EYE)
    } else {
        None
    }
}

/// OCT type from the device code, then the OP/OPT label patterns
fn resolve_oct_type(ctx: &SeriesContext, device_code: Option<&str>) -> Option<&'static str> {
    match device_code {
        Some(OCT_DEVICE_CODE) => Some("Standard"),
        Some(FUNDUS_OCT_DEVICE_CODE) => Some("Fundus"),
        _ if is_oct_op(&ctx.acquisition_label) => Some("Fundus"),
        _ if is_oct_opt(&ctx.acquisition_label) => Some("Standard"),
        _ => None,
    }
}

/// Classifies an ophthalmic series
///
/// Only series that look like images (a `Columns` header field) or carry an
/// OCT label are classified; anything else yields an empty result.
pub fn classify_ophtha(ctx: &SeriesContext) -> (Classified, Option<OphthaDetails>) {
    info!("Determining OPHTHA Classification...");

    if !ctx.header.has(COLUMNS) && !is_oct(&ctx.acquisition_label) {
        info!("Series has no image columns and no OCT label; skipping");
        return (Classified::default(), None);
    }

    let device_code = ctx.header.get_str(ACQUISITION_DEVICE_CODE_VALUE);
    let mut details = resolve_modality(ctx, device_code);
    let mut classification = Classification::new();

    if let Some(laterality) = resolve_laterality(ctx) {
        classification.set(LATERALITY, [laterality]);
    }

    if let Some(details) = details.as_mut().filter(|d| d.is_oct() && d.sub_type.is_none()) {
        if let Some(oct_type) = resolve_oct_type(ctx, device_code) {
            classification.set(OCT_TYPE, [oct_type]);
            details.sub_type = Some(oct_type.to_string());
        }
    }

    (Classified::new(classification, Info::new()), details)
}
