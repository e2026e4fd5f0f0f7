//! PET classification
//!
//! After the localizer gate, coverage and anatomy, an ordered list of
//! [`PtStep`]s fills `Isotope`, `Tracer` and `Processing`. A step never
//! overwrites a value an earlier source already found.

use super::common::is_localizer_series;
use super::{Classified, SeriesContext};
use crate::error::Result;
use crate::header::tags::{
    ATTENUATION_CORRECTION_METHOD, CORRECTED_IMAGE, RADIONUCLIDE_CODE_MEANING,
    RADIONUCLIDE_CODE_VALUE, RADIOPHARMACEUTICAL, RADIOPHARMACEUTICAL_CODE_MEANING,
    RADIOPHARMACEUTICAL_CODE_VALUE,
};
use crate::resolve::{compute_scan_coverage_if_original, resolve_anatomy};
use crate::types::classification::{ANATOMY, ISOTOPE, PROCESSING, TRACER};
use crate::types::{Anatomy, Classification};
use log::{debug, info, warn};
use serde_json::Value;

pub const F18: &str = "F18";
pub const FDG: &str = "FDG";
pub const ATTENUATION_CORRECTED: &str = "Attenuation Corrected";

/// Radionuclide code values and their isotope
pub const RADIONUCLIDE_CODES: &[(&str, &str)] = &[
    ("C-111A1", F18),
    ("C-105A1", "C11"),
    ("C-107A1", "N13"),
    ("C-B1038", "O15"),
    ("C-131A3", "Ga68"),
];

/// Radiopharmaceutical code values meaning fluorodeoxyglucose
pub const FDG_CODES: &[&str] = &["C-B1031", "Y-X1743"];

/// One PET sub-classification
pub type PtStep = fn(&SeriesContext, &mut Classification);

/// Steps applied in order after anatomy
pub const PT_STEPS: &[(&str, PtStep)] = &[
    ("isotope", classify_isotope),
    ("tracer", classify_tracer),
    ("processing", classify_processing),
];

/// Python-style truthiness of a header value
fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn lowercase(ctx: &SeriesContext, path: &str) -> Option<String> {
    ctx.header.get_str(path).map(str::to_lowercase)
}

/// Records an isotope unless one is already present
///
/// A different existing isotope is kept and the conflict is logged.
fn record_isotope(classification: &mut Classification, isotope: &str) {
    let existing = classification.first(ISOTOPE).map(str::to_string);
    match existing {
        None => {
            classification.push_unique(ISOTOPE, isotope);
        }
        Some(existing) if existing == isotope => {}
        Some(existing) => warn!(
            "Isotope conflict: found '{}' but '{}' is already classified; keeping '{}'",
            isotope, existing, existing
        ),
    }
}

/// Isotope from the radionuclide code, then the radionuclide and tracer code
/// meanings
pub fn classify_isotope(ctx: &SeriesContext, classification: &mut Classification) {
    let by_code = ctx.header.get_str(RADIONUCLIDE_CODE_VALUE).and_then(|code| {
        RADIONUCLIDE_CODES
            .iter()
            .find(|(value, _)| *value == code)
            .map(|(_, isotope)| *isotope)
    });

    let isotope = by_code
        .or_else(|| {
            lowercase(ctx, RADIONUCLIDE_CODE_MEANING)
                .filter(|meaning| meaning.contains("18") && meaning.contains('f'))
                .map(|_| F18)
        })
        .or_else(|| {
            lowercase(ctx, RADIOPHARMACEUTICAL_CODE_MEANING)
                .filter(|meaning| meaning.contains("f^18"))
                .map(|_| F18)
        });

    match isotope {
        Some(isotope) => record_isotope(classification, isotope),
        None => debug!("No isotope found in radiopharmaceutical information"),
    }
}

fn mentions_fdg(text: &str) -> bool {
    text.contains("fluorodeoxyglucose") || text.contains("fdg")
}

/// Tracer from the radiopharmaceutical code, then its code meaning, then the
/// free-text `Radiopharmaceutical`
///
/// FDG implies an F18 isotope.
pub fn classify_tracer(ctx: &SeriesContext, classification: &mut Classification) {
    if !classification.tags(TRACER).is_empty() {
        return;
    }

    let found = ctx
        .header
        .get_str(RADIOPHARMACEUTICAL_CODE_VALUE)
        .is_some_and(|code| FDG_CODES.contains(&code))
        || lowercase(ctx, RADIOPHARMACEUTICAL_CODE_MEANING).is_some_and(|m| mentions_fdg(&m))
        || lowercase(ctx, RADIOPHARMACEUTICAL).is_some_and(|r| mentions_fdg(&r));

    if found {
        classification.push_unique(TRACER, FDG);
        record_isotope(classification, F18);
    }
}

/// Attenuation correction from `AttenuationCorrectionMethod`, then
/// `CorrectedImage`, then an `AC` in the acquisition label
pub fn classify_processing(ctx: &SeriesContext, classification: &mut Classification) {
    if classification.contains(PROCESSING, ATTENUATION_CORRECTED) {
        return;
    }

    let by_method = ctx
        .header
        .get(ATTENUATION_CORRECTION_METHOD)
        .is_some_and(is_set);
    let by_corrected_image = match ctx.header.get(CORRECTED_IMAGE) {
        Some(Value::Array(items)) => items.iter().any(|item| item.as_str() == Some("ATTN")),
        Some(Value::String(s)) => s.contains("ATTN"),
        _ => false,
    };
    let by_label = ctx.acquisition_label.is_some_and(|label| label.contains("AC"));

    if by_method || by_corrected_image || by_label {
        classification.push_unique(PROCESSING, ATTENUATION_CORRECTED);
    }
}

/// Classifies a PET series
///
/// # Algorithm
///
/// 1. Localizer gate; a localizer gets only `Scan Type = ["Localizer"]`
/// 2. Scan coverage (ORIGINAL series only)
/// 3. Anatomy cascade
/// 4. Each of [`PT_STEPS`] in order
pub fn classify_pt(ctx: &SeriesContext) -> Result<Classified> {
    info!("Determining PT Classification...");

    if is_localizer_series(ctx) {
        return Ok(Classified::localizer());
    }

    let (scan_coverage, info) = compute_scan_coverage_if_original(ctx.header, ctx.slices)?;

    let mut classification = Classification::new();
    let anatomy = resolve_anatomy(ctx.acquisition_label, ctx.series_description(), scan_coverage)?;
    classification.set(ANATOMY, anatomy.iter().map(Anatomy::simple_name));

    for (name, step) in PT_STEPS {
        debug!("Applying PT step '{}'", name);
        step(ctx, &mut classification);
    }

    Ok(Classified::new(classification, info))
}
