//! MR classification: custom overrides, label inference and imaging
//! parameter inference

use super::{Classified, SeriesContext};
use crate::error::Result;
use crate::header::tags::{ECHO_TIME, INVERSION_TIME, REPETITION_TIME};
use crate::patterns::common::is_localizer;
use crate::patterns::mr::*;
use crate::resolve::CustomClassifications;
use crate::types::classification::{CUSTOM, FEATURES, INTENT, LOCALIZER, MEASUREMENT};
use crate::types::{Classification, Info, SliceTable, IMAGE_ORIENTATION_PATIENT};
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::HashSet;

/// Echo time below which (with a short TR) a series is T1 weighted (ms)
pub const T1_MAX_TE_MS: f64 = 30.0;
/// Repetition time below which (with a short TE) a series is T1 weighted (ms)
pub const T1_MAX_TR_MS: f64 = 800.0;
/// Echo time above which (with a long TR) a series is T2 weighted (ms)
pub const T2_MIN_TE_MS: f64 = 50.0;
/// Repetition time above which (with a long TE) a series is T2 weighted (ms)
pub const T2_MIN_TR_MS: f64 = 2000.0;
/// Echo time below which (with a long TR) a series is proton density (ms)
pub const PD_MAX_TE_MS: f64 = 50.0;
/// Repetition time above which (with a short TE) a series is proton density (ms)
pub const PD_MIN_TR_MS: f64 = 1000.0;
/// Series with fewer slices than this are localizers
pub const MR_LOCALIZER_MAX_SLICES: usize = 10;

fn tags(entries: &[(&str, &str)]) -> Classification {
    let mut classification = Classification::new();
    for (key, value) in entries {
        classification.set(key, [*value]);
    }
    classification
}

/// Classification implied by a label alone
///
/// The first matching category branch sets the primary tags, then every
/// feature, measurement and intent vocabulary term found in the label is
/// appended. Returns an empty classification for an empty label.
pub fn infer_classification(label: &str) -> Classification {
    if label.is_empty() {
        return Classification::new();
    }

    let mut classification = if is_anatomy_inplane(label) {
        tags(&[
            (INTENT, "Structural"),
            (MEASUREMENT, "T1"),
            (FEATURES, "In-Plane"),
        ])
    } else if is_fieldmap(label) {
        tags(&[(INTENT, "Fieldmap"), (MEASUREMENT, "B0")])
    } else if is_diffusion_derived(label) {
        tags(&[
            (INTENT, "Structural"),
            (MEASUREMENT, "Diffusion"),
            (FEATURES, "Derived"),
        ])
    } else if is_diffusion(label) {
        tags(&[(INTENT, "Structural"), (MEASUREMENT, "Diffusion")])
    } else if is_functional_derived(label) {
        tags(&[(INTENT, "Functional"), (FEATURES, "Derived")])
    } else if is_functional(label) {
        tags(&[(INTENT, "Functional"), (MEASUREMENT, "T2*")])
    } else if is_anatomy_t1(label) {
        tags(&[(INTENT, "Structural"), (MEASUREMENT, "T1")])
    } else if is_anatomy_t2(label) {
        tags(&[(INTENT, "Structural"), (MEASUREMENT, "T2")])
    } else if is_anatomy(label) {
        tags(&[(INTENT, "Structural")])
    } else if is_swi(label) {
        tags(&[(INTENT, "Structural"), (MEASUREMENT, "Susceptibility")])
    } else if is_localizer(label) {
        tags(&[(INTENT, LOCALIZER), (MEASUREMENT, "T2")])
    } else if is_shim(label) {
        tags(&[(INTENT, "Shim")])
    } else if is_calibration(label) {
        tags(&[(INTENT, "Calibration")])
    } else if is_coil_survey(label) {
        tags(&[(INTENT, "Calibration"), (MEASUREMENT, "B1")])
    } else if is_proton_density(label) {
        tags(&[(INTENT, "Structural"), (MEASUREMENT, "PD")])
    } else if is_perfusion(label) {
        tags(&[(MEASUREMENT, "Perfusion")])
    } else if is_spectroscopy(label) {
        tags(&[(INTENT, "Spectroscopy")])
    } else if is_phase_map(label) {
        tags(&[(CUSTOM, "Phase Map")])
    } else if is_screenshot(label) {
        tags(&[(INTENT, "Screenshot")])
    } else {
        debug!("No category matched label '{}'", label.trim_end());
        Classification::new()
    };

    classification.extend_unique(FEATURES, feature_check(label));
    classification.extend_unique(MEASUREMENT, measurement_check(label));
    classification.extend_unique(INTENT, intent_check(label));

    classification
}

/// Numeric header value treated as absent when missing, non-numeric or zero
fn timing(ctx: &SeriesContext, keyword: &str) -> Option<f64> {
    match ctx.header.get_f64(keyword) {
        Some(value) => {
            debug!("{}={}", keyword, value);
            Some(value).filter(|v| *v != 0.0)
        }
        None => {
            warn!("{} unset", keyword);
            None
        }
    }
}

/// Classification from imaging parameters
///
/// # Algorithm
///
/// 1. `TE < 30` and `TR < 800` → `Measurement = T1`
/// 2. else `TE > 50`, `TR > 2000` and no `TI` → `Measurement = T2`
/// 3. else `TI > 0` → `Features = FLAIR`
/// 4. else `TE < 50` and `TR > 1000` → `Measurement = PD`
/// 5. `POST` in the series description → `Custom = Contrast`
/// 6. fewer than 10 slices, or every slice differently oriented →
///    `Intent = Localizer`
pub fn param_classification(
    ctx: &SeriesContext,
    slice_number: usize,
    unique_iop: bool,
) -> Classification {
    info!("Attempting to deduce classification from imaging parameters...");
    let mut classification = Classification::new();

    let tr = timing(ctx, REPETITION_TIME);
    let te = timing(ctx, ECHO_TIME);
    let ti = timing(ctx, INVERSION_TIME);
    if ctx.series_description.is_none() {
        warn!("SeriesDescription unset");
    }

    let below = |value: Option<f64>, limit: f64| value.is_some_and(|v| v < limit);
    let above = |value: Option<f64>, limit: f64| value.is_some_and(|v| v > limit);

    if below(te, T1_MAX_TE_MS) && below(tr, T1_MAX_TR_MS) {
        info!("Short TE and TR -- T1 Measurement");
        classification.set(MEASUREMENT, ["T1"]);
    } else if above(te, T2_MIN_TE_MS) && above(tr, T2_MIN_TR_MS) && ti.is_none() {
        info!("Long TE and TR without TI -- T2 Measurement");
        classification.set(MEASUREMENT, ["T2"]);
    } else if above(ti, 0.0) {
        info!("TI > 0 -- FLAIR Features");
        classification.set(FEATURES, ["FLAIR"]);
    } else if below(te, PD_MAX_TE_MS) && above(tr, PD_MIN_TR_MS) {
        info!("Short TE and long TR -- PD Measurement");
        classification.set(MEASUREMENT, ["PD"]);
    }

    if is_post(&ctx.series_description) {
        info!("POST found in Series Description -- Adding Contrast to custom classification");
        classification.set(CUSTOM, ["Contrast"]);
    }

    if slice_number > 0 && slice_number < MR_LOCALIZER_MAX_SLICES {
        info!("Only {} slice(s) -- Localizer Intent", slice_number);
        classification.set(INTENT, [LOCALIZER]);
    }

    if unique_iop {
        info!("Every slice is differently oriented -- Localizer Intent");
        classification.set(INTENT, [LOCALIZER]);
    }

    if classification.is_empty() {
        warn!("Could not determine classification based on parameters!");
    } else {
        info!("Inferred classification from parameters: {}", classification);
    }
    classification
}

/// Comparison key of one orientation; numbers compare by value so `1` and
/// `1.0` (or `0.0` and `-0.0`) are the same component
fn orientation_key(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .map(|item| match item.as_f64() {
            Some(n) => (n + 0.0).to_string(),
            None => item.to_string(),
        })
        .collect()
}

/// Whether more than one slice carries a list-valued
/// `ImageOrientationPatient` and no two of those are equal
pub fn iop_is_unique(slices: &SliceTable) -> bool {
    let Some(column) = slices.column(IMAGE_ORIENTATION_PATIENT) else {
        return false;
    };
    let orientations: Vec<Vec<String>> = column
        .into_iter()
        .filter_map(Value::as_array)
        .map(|items| orientation_key(items))
        .collect();
    if orientations.len() <= 1 {
        return false;
    }
    let distinct: HashSet<&Vec<String>> = orientations.iter().collect();
    distinct.len() == orientations.len()
}

/// Classifies an MR series
///
/// # Algorithm
///
/// 1. Custom rules on the acquisition label, then the series description
/// 2. Label inference on the acquisition label, then the series description
/// 3. Imaging parameter inference
///
/// The first step that yields anything ends the cascade. MR produces no
/// info fields.
pub fn classify_mr(
    ctx: &SeriesContext,
    custom: Option<&CustomClassifications>,
) -> Result<Classified> {
    info!("Determining MR Classification...");
    let label = ctx.acquisition_label;
    let description = ctx.series_description();

    let mut classification = Classification::new();

    if label.is_some() || description.is_some() {
        if let Some(custom) = custom {
            classification = label
                .and_then(|l| custom.classify(l))
                .or_else(|| description.and_then(|d| custom.classify(d)))
                .unwrap_or_default();
            if !classification.is_empty() {
                info!("Custom classification from config: {}", classification);
            }
        }

        if classification.is_empty() {
            if let Some(label) = label {
                classification = infer_classification(label);
            }
            if classification.is_empty() {
                if let Some(description) = description {
                    classification = infer_classification(description);
                }
            }
            if !classification.is_empty() {
                info!("Inferred classification from label: {}", classification);
            }
        }
    }

    if classification.is_empty() {
        let unique_iop = ctx.slices.len() > 1 && iop_is_unique(ctx.slices);
        classification = param_classification(ctx, ctx.slices.len(), unique_iop);
    }

    Ok(Classified::new(classification, Info::new()))
}
