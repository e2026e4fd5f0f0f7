use super::common::{
    contrast, is_localizer_series, reconstruction_window, scan_orientation, scan_type,
};
use super::{Classified, SeriesContext};
use crate::error::Result;
use crate::resolve::{compute_scan_coverage_if_original, resolve_anatomy};
use crate::types::classification::{ANATOMY, CONTRAST, SCAN_TYPE};
use crate::types::{Anatomy, Classification};
use log::info;

/// Classifies a CT series
///
/// # Algorithm
///
/// 1. Localizer gate; a localizer gets only `Scan Type = ["Localizer"]`
/// 2. Scan type from the label, else from the series description
/// 3. Scan coverage (ORIGINAL series only)
/// 4. Reconstruction window from the label
/// 5. Orientation from the label, else from the series description
/// 6. Anatomy cascade
/// 7. Contrast from the label, else from the series description
/// 8. Spacing between slices when coverage was computed
///
/// # Errors
///
/// Fails on a non-list `ImageType` or a backwards ranged anatomy label.
pub fn classify_ct(ctx: &SeriesContext) -> Result<Classified> {
    info!("Determining CT Classification...");

    if is_localizer_series(ctx) {
        return Ok(Classified::localizer());
    }

    let mut classification = Classification::new();
    let label = ctx.acquisition_label;
    let description = ctx.series_description();

    let image_type = ctx.header.image_type()?;
    let scan = scan_type(label, image_type.as_ref())
        .or_else(|| scan_type(description, image_type.as_ref()));
    classification.set(SCAN_TYPE, scan);

    let (scan_coverage, mut info) = compute_scan_coverage_if_original(ctx.header, ctx.slices)?;

    info.reconstruction_window = reconstruction_window(label);
    info.scan_orientation = scan_orientation(label).or_else(|| scan_orientation(description));

    let anatomy = resolve_anatomy(label, description, scan_coverage)?;
    classification.set(ANATOMY, anatomy.iter().map(Anatomy::simple_name));

    let mut tags = contrast(label);
    if tags.is_empty() {
        tags = contrast(description);
    }
    classification.set(CONTRAST, tags);

    if let Some(coverage) = scan_coverage.filter(|c| *c != 0.0) {
        let spacing = coverage / ctx.slices.len() as f64;
        info.spacing_between_slices = Some((spacing * 100.0).round() / 100.0);
    }

    Ok(Classified::new(classification, info))
}
