//! Label rules shared by the cross-sectional classifiers

use super::SeriesContext;
use crate::patterns::common::*;
use crate::types::{ImageType, PixelKind, ReconstructionWindow, ScanOrientation};
use log::info;

/// Series with fewer slices than this are localizers
pub const LOCALIZER_MAX_SLICES: usize = 10;

pub const ARTERIAL_PHASE: &str = "Arterial Phase";
pub const PORTAL_VENOUS_PHASE: &str = "Portal Venous Phase";
pub const DELAYED_EQUILIBRIUM_PHASE: &str = "Delayed/Equilibrium Phase";
pub const NO_CONTRAST: &str = "No Contrast";
pub const WITH_CONTRAST: &str = "Contrast";

/// Localizer gate: a localizer label or description, or too few slices
pub fn is_localizer_series(ctx: &SeriesContext) -> bool {
    if is_localizer(&ctx.acquisition_label) || is_localizer(&ctx.series_description) {
        info!("Label or series description is a localizer");
        return true;
    }
    if ctx.slices.len() < LOCALIZER_MAX_SLICES {
        info!(
            "Only {} slice(s) in series; treating as a localizer",
            ctx.slices.len()
        );
        return true;
    }
    false
}

/// Scan type from `ImageType[0]`, falling back to NAC/AC label tokens
///
/// # Algorithm
///
/// 1. `ORIGINAL` → `Original`, `DERIVED` → `Derived`
/// 2. NAC token in `label` → `Standard`
/// 3. AC token in `label` → `AC`
pub fn scan_type(label: Option<&str>, image_type: Option<&ImageType>) -> Option<&'static str> {
    match image_type.and_then(ImageType::pixels) {
        Some(PixelKind::Original) => Some("Original"),
        Some(PixelKind::Derived) => Some("Derived"),
        _ if is_standard_scan(&label) => Some("Standard"),
        _ if is_attn_corr_scan(&label) => Some("AC"),
        _ => None,
    }
}

/// First matching orientation, axial before coronal before sagittal
pub fn scan_orientation(label: Option<&str>) -> Option<ScanOrientation> {
    if is_axial(&label) {
        Some(ScanOrientation::Axial)
    } else if is_coronal(&label) {
        Some(ScanOrientation::Coronal)
    } else if is_sagittal(&label) {
        Some(ScanOrientation::Sagittal)
    } else {
        None
    }
}

/// Bone window takes priority over lung window
pub fn reconstruction_window(label: Option<&str>) -> Option<ReconstructionWindow> {
    if is_bone_window(&label) {
        Some(ReconstructionWindow::Bone)
    } else if is_lung_window(&label) {
        Some(ReconstructionWindow::Lung)
    } else {
        None
    }
}

/// Contrast tags: any phase tags, then `No Contrast` or `Contrast`
///
/// Unenhanced wins over enhanced when both match.
pub fn contrast(label: Option<&str>) -> Vec<&'static str> {
    let mut tags = Vec::new();
    if is_arterial(&label) {
        tags.push(ARTERIAL_PHASE);
    }
    if is_portal_venous(&label) {
        tags.push(PORTAL_VENOUS_PHASE);
    }
    if is_delayed_equil(&label) {
        tags.push(DELAYED_EQUILIBRIUM_PHASE);
    }
    if is_unenhanced(&label) {
        tags.push(NO_CONTRAST);
    } else if is_enhanced(&label) {
        tags.push(WITH_CONTRAST);
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Header;
    use crate::types::SliceTable;
    use rstest::rstest;
    use serde_json::json;

    fn image_type(values: &[&str]) -> ImageType {
        ImageType::new(values.iter().map(|s| s.to_string()).collect())
    }

    #[rstest]
    #[case(Some(&["ORIGINAL", "PRIMARY"][..]), Some("WB_NAC"), Some("Original"))]
    #[case(Some(&["DERIVED"][..]), None, Some("Derived"))]
    #[case(Some(&["OTHER"][..]), Some("WB_NAC"), Some("Standard"))]
    #[case(None, Some("WB_AC"), Some("AC"))]
    #[case(None, Some("Body"), None)]
    #[case(None, None, None)]
    fn test_scan_type(
        #[case] values: Option<&[&str]>,
        #[case] label: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let image_type = values.map(image_type);
        assert_eq!(scan_type(label, image_type.as_ref()), expected);
    }

    #[rstest]
    #[case(Some("Axial COR SAG"), Some(ScanOrientation::Axial))]
    #[case(Some("Trans 5mm"), Some(ScanOrientation::Axial))]
    #[case(Some("COR MPR"), Some(ScanOrientation::Coronal))]
    #[case(Some("Sag Bone"), Some(ScanOrientation::Sagittal))]
    #[case(Some("Body"), None)]
    #[case(None, None)]
    fn test_scan_orientation(
        #[case] label: Option<&str>,
        #[case] expected: Option<ScanOrientation>,
    ) {
        assert_eq!(scan_orientation(label), expected);
    }

    #[test]
    fn test_reconstruction_window() {
        assert_eq!(
            reconstruction_window(Some("Bone Window Lung Window")),
            Some(ReconstructionWindow::Bone)
        );
        assert_eq!(
            reconstruction_window(Some("LUNG_WINDOW")),
            Some(ReconstructionWindow::Lung)
        );
        assert_eq!(reconstruction_window(Some("Soft Tissue")), None);
    }

    #[test]
    fn test_contrast() {
        assert_eq!(
            contrast(Some("CHEST ABD PELVIS W CONTRAST ARTERIAL")),
            [ARTERIAL_PHASE, WITH_CONTRAST]
        );
        assert_eq!(contrast(Some("Head w/o")), [NO_CONTRAST]);
        assert!(contrast(Some("Head")).is_empty());
        assert!(contrast(None).is_empty());
    }

    #[test]
    fn test_localizer_gate() {
        let header = Header::from_json(json!({"SeriesDescription": "Topogram 0.6"})).unwrap();
        let slices = SliceTable::from_positions((0..20).map(|z| [0.0, 0.0, z as f64]));
        assert!(is_localizer_series(&SeriesContext::new(&header, &slices, Some("Chest"))));

        let header = Header::new();
        assert!(!is_localizer_series(&SeriesContext::new(&header, &slices, Some("Chest"))));

        let few = SliceTable::from_positions((0..9).map(|z| [0.0, 0.0, z as f64]));
        assert!(is_localizer_series(&SeriesContext::new(&header, &few, Some("Chest"))));
    }
}
