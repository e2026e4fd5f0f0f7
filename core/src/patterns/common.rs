//! Predicates shared by every modality: localizer, scan type, orientation,
//! reconstruction window and contrast

use super::{all, any};

predicate! {
    /// Localizer or scout series
    ///
    /// `^loc*` is kept as historically written: it matches any label
    /// starting with "lo".
    pub fn is_localizer => [
        any("localizer"),
        any("localiser"),
        any("survey"),
        any(r"loc\."),
        any(r"\bscout\b"),
        all(&["plane", "loc"]),
        all(&["plane", "survey"]),
        any("3-plane"),
        any("^loc*"),
        any("Scout"),
        any("AdjGre"),
        any("topogram"),
    ]

    // Scan type
    pub fn is_standard_scan => [any(r"\bNAC"), any(r"NAC\b"), any("_NAC"), any("NAC_")]
    pub fn is_attn_corr_scan => [any(r"\bAC"), any(r"AC\b"), any("_AC"), any("^AC_")]

    // Scan orientation
    pub fn is_axial => [any("axial"), any("trans")]
    pub fn is_coronal => [any("cor")]
    pub fn is_sagittal => [any("sag")]

    // Reconstruction window
    pub fn is_bone_window => [any("bone.?window")]
    pub fn is_lung_window => [any("lung.?window")]

    /// No contrast
    pub fn is_unenhanced => [
        any("un.?enhanced"),
        any(r"w\^.?o"),
        any(r"w/.?o"),
        any("(^|[^a-zA-Z])wo([^a-zA-Z]|$)"),
        any("(^|[^a-zA-Z])no([^a-zA-Z]|$)"),
        any("no.?IV"),
        any("sans.?IV"),
        any("non.?contrast"),
    ]

    /// Contrast
    pub fn is_enhanced => [
        any("enhanced"),
        any(r"w\^.?IV"),
        any("w/.?IV"),
        any("contrast"),
        any("contraste"),
        any("with.?contrast"),
        any("w/"),
        any("w.?contrast"),
        any("IV.?contrast"),
    ]

    // Contrast phases
    pub fn is_arterial => [any("arterial")]
    pub fn is_portal_venous => [any("portal"), any("venous")]
    pub fn is_delayed_equil => [any("delayed"), any("equil")]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("LOCALIZER")]
    #[case("Localiser")]
    #[case("Coil Survey")]
    #[case("loc.3pl")]
    #[case("SCOUT")]
    #[case("3 Plane Loc")]
    #[case("Tri-Plane Survey")]
    #[case("3-Plane")]
    #[case("lo_res")]
    #[case("AdjGre")]
    #[case("Topogram 0.6 T20f")]
    fn test_localizer_matches(#[case] label: &str) {
        assert!(is_localizer(label));
        assert!(is_localizer(&label.to_uppercase()));
        assert!(is_localizer(&label.to_lowercase()));
    }

    #[rstest]
    #[case("CHEST ABD PELVIS")]
    #[case("Allocation")]
    #[case("")]
    fn test_localizer_rejects(#[case] label: &str) {
        assert!(!is_localizer(label));
    }

    #[test]
    fn test_localizer_non_string() {
        assert!(!is_localizer(&json!(2)));
        assert!(!is_localizer(&json!(null)));
        assert!(is_localizer(&json!(["T1", "localizer"])));
    }

    #[rstest]
    #[case("PET NAC", true, true)]
    #[case("WB_NAC_3D", true, false)]
    #[case("WB_AC", false, true)]
    #[case("CTAC", false, true)]
    #[case("Body", false, false)]
    fn test_scan_type(#[case] label: &str, #[case] standard: bool, #[case] ac: bool) {
        assert_eq!(is_standard_scan(label), standard);
        assert_eq!(is_attn_corr_scan(label), ac);
    }

    #[test]
    fn test_orientation() {
        assert!(is_axial("AX TRANSVERSE"));
        assert!(is_coronal("COR MPR"));
        assert!(is_sagittal("Sag T1"));
        assert!(!is_sagittal("Axial"));
    }

    #[test]
    fn test_windows() {
        assert!(is_bone_window("Bone Window 1.0"));
        assert!(is_lung_window("LUNG_WINDOW"));
        assert!(!is_lung_window("Lung"));
    }

    #[rstest]
    #[case("UNENHANCED")]
    #[case("Head W/O")]
    #[case("Chest w^o IV")]
    #[case("ABD WO")]
    #[case("No IV")]
    #[case("sans IV")]
    #[case("Non-Contrast")]
    fn test_unenhanced(#[case] label: &str) {
        assert!(is_unenhanced(label));
    }

    #[rstest]
    #[case("Enhanced")]
    #[case("Neck w^IV")]
    #[case("CHEST W/ IV")]
    #[case("W CONTRAST")]
    #[case("IV Contrast")]
    fn test_enhanced(#[case] label: &str) {
        assert!(is_enhanced(label));
    }

    #[test]
    fn test_phases() {
        assert!(is_arterial("ARTERIAL PHASE"));
        assert!(is_portal_venous("Portal"));
        assert!(is_portal_venous("venous"));
        assert!(is_delayed_equil("DELAYED"));
        assert!(is_delayed_equil("equilibrium"));
    }
}
