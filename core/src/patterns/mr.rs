//! MR predicates and the feature / measurement / intent vocabularies

use super::{all, any, exact};
use log::warn;
use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

predicate! {
    /// Anatomy, T1
    pub fn is_anatomy_t1 => [
        any("t1"),
        any("t1w"),
        any("3d anat"),
        all(&["3d", "bravo"]),
        any("spgr"),
        any("tfl"),
        any("mprage"),
        all(&["mm", "iso"]),
        all(&["mp", "rage"]),
    ]
    /// Anatomy, T2
    pub fn is_anatomy_t2 => [any("t2")]
    pub fn is_anatomy_inplane => [any("inplane")]
    /// Anatomy, other
    pub fn is_anatomy => [all(&["IR", "EPI"]), any("flair")]

    pub fn is_diffusion => [
        any("dti"),
        any("dwi"),
        any("diff_"),
        any("diffusion"),
        all(&["diff", "dir"]),
        any("hardi"),
    ]
    pub fn is_diffusion_derived => [
        any("_ADC$"),
        any("_TRACEW$"),
        any("_ColFA$"),
        any("_FA$"),
        any("_EXP$"),
    ]

    pub fn is_functional => [
        any("functional"),
        any("fmri"),
        any("func"),
        any("bold"),
        any("resting"),
        all(&["rest", "state"]),
        // Site-specific task names
        all(&["ret", "bars"]),
        all(&["ret", "wedges"]),
        all(&["ret", "rings"]),
        all(&["ret", "check"]),
        any("go-no-go"),
        any("words"),
        any("checkers"),
        any("retinotopy"),
        any("faces"),
        any("rings"),
        any("wedges"),
        any("emoreg"),
        any("conscious"),
        exact("^REST$"),
        any("ep2d"),
        any("task"),
        any("rest"),
        any("fBIRN"),
        any("^Curiosity"),
        any("^DD_"),
        any("^Poke"),
        any("^Effort"),
        any("emotion|conflict"),
    ]
    pub fn is_functional_derived => [
        any("mocoseries"),
        any("GLM$"),
        any("t-map"),
        any("design"),
        any("StartFMRI"),
    ]

    pub fn is_shim => [all(&["HO", "shim"]), any(r"\bHOS\b"), any("_HOS_"), any(".*shim")]
    pub fn is_fieldmap => [
        all(&["field", "map"]),
        all(&["bias", "ch"]),
        any("field"),
        any("fmap"),
        any("topup"),
        any("DISTORTION"),
        any("se[-_][aprl]{2}$"),
    ]
    pub fn is_calibration => [all(&["asset", "cal"]), any("^asset$"), any("calibration")]
    pub fn is_coil_survey => [all(&["coil", "survey"])]

    /// Perfusion: arterial spin labeling and angiography
    pub fn is_perfusion => [
        any("asl"),
        all(&["blood", "flow"]),
        all(&["art", "spin"]),
        any("tof"),
        any("perfusion"),
        any("angio"),
    ]
    /// Proton density; the short forms are case-sensitive
    pub fn is_proton_density => [exact("^PD$"), all(&["proton", "density"]), exact("pd_"), exact("_pd")]
    pub fn is_phase_map => [all(&["phase", "map"]), any("^phase$")]
    pub fn is_screenshot => [all(&["screen", "save"]), any(".*screenshot"), any(".*screensave")]
    pub fn is_spectroscopy => [
        any("mip"),
        any("mrs"),
        any("svs"),
        any("gaba"),
        any("csi"),
        any("nfl"),
        any("mega"),
        any("press"),
        any("spect"),
    ]
    /// `POST` in the series description
    pub fn is_post => [any("POST")]
    /// Susceptibility weighted
    pub fn is_swi => [any("swi"), any("susceptibility")]
}

pub const FEATURES: &[&str] = &[
    "2D",
    "AAscout",
    "Spin-Echo",
    "Gradient-Echo",
    "EPI",
    "WASSR",
    "FAIR",
    "FAIREST",
    "PASL",
    "EPISTAR",
    "PICORE",
    "pCASL",
    "MPRAGE",
    "MP2RAGE",
    "FLAIR",
    "SWI",
    "QSM",
    "RMS",
    "DTI",
    "DSI",
    "DKI",
    "HARDI",
    "NODDI",
    "Water-Reference",
    "Transmit-Reference",
    "SBRef",
    "Uniform",
    "Singlerep",
    "QC",
    "TRACE",
    "FA",
    "MIP",
    "Navigator",
    "Contrast-Agent",
    "Phase-Contrast",
    "TOF",
    "VASO",
    "iVASO",
    "DSC",
    "DCE",
    "Task",
    "Resting-State",
    "PRESS",
    "STEAM",
    "M0",
    "Phase-Reversed",
    "Spiral",
    "SPGR",
    "Quantitative",
    "Multi-Shell",
    "Multi-Echo",
    "Multi-Flip",
    "Multi-Band",
    "Steady-State",
    "3D",
    "Compressed-Sensing",
    "Eddy-Current-Corrected",
    "Fieldmap-Corrected",
    "Gradient-Unwarped",
    "Motion-Corrected",
    "Physio-Corrected",
    "Derived",
    "In-Plane",
    "Phase",
    "Magnitude",
];

pub const MEASUREMENTS: &[&str] = &[
    "MRA",
    "CEST",
    "T1rho",
    "SVS",
    "CSI",
    "EPSI",
    "BOLD",
    "Phoenix",
    "B0",
    "B1",
    "T1",
    "T2",
    "T2*",
    "PD",
    "MT",
    "Perfusion",
    "Diffusion",
    "Susceptibility",
    "Fingerprinting",
];

pub const INTENTS: &[&str] = &[
    "Localizer",
    "Shim",
    "Calibration",
    "Fieldmap",
    "Structural",
    "Functional",
    "Screenshot",
    "Non-Image",
    "Spectroscopy",
];

/// Regex source for one vocabulary term
///
/// A term matches as a whole word or delimited by underscores. The term is
/// inserted as a regex fragment. `T2` never matches the `T2` of `T2*`, and
/// `T2*` also matches `t2star`.
pub fn term_pattern(term: &str) -> String {
    match term {
        "T2*" => r"T2\*|t2star".to_string(),
        "T2" => r"\bT2(?:[^\w*]|$)|_T2_|_T2(?:[^*]|$)|T2_".to_string(),
        t => format!(r"(\b{t}\b)|(_{t}_)|(_{t})|({t}_)"),
    }
}

fn compile_term(term: &str) -> Option<Regex> {
    match RegexBuilder::new(&term_pattern(term))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Skipping vocabulary term '{}': {}", term, e);
            None
        }
    }
}

/// Compiled vocabulary matched in list order
#[derive(Debug)]
pub struct Vocabulary {
    terms: Vec<(&'static str, Regex)>,
}

impl Vocabulary {
    pub fn new(terms: &[&'static str]) -> Self {
        Self {
            terms: terms
                .iter()
                .filter_map(|&term| compile_term(term).map(|re| (term, re)))
                .collect(),
        }
    }

    /// Terms found in `label`, in vocabulary order
    pub fn find(&self, label: &str) -> Vec<&'static str> {
        self.terms
            .iter()
            .filter(|(_, re)| re.is_match(label))
            .map(|(term, _)| *term)
            .collect()
    }
}

pub fn feature_check(label: &str) -> Vec<&'static str> {
    static VOCABULARY: OnceLock<Vocabulary> = OnceLock::new();
    VOCABULARY.get_or_init(|| Vocabulary::new(FEATURES)).find(label)
}

pub fn measurement_check(label: &str) -> Vec<&'static str> {
    static VOCABULARY: OnceLock<Vocabulary> = OnceLock::new();
    VOCABULARY
        .get_or_init(|| Vocabulary::new(MEASUREMENTS))
        .find(label)
}

pub fn intent_check(label: &str) -> Vec<&'static str> {
    static VOCABULARY: OnceLock<Vocabulary> = OnceLock::new();
    VOCABULARY.get_or_init(|| Vocabulary::new(INTENTS)).find(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_intent_check() {
        assert!(intent_check("NotAnIntent").is_empty());
        assert_eq!(intent_check("Localizer"), ["Localizer"]);
        assert_eq!(intent_check("Localizer Shim"), ["Localizer", "Shim"]);
    }

    #[rstest]
    #[case("MRA", &["MRA"])]
    #[case("MRA CEST", &["MRA", "CEST"])]
    #[case("T2*", &["T2*"])]
    #[case("t2star", &["T2*"])]
    #[case("T2", &["T2"])]
    #[case("T2/T2*", &["T2", "T2*"])]
    #[case("ep2d_T2*_bold", &["BOLD", "T2*"])]
    #[case("NotAMeasure", &[])]
    fn test_measurement_check(#[case] label: &str, #[case] expected: &[&str]) {
        assert_eq!(measurement_check(label), expected);
    }

    #[test]
    fn test_feature_check() {
        assert!(feature_check("NotAFeature").is_empty());
        assert_eq!(feature_check("2D"), ["2D"]);
        assert_eq!(feature_check("2D-AAscout"), ["2D", "AAscout"]);
        assert_eq!(feature_check("T2W_FLAIR"), ["FLAIR"]);
    }

    #[rstest]
    #[case("T1 MPRAGE")]
    #[case("3D Anat")]
    #[case("3D BRAVO")]
    #[case("1mm iso")]
    #[case("MP-RAGE")]
    fn test_t1(#[case] label: &str) {
        assert!(is_anatomy_t1(label));
    }

    #[test]
    fn test_functional() {
        assert!(is_functional("REST"));
        assert!(is_functional("Resting State"));
        assert!(is_functional("ret_bars"));
        assert!(is_functional("Curiosity_run1"));
        assert!(!is_functional("T1 MPRAGE"));
    }

    #[test]
    fn test_proton_density_case_sensitive() {
        assert!(is_proton_density("PD"));
        assert!(!is_proton_density("pd"));
        assert!(is_proton_density("t2_pd"));
        assert!(is_proton_density("Proton Density"));
        assert!(!is_proton_density("AX_PD"));
    }

    #[test]
    fn test_fieldmap() {
        assert!(is_fieldmap("gre_field_mapping"));
        assert!(is_fieldmap("SE-AP"));
        assert!(is_fieldmap("fmap_topup"));
        assert!(!is_fieldmap("T1"));
    }

    #[test]
    fn test_diffusion_derived() {
        assert!(is_diffusion_derived("DTI_ADC"));
        assert!(is_diffusion_derived("dwi_fa"));
        assert!(!is_diffusion_derived("ADC_DTI"));
    }

    #[test]
    fn test_misc() {
        assert!(is_shim("HO Shim"));
        assert!(is_calibration("ASSET cal"));
        assert!(is_coil_survey("Coil Survey"));
        assert!(is_perfusion("pcasl"));
        assert!(is_phase_map("Phase Map"));
        assert!(is_screenshot("ScreenSave"));
        assert!(is_spectroscopy("SVS_PRESS"));
        assert!(is_post("Ax T1 post gad"));
        assert!(is_swi("SWI_Images"));
    }
}
