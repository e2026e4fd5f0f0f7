use crate::error::ScancatError;
use std::fmt;
use std::str::FromStr;

/// Imaging modality handled by a classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Modality {
    #[serde(rename = "CT")]
    Ct,
    #[serde(rename = "MR")]
    Mr,
    #[serde(rename = "PT")]
    Pt,
    #[serde(rename = "OPHTHA")]
    Ophtha,
}

impl Modality {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Modality::Ct => "CT",
            Modality::Mr => "MR",
            Modality::Pt => "PT",
            Modality::Ophtha => "OPHTHA",
        }
    }

    /// Whether the localizer gate and scan coverage apply to this modality
    pub fn is_cross_sectional(&self) -> bool {
        matches!(self, Modality::Ct | Modality::Pt)
    }
}

impl FromStr for Modality {
    type Err = ScancatError;

    /// Parses the header `Modality` value or a user-supplied name
    ///
    /// Ophthalmic photography (`OP`, `OPT`) and OCT share one classifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CT" => Ok(Modality::Ct),
            "MR" | "MRI" => Ok(Modality::Mr),
            "PT" | "PET" => Ok(Modality::Pt),
            "OPHTHA" | "OPHTHALMOLOGY" | "OP" | "OPT" | "OCT" => Ok(Modality::Ophtha),
            other => Err(ScancatError::UnsupportedModality(other.to_string())),
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Body region tag
///
/// Declaration order is the canonical cranial-to-caudal sequence used to
/// expand ranged anatomy labels, so the derived ordering follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Anatomy {
    Head,
    Neck,
    Chest,
    Abdomen,
    Pelvis,
    LowerExtremities,
    UpperExtremities,
    WholeBody,
}

/// Canonical body sequence for ranged anatomy ("Head to Pelvis")
pub const SEQUENCE_ANATOMY: [Anatomy; 8] = [
    Anatomy::Head,
    Anatomy::Neck,
    Anatomy::Chest,
    Anatomy::Abdomen,
    Anatomy::Pelvis,
    Anatomy::LowerExtremities,
    Anatomy::UpperExtremities,
    Anatomy::WholeBody,
];

impl Anatomy {
    /// Returns the controlled-vocabulary tag
    pub fn simple_name(&self) -> &'static str {
        match self {
            Anatomy::Head => "Head",
            Anatomy::Neck => "Neck",
            Anatomy::Chest => "Chest",
            Anatomy::Abdomen => "Abdomen",
            Anatomy::Pelvis => "Pelvis",
            Anatomy::LowerExtremities => "Lower Extremities",
            Anatomy::UpperExtremities => "Upper Extremities",
            Anatomy::WholeBody => "Whole Body",
        }
    }

    /// Position in [`SEQUENCE_ANATOMY`]
    pub fn sequence_index(&self) -> usize {
        SEQUENCE_ANATOMY
            .iter()
            .position(|a| a == self)
            .unwrap_or(SEQUENCE_ANATOMY.len())
    }

    /// Looks up an anatomy by its vocabulary tag (exact, case-sensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        SEQUENCE_ANATOMY
            .iter()
            .copied()
            .find(|a| a.simple_name() == name)
    }
}

impl fmt::Display for Anatomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Scan plane inferred from labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanOrientation {
    Axial,
    Coronal,
    Sagittal,
}

impl ScanOrientation {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            ScanOrientation::Axial => "axial",
            ScanOrientation::Coronal => "coronal",
            ScanOrientation::Sagittal => "sagittal",
        }
    }
}

impl fmt::Display for ScanOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// CT reconstruction window named in the label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ReconstructionWindow {
    Bone,
    Lung,
}

impl ReconstructionWindow {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            ReconstructionWindow::Bone => "Bone",
            ReconstructionWindow::Lung => "Lung",
        }
    }
}

impl fmt::Display for ReconstructionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}
