use super::{ReconstructionWindow, ScanOrientation};
use serde::Serialize;

/// Derived scalar metadata produced next to the classification
///
/// Absent fields are omitted on serialization so callers can merge the map
/// into their own record without clobbering existing values with nulls.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Info {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_coverage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_slice_location: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_slice_location: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_orientation: Option<ScanOrientation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconstruction_window: Option<ReconstructionWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing_between_slices: Option<f64>,
}

impl Info {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == Info::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_serializes_to_empty_object() {
        let info = Info::new();
        assert!(info.is_empty());
        assert_eq!(serde_json::to_value(&info).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_field_names() {
        let info = Info {
            scan_coverage: Some(999.5),
            scan_orientation: Some(ScanOrientation::Axial),
            reconstruction_window: Some(ReconstructionWindow::Bone),
            ..Default::default()
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["ScanCoverage"], 999.5);
        assert_eq!(json["ScanOrientation"], "axial");
        assert_eq!(json["ReconstructionWindow"], "Bone");
        assert!(json.get("SpacingBetweenSlices").is_none());
    }
}
