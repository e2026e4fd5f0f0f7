use crate::api::SeriesClassification;
use std::fmt;

/// Text report formatter for a series classification
pub struct TextReport<'a> {
    result: &'a SeriesClassification,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(result: &'a SeriesClassification) -> Self {
        Self { result }
    }
}

fn optional<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;

        writeln!(f, "Series Classification")?;
        writeln!(f, "=====================")?;
        writeln!(f)?;
        writeln!(f, "Modality:       {}", result.modality)?;
        if result.classification.is_empty() {
            writeln!(f, "(no classification)")?;
        }
        for (key, tags) in result.classification.iter() {
            writeln!(f, "{:<15} {}", format!("{}:", key), tags.join(", "))?;
        }

        if result.modality.is_cross_sectional() && !result.is_localizer() {
            let info = &result.info;
            writeln!(f)?;
            writeln!(f, "Derived Info")?;
            writeln!(f, "------------")?;
            writeln!(f, "Scan Coverage:  {}", optional(info.scan_coverage))?;
            writeln!(
                f,
                "Slice Spacing:  {}",
                optional(info.spacing_between_slices)
            )?;
            writeln!(f, "Orientation:    {}", optional(info.scan_orientation))?;
            writeln!(
                f,
                "Window:         {}",
                optional(info.reconstruction_window)
            )?;
        }

        if let Some(details) = &result.ophtha {
            writeln!(f)?;
            writeln!(f, "Ophthalmic Details")?;
            writeln!(f, "------------------")?;
            writeln!(f, "Modality:       {}", optional(details.modality.as_deref()))?;
            writeln!(f, "Type:           {}", optional(details.image_type.as_deref()))?;
            writeln!(f, "Sub-Type:       {}", optional(details.sub_type.as_deref()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::OphthaDetails;
    use crate::types::{Classification, Info, Modality, ScanOrientation};

    #[test]
    fn test_text_report_format() {
        let mut classification = Classification::new();
        classification.set("Anatomy", ["Chest", "Abdomen"]);
        classification.set("Contrast", ["No Contrast"]);
        let result = SeriesClassification {
            modality: Modality::Ct,
            classification,
            info: Info {
                scan_coverage: Some(420.5),
                scan_orientation: Some(ScanOrientation::Axial),
                ..Info::default()
            },
            ophtha: None,
        };

        let output = format!("{}", TextReport::new(&result));
        assert!(output.contains("Series Classification"));
        assert!(output.contains("Modality:       CT"));
        assert!(output.contains("Anatomy:        Chest, Abdomen"));
        assert!(output.contains("Contrast:       No Contrast"));
        assert!(output.contains("Scan Coverage:  420.5"));
        assert!(output.contains("Slice Spacing:  unknown"));
        assert!(!output.contains("Ophthalmic Details"));
    }

    #[test]
    fn test_ophtha_report() {
        let result = SeriesClassification {
            modality: Modality::Ophtha,
            classification: Classification::new(),
            info: Info::default(),
            ophtha: Some(OphthaDetails {
                modality: Some("OCT".to_string()),
                image_type: None,
                sub_type: Some("Standard".to_string()),
            }),
        };

        let output = format!("{}", TextReport::new(&result));
        assert!(output.contains("(no classification)"));
        assert!(!output.contains("Derived Info"));
        assert!(output.contains("Type:           unknown"));
        assert!(output.contains("Sub-Type:       Standard"));
    }
}
