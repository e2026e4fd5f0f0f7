use std::fmt;

/// Pixel data characteristic from the first `ImageType` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelKind {
    Original,
    Derived,
    /// Any other value, kept verbatim for diagnostics
    Other(String),
}

impl PixelKind {
    fn parse(s: &str) -> Self {
        match s {
            "ORIGINAL" => PixelKind::Original,
            "DERIVED" => PixelKind::Derived,
            other => PixelKind::Other(other.to_string()),
        }
    }
}

/// DICOM `ImageType` field as a list of values
///
/// Only the first value (`ORIGINAL`/`DERIVED`) drives classification; the
/// remaining values are kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageType {
    values: Vec<String>,
}

impl ImageType {
    /// Creates a new ImageType
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    /// First value, if any
    pub fn first(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Classifies the first value
    ///
    /// Returns `None` for an empty list.
    pub fn pixels(&self) -> Option<PixelKind> {
        self.first().map(PixelKind::parse)
    }

    /// Whether the first value is exactly `ORIGINAL`
    pub fn is_original(&self) -> bool {
        matches!(self.pixels(), Some(PixelKind::Original))
    }

    /// Whether the first value is exactly `DERIVED`
    pub fn is_derived(&self) -> bool {
        matches!(self.pixels(), Some(PixelKind::Derived))
    }

    /// Checks if the image type contains a specific value
    pub fn contains(&self, val: &str) -> bool {
        self.values.iter().any(|v| v == val)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a simple string representation
    ///
    /// Format: "ORIGINAL|PRIMARY|AXIAL"
    pub fn simple_repr(&self) -> String {
        self.values.join("|")
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_repr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_type(values: &[&str]) -> ImageType {
        ImageType::new(values.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_pixels() {
        assert_eq!(
            image_type(&["ORIGINAL", "PRIMARY"]).pixels(),
            Some(PixelKind::Original)
        );
        assert_eq!(image_type(&["DERIVED"]).pixels(), Some(PixelKind::Derived));
        assert_eq!(
            image_type(&["Not_Orig_Der"]).pixels(),
            Some(PixelKind::Other("Not_Orig_Der".to_string()))
        );
        assert_eq!(image_type(&[]).pixels(), None);
    }

    #[test]
    fn test_exact_match_only() {
        // Lowercase is not treated as ORIGINAL
        assert!(!image_type(&["original"]).is_original());
        assert!(image_type(&["ORIGINAL"]).is_original());
        assert!(image_type(&["DERIVED", "SECONDARY"]).is_derived());
    }

    #[test]
    fn test_simple_repr() {
        let it = image_type(&["ORIGINAL", "PRIMARY", "AXIAL"]);
        assert_eq!(it.simple_repr(), "ORIGINAL|PRIMARY|AXIAL");
        assert_eq!(it.to_string(), "ORIGINAL|PRIMARY|AXIAL");
        assert!(it.contains("AXIAL"));
        assert!(!it.contains("LOCALIZER"));
    }
}
