//! Typed access to a series header
//!
//! A [`Header`] is one representative DICOM header for a series, held as a
//! JSON-like mapping of keyword to value. Lookups never fail on missing keys
//! or indices; they return `None`.

mod dicom;
pub mod tags;

use crate::error::{Result, ScancatError};
use crate::types::ImageType;
use serde_json::{Map, Value};

/// Strips non-ASCII and non-printable characters
///
/// Printable means ASCII graphic characters, space, and the whitespace
/// controls `\t \n \r \x0b \x0c`. A lone `?` (how scanners often render
/// unrepresentable text) becomes `None`.
pub fn format_string(input: &str) -> Option<String> {
    let formatted: String = input
        .chars()
        .filter(|c| {
            c.is_ascii_graphic() || matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
        })
        .collect();
    if formatted == "?" {
        None
    } else {
        Some(formatted)
    }
}

/// One representative header of a series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    fields: Map<String, Value>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Builds a header from a JSON object
    ///
    /// # Errors
    ///
    /// Returns [`ScancatError::InvalidValue`] if `value` is not an object.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ScancatError::InvalidValue(format!(
                "header must be a JSON object (found {})",
                other
            ))),
        }
    }

    /// Whether `key` is present with a non-null value
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Top-level value, `None` when absent or null
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    /// Nested lookup along a dotted path such as
    /// `RadiopharmaceuticalInformationSequence.0.RadionuclideCodeSequence.0.CodeValue`
    ///
    /// Numeric segments index into lists. Flattened single-item sequences are
    /// tolerated: a keyword applied to a list descends into its first item,
    /// and index `0` applied to an object is the object itself.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.get(first)?;
        for segment in segments {
            current = step(current, segment)?;
        }
        if current.is_null() {
            None
        } else {
            Some(current)
        }
    }

    /// String value at `path`
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get_path(path).and_then(Value::as_str)
    }

    /// Numeric value at `path`
    ///
    /// Only JSON numbers count; numeric-looking strings are not parsed.
    pub fn get_f64(&self, path: &str) -> Option<f64> {
        self.get_path(path).and_then(Value::as_f64)
    }

    /// `SeriesDescription` cleaned with [`format_string`], `None` when empty
    pub fn series_description(&self) -> Option<String> {
        self.get_str(tags::SERIES_DESCRIPTION)
            .and_then(format_string)
            .filter(|s| !s.is_empty())
    }

    /// Parses `ImageType`
    ///
    /// Returns `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`ScancatError::InvalidImageType`] if the value is present but
    /// is not a list.
    pub fn image_type(&self) -> Result<Option<ImageType>> {
        match self.get(tags::IMAGE_TYPE) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(ImageType::new(
                items
                    .iter()
                    .map(|v| match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            ))),
            Some(other) => Err(ScancatError::InvalidImageType(other.to_string())),
        }
    }
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match (value, segment.parse::<usize>()) {
        (Value::Array(items), Ok(idx)) => items.get(idx),
        (Value::Array(items), Err(_)) => items.first().and_then(|item| step(item, segment)),
        (Value::Object(_), Ok(0)) => Some(value),
        (Value::Object(map), Err(_)) => map.get(segment),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn pet_header() -> Header {
        Header::from_json(json!({
            "RadiopharmaceuticalInformationSequence": [{
                "RadionuclideCodeSequence": [{"CodeValue": "C-111A1", "CodeMeaning": "^18^Fluorine"}],
                "RadiopharmaceuticalCodeSequence": {"CodeValue": "C-B1031"}
            }]
        }))
        .unwrap()
    }

    #[rstest]
    #[case("abc", Some("abc"))]
    #[case("caf\u{e9}", Some("caf"))]
    #[case("a\u{0}b", Some("ab"))]
    #[case("tab\there", Some("tab\there"))]
    #[case("?", None)]
    #[case("??", Some("??"))]
    #[case("", Some(""))]
    fn test_format_string(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(format_string(input).as_deref(), expected);
    }

    #[test]
    fn test_nested_path() {
        let header = pet_header();
        assert_eq!(
            header.get_str(tags::RADIONUCLIDE_CODE_VALUE),
            Some("C-111A1")
        );
        // Flattened sequence stored as an object
        assert_eq!(
            header.get_str(tags::RADIOPHARMACEUTICAL_CODE_VALUE),
            Some("C-B1031")
        );
        assert_eq!(header.get_str(tags::RADIOPHARMACEUTICAL), None);
    }

    #[test]
    fn test_path_missing_index() {
        let header = pet_header();
        assert_eq!(
            header.get_path("RadiopharmaceuticalInformationSequence.3.RadionuclideCodeSequence"),
            None
        );
        assert_eq!(header.get_path("Missing.0.CodeValue"), None);
    }

    #[test]
    fn test_get_f64_numbers_only() {
        let header = Header::from_json(json!({"EchoTime": 12, "RepetitionTime": "500"})).unwrap();
        assert_eq!(header.get_f64(tags::ECHO_TIME), Some(12.0));
        assert_eq!(header.get_f64(tags::REPETITION_TIME), None);
    }

    #[test]
    fn test_null_is_absent() {
        let header = Header::from_json(json!({"SeriesDescription": null})).unwrap();
        assert!(!header.has(tags::SERIES_DESCRIPTION));
        assert_eq!(header.series_description(), None);
    }

    #[test]
    fn test_series_description_cleaned() {
        let header = Header::from_json(json!({"SeriesDescription": "T2W_FLAIR\u{b5}"})).unwrap();
        assert_eq!(header.series_description().as_deref(), Some("T2W_FLAIR"));
        let header = Header::from_json(json!({"SeriesDescription": "?"})).unwrap();
        assert_eq!(header.series_description(), None);
    }

    #[test]
    fn test_image_type() {
        let header = Header::from_json(json!({"ImageType": ["ORIGINAL", "PRIMARY"]})).unwrap();
        assert!(header.image_type().unwrap().unwrap().is_original());

        let header = Header::new();
        assert!(header.image_type().unwrap().is_none());

        let header = Header::from_json(json!({"ImageType": "ORIGINAL"})).unwrap();
        assert!(matches!(
            header.image_type(),
            Err(ScancatError::InvalidImageType(_))
        ));
    }

    #[test]
    fn test_from_json_requires_object() {
        assert!(Header::from_json(json!([1])).is_err());
    }
}
