//! Series inputs: a JSON series document or a directory of DICOM files

use crate::error::{Result, ScancatError};
use crate::header::tags::MODALITY;
use crate::header::Header;
use crate::types::{Modality, SliceTable};
use dicom_object::{open_file, DefaultDicomObject};
use log::{debug, info, warn};
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// One series with everything a classifier needs
///
/// The JSON layout is
///
/// ```json
/// {"header": {...}, "slices": [{"ImagePositionPatient": [0, 0, 1]}, ...],
///  "acquisition_label": "...", "modality": "CT"}
/// ```
///
/// where only `header` is required.
#[derive(Debug, Clone, Default)]
pub struct SeriesDocument {
    pub header: Header,
    pub slices: SliceTable,
    pub acquisition_label: Option<String>,
    pub modality: Option<String>,
}

impl SeriesDocument {
    /// Parses a series document
    ///
    /// # Errors
    ///
    /// Returns [`ScancatError::InvalidValue`] if the document is not an
    /// object, `header` is missing or not an object, or `slices` is not a
    /// list of objects.
    pub fn from_json(value: Value) -> Result<Self> {
        let Value::Object(mut doc) = value else {
            return Err(ScancatError::InvalidValue(
                "series document must be a JSON object".to_string(),
            ));
        };
        let header = match doc.remove("header") {
            Some(header) => Header::from_json(header)?,
            None => {
                return Err(ScancatError::InvalidValue(
                    "series document has no 'header'".to_string(),
                ))
            }
        };
        let slices = match doc.remove("slices") {
            Some(slices) => SliceTable::from_json(slices)?,
            None => SliceTable::new(),
        };
        let text = |value: Option<Value>| match value {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        };
        Ok(Self {
            header,
            slices,
            acquisition_label: text(doc.remove("acquisition_label")),
            modality: text(doc.remove("modality")),
        })
    }

    /// Reads a series document from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(serde_json::from_str(&contents)?)
    }

    /// Builds a series from DICOM files
    ///
    /// The header comes from the last file that opened; every opened file
    /// contributes one slice row. Unreadable files are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ScancatError::DicomError`] if no file could be read.
    pub fn from_dicom_files(paths: &[PathBuf]) -> Result<Self> {
        let mut objects: Vec<DefaultDicomObject> = Vec::with_capacity(paths.len());
        for path in paths {
            match open_file(path) {
                Ok(dcm) => {
                    debug!("Read {}", path.display());
                    objects.push(dcm);
                }
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        let Some(last) = objects.last() else {
            return Err(ScancatError::DicomError(
                "no readable DICOM files in series".to_string(),
            ));
        };
        let header = Header::from_dicom(last);
        let slices = SliceTable::from_dicom_objects(objects.iter().map(|dcm| &**dcm));
        info!("Loaded series of {} image(s)", slices.len());

        Ok(Self {
            header,
            slices,
            acquisition_label: None,
            modality: None,
        })
    }

    /// Loads a JSON document file or a DICOM series directory
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            let files = collect_dicom_files(path)?;
            info!("Found {} DICOM file(s) in {}", files.len(), path.display());
            Self::from_dicom_files(&files)
        } else {
            Self::from_json_file(path)
        }
    }

    /// Document `modality`, else the header `Modality`
    ///
    /// # Errors
    ///
    /// Returns [`ScancatError::UnsupportedModality`] if neither names a
    /// supported modality.
    pub fn modality(&self) -> Result<Modality> {
        let name = self
            .modality
            .as_deref()
            .or_else(|| self.header.get_str(MODALITY))
            .ok_or_else(|| ScancatError::UnsupportedModality("<none>".to_string()))?;
        Modality::from_str(name)
    }
}

/// Files in `directory` with a `.dcm`/`.dicom` extension or, lacking an
/// extension, a DICOM preamble; sorted by path
pub fn collect_dicom_files(directory: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(directory)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("dcm") || ext.eq_ignore_ascii_case("dicom") => {
                files.push(path)
            }
            Some(_) => {}
            None if is_dicom_file(&path) => files.push(path),
            None => {}
        }
    }

    files.sort();
    Ok(files)
}

/// Checks for the `DICM` magic after the 128-byte preamble
fn is_dicom_file(path: &Path) -> bool {
    let Ok(mut file) = File::open(path) else {
        return false;
    };
    let mut buffer = [0u8; 132];
    matches!(file.read(&mut buffer), Ok(n) if n >= 132 && &buffer[128..132] == b"DICM")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_from_json() {
        let document = SeriesDocument::from_json(json!({
            "header": {"Modality": "PT", "ImageType": ["ORIGINAL"]},
            "slices": [{"ImagePositionPatient": [0, 0, 0]}],
            "acquisition_label": "WB"
        }))
        .unwrap();
        assert_eq!(document.modality().unwrap(), Modality::Pt);
        assert_eq!(document.acquisition_label.as_deref(), Some("WB"));
        assert_eq!(document.slices.len(), 1);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(SeriesDocument::from_json(json!([])).is_err());
        assert!(SeriesDocument::from_json(json!({"slices": []})).is_err());
        assert!(SeriesDocument::from_json(json!({"header": {}, "slices": {}})).is_err());
    }

    #[test]
    fn test_modality_resolution() {
        let document = SeriesDocument::from_json(json!({
            "header": {"Modality": "CT"},
            "modality": "OCT"
        }))
        .unwrap();
        assert_eq!(document.modality().unwrap(), Modality::Ophtha);

        let unknown = SeriesDocument::from_json(json!({"header": {"Modality": "MG"}})).unwrap();
        assert!(matches!(
            unknown.modality(),
            Err(ScancatError::UnsupportedModality(_))
        ));

        let missing = SeriesDocument::from_json(json!({"header": {}})).unwrap();
        assert!(missing.modality().is_err());
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.json");
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", json!({"header": {"Modality": "MR"}, "acquisition_label": ""})).unwrap();

        let document = SeriesDocument::load(&path).unwrap();
        assert_eq!(document.modality().unwrap(), Modality::Mr);
        assert_eq!(document.acquisition_label, None);
        assert!(document.slices.is_empty());
    }

    #[test]
    fn test_collect_dicom_files() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("b.dcm")).unwrap();
        File::create(dir.path().join("a.DICOM")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();
        File::create(dir.path().join("short")).unwrap();

        let mut preamble = vec![0u8; 128];
        preamble.extend_from_slice(b"DICM");
        File::create(dir.path().join("headerless"))
            .unwrap()
            .write_all(&preamble)
            .unwrap();

        let names: Vec<String> = collect_dicom_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.DICOM", "b.dcm", "headerless"]);
    }

    #[test]
    fn test_unreadable_dicom_directory() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("broken.dcm")).unwrap();
        assert!(matches!(
            SeriesDocument::load(dir.path()),
            Err(ScancatError::DicomError(_))
        ));
    }
}
