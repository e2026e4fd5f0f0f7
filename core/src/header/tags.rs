use dicom_core::Tag;

// Tags read directly from DICOM objects
pub const IMAGE_TYPE_TAG: Tag = Tag(0x0008, 0x0008);
pub const SERIES_DESCRIPTION_TAG: Tag = Tag(0x0008, 0x103E);
pub const IMAGE_POSITION_PATIENT_TAG: Tag = Tag(0x0020, 0x0032);
pub const IMAGE_ORIENTATION_PATIENT_TAG: Tag = Tag(0x0020, 0x0037);
pub const INSTANCE_NUMBER_TAG: Tag = Tag(0x0020, 0x0013);
pub const PIXEL_DATA_TAG: Tag = Tag(0x7FE0, 0x0010);

// Header keywords: core image
pub const IMAGE_TYPE: &str = "ImageType";
pub const MODALITY: &str = "Modality";
pub const COLUMNS: &str = "Columns";
pub const SERIES_DESCRIPTION: &str = "SeriesDescription";
pub const STUDY_DESCRIPTION: &str = "StudyDescription";
pub const PROTOCOL_NAME: &str = "ProtocolName";

// MR timing
pub const REPETITION_TIME: &str = "RepetitionTime";
pub const ECHO_TIME: &str = "EchoTime";
pub const INVERSION_TIME: &str = "InversionTime";

// PET
pub const CORRECTED_IMAGE: &str = "CorrectedImage";
pub const ATTENUATION_CORRECTION_METHOD: &str = "AttenuationCorrectionMethod";
pub const RADIONUCLIDE_CODE_VALUE: &str =
    "RadiopharmaceuticalInformationSequence.0.RadionuclideCodeSequence.0.CodeValue";
pub const RADIONUCLIDE_CODE_MEANING: &str =
    "RadiopharmaceuticalInformationSequence.0.RadionuclideCodeSequence.0.CodeMeaning";
pub const RADIOPHARMACEUTICAL_CODE_VALUE: &str =
    "RadiopharmaceuticalInformationSequence.0.RadiopharmaceuticalCodeSequence.0.CodeValue";
pub const RADIOPHARMACEUTICAL_CODE_MEANING: &str =
    "RadiopharmaceuticalInformationSequence.0.RadiopharmaceuticalCodeSequence.0.CodeMeaning";
pub const RADIOPHARMACEUTICAL: &str =
    "RadiopharmaceuticalInformationSequence.0.RadionuclideCodeSequence.0.Radiopharmaceutical";

// Ophthalmology
pub const IMAGE_LATERALITY: &str = "ImageLaterality";
pub const ACQUISITION_DEVICE_CODE_VALUE: &str = "AcquisitionDeviceTypeCodeSequence.0.CodeValue";

/// Keywords that are always lists, even with a single value
pub const ALWAYS_LIST: &[&str] = &[
    IMAGE_TYPE,
    CORRECTED_IMAGE,
    "ImagePositionPatient",
    "ImageOrientationPatient",
];

#[cfg(test)]
mod tests {
    use super::*;
    use dicom_core::dictionary::DataDictionary;
    use dicom_dictionary_std::StandardDataDictionary;

    #[test]
    fn test_tags_match_dictionary_keywords() {
        for (tag, keyword) in [
            (IMAGE_TYPE_TAG, IMAGE_TYPE),
            (SERIES_DESCRIPTION_TAG, SERIES_DESCRIPTION),
            (IMAGE_POSITION_PATIENT_TAG, "ImagePositionPatient"),
            (IMAGE_ORIENTATION_PATIENT_TAG, "ImageOrientationPatient"),
            (INSTANCE_NUMBER_TAG, "InstanceNumber"),
            (PIXEL_DATA_TAG, "PixelData"),
        ] {
            let entry = StandardDataDictionary.by_tag(tag);
            assert_eq!(entry.map(|e| e.alias), Some(keyword), "{}", keyword);
        }
    }

    #[test]
    fn test_keywords_are_standard() {
        for keyword in [
            MODALITY,
            COLUMNS,
            STUDY_DESCRIPTION,
            PROTOCOL_NAME,
            REPETITION_TIME,
            ECHO_TIME,
            INVERSION_TIME,
            CORRECTED_IMAGE,
            ATTENUATION_CORRECTION_METHOD,
            IMAGE_LATERALITY,
        ] {
            assert!(StandardDataDictionary.by_name(keyword).is_some(), "{}", keyword);
        }
    }

    #[test]
    fn test_always_list() {
        assert!(ALWAYS_LIST.contains(&"ImagePositionPatient"));
        assert!(!ALWAYS_LIST.contains(&SERIES_DESCRIPTION));
    }
}
