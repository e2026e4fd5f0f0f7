use super::tags::{
    ALWAYS_LIST, IMAGE_ORIENTATION_PATIENT_TAG, IMAGE_POSITION_PATIENT_TAG, INSTANCE_NUMBER_TAG,
    PIXEL_DATA_TAG,
};
use super::{format_string, Header};
use crate::types::{SliceTable, IMAGE_ORIENTATION_PATIENT, IMAGE_POSITION_PATIENT};
use dicom_core::dictionary::DataDictionary;
use dicom_core::{Tag, VR};
use dicom_dictionary_std::StandardDataDictionary;
use dicom_object::mem::InMemElement;
use dicom_object::InMemDicomObject;
use log::debug;
use serde_json::{Map, Value};

impl Header {
    /// Converts an already-parsed DICOM object into a header
    ///
    /// Every element with a standard dictionary keyword is kept: text is
    /// cleaned with [`format_string`], numeric VRs become numbers, sequences
    /// become lists of nested objects. Binary values, pixel data and private
    /// tags are skipped.
    pub fn from_dicom(dcm: &InMemDicomObject) -> Self {
        Header::from_map(object_fields(dcm))
    }
}

impl SliceTable {
    /// Builds one row per image with its position and orientation
    pub fn from_dicom_objects<'a, I>(objects: I) -> Self
    where
        I: IntoIterator<Item = &'a InMemDicomObject>,
    {
        let mut table = SliceTable::new();
        for dcm in objects {
            let mut row = Map::new();
            for (tag, keyword) in [
                (IMAGE_POSITION_PATIENT_TAG, IMAGE_POSITION_PATIENT),
                (IMAGE_ORIENTATION_PATIENT_TAG, IMAGE_ORIENTATION_PATIENT),
            ] {
                if let Some(values) = get_multi_float_value(dcm, tag) {
                    row.insert(keyword.to_string(), Value::from(values));
                }
            }
            if let Some(number) = dcm
                .element(INSTANCE_NUMBER_TAG)
                .ok()
                .and_then(|elem| elem.to_int::<i64>().ok())
            {
                row.insert("InstanceNumber".to_string(), Value::from(number));
            }
            table.push(row);
        }
        table
    }
}

/// Helper to get a multi-valued float from a DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted
fn get_multi_float_value(dcm: &InMemDicomObject, tag: Tag) -> Option<Vec<f64>> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_multi_float64().ok())
}

fn object_fields(dcm: &InMemDicomObject) -> Map<String, Value> {
    let mut fields = Map::new();
    for elem in dcm {
        let tag = elem.header().tag;
        if tag == PIXEL_DATA_TAG {
            continue;
        }
        let Some(entry) = StandardDataDictionary.by_tag(tag) else {
            continue;
        };
        let keyword = entry.alias;
        match element_value(elem, keyword) {
            Some(value) => {
                fields.insert(keyword.to_string(), value);
            }
            None => debug!("No value found for tag: {}", keyword),
        }
    }
    fields
}

fn element_value(elem: &InMemElement, keyword: &str) -> Option<Value> {
    if let Some(items) = elem.items() {
        let nested: Vec<Value> = items
            .iter()
            .map(object_fields)
            .filter(|fields| !fields.is_empty())
            .map(Value::Object)
            .collect();
        return if nested.is_empty() {
            None
        } else {
            Some(Value::Array(nested))
        };
    }

    let mut values: Vec<Value> = match elem.header().vr {
        VR::OB | VR::OD | VR::OF | VR::OL | VR::OV | VR::OW | VR::UN | VR::SQ => return None,
        VR::DS | VR::FD | VR::FL => elem
            .to_multi_float64()
            .ok()?
            .into_iter()
            .map(Value::from)
            .collect(),
        VR::IS | VR::SL | VR::SS | VR::SV | VR::UL | VR::US | VR::UV => elem
            .to_multi_int::<i64>()
            .ok()?
            .into_iter()
            .map(Value::from)
            .collect(),
        _ => elem
            .to_multi_str()
            .ok()?
            .iter()
            .filter_map(|s| format_string(s.trim()))
            .filter(|s| !s.is_empty())
            .map(Value::from)
            .collect(),
    };

    if values.is_empty() {
        None
    } else if values.len() == 1 && !ALWAYS_LIST.contains(&keyword) {
        Some(values.remove(0))
    } else {
        Some(Value::Array(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::tags::{IMAGE_TYPE_TAG, SERIES_DESCRIPTION_TAG};
    use dicom_core::value::{DataSetSequence, PrimitiveValue};
    use dicom_core::{dicom_value, DataElement};

    const CODE_VALUE_TAG: Tag = Tag(0x0008, 0x0100);
    const RADIONUCLIDE_CODE_SEQUENCE_TAG: Tag = Tag(0x0054, 0x0300);
    const RADIOPHARMACEUTICAL_INFORMATION_SEQUENCE_TAG: Tag = Tag(0x0054, 0x0016);

    fn ct_slice(z: f64) -> InMemDicomObject {
        InMemDicomObject::from_element_iter([
            DataElement::new(
                IMAGE_POSITION_PATIENT_TAG,
                VR::DS,
                dicom_value!(F64, [0.0, 0.0, z]),
            ),
            DataElement::new(INSTANCE_NUMBER_TAG, VR::IS, PrimitiveValue::from("7")),
        ])
    }

    #[test]
    fn test_header_from_dicom() {
        let dcm = InMemDicomObject::from_element_iter([
            DataElement::new(IMAGE_TYPE_TAG, VR::CS, dicom_value!(Strs, ["ORIGINAL"])),
            DataElement::new(
                SERIES_DESCRIPTION_TAG,
                VR::LO,
                PrimitiveValue::from("CHEST W CONTRAST "),
            ),
        ]);
        let header = Header::from_dicom(&dcm);
        // Single-valued ImageType still becomes a list
        assert_eq!(header.get("ImageType"), Some(&serde_json::json!(["ORIGINAL"])));
        assert_eq!(header.get_str("SeriesDescription"), Some("CHEST W CONTRAST"));
    }

    #[test]
    fn test_header_from_dicom_sequence() {
        let nuclide = InMemDicomObject::from_element_iter([DataElement::new(
            CODE_VALUE_TAG,
            VR::SH,
            PrimitiveValue::from("C-111A1"),
        )]);
        let info = InMemDicomObject::from_element_iter([DataElement::new(
            RADIONUCLIDE_CODE_SEQUENCE_TAG,
            VR::SQ,
            DataSetSequence::from(vec![nuclide]),
        )]);
        let dcm = InMemDicomObject::from_element_iter([DataElement::new(
            RADIOPHARMACEUTICAL_INFORMATION_SEQUENCE_TAG,
            VR::SQ,
            DataSetSequence::from(vec![info]),
        )]);
        let header = Header::from_dicom(&dcm);
        assert_eq!(
            header.get_str(crate::header::tags::RADIONUCLIDE_CODE_VALUE),
            Some("C-111A1")
        );
    }

    #[test]
    fn test_slice_table_from_dicom_objects() {
        let slices = [ct_slice(0.0), ct_slice(12.5)];
        let table = SliceTable::from_dicom_objects(slices.iter());
        assert_eq!(table.len(), 2);
        let column = table.column(IMAGE_POSITION_PATIENT).unwrap();
        assert_eq!(column[1], &serde_json::json!([0.0, 0.0, 12.5]));
        assert_eq!(table.rows()[0]["InstanceNumber"], 7);
        assert!(!table.has_column(IMAGE_ORIENTATION_PATIENT));
    }
}
