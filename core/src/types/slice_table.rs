use crate::error::{Result, ScancatError};
use serde_json::{Map, Value};

pub const IMAGE_POSITION_PATIENT: &str = "ImagePositionPatient";
pub const IMAGE_ORIENTATION_PATIENT: &str = "ImageOrientationPatient";

static NULL: Value = Value::Null;

/// Per-image records of one series
///
/// Each row maps a header keyword to its value for one image. A column
/// exists when at least one row carries the key; rows lacking it read as
/// null, mirroring a sparse table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SliceTable {
    rows: Vec<Map<String, Value>>,
}

impl SliceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table with one `ImagePositionPatient` row per position
    pub fn from_positions<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = [f64; 3]>,
    {
        let rows = positions
            .into_iter()
            .map(|p| {
                let mut row = Map::new();
                row.insert(IMAGE_POSITION_PATIENT.to_string(), Value::from(p.to_vec()));
                row
            })
            .collect();
        Self { rows }
    }

    /// Parses a JSON array of objects
    ///
    /// # Errors
    ///
    /// Returns [`ScancatError::InvalidValue`] if the value is not an array of
    /// objects.
    pub fn from_json(value: Value) -> Result<Self> {
        let Value::Array(items) = value else {
            return Err(ScancatError::InvalidValue(
                "slice table must be a JSON array of objects".to_string(),
            ));
        };
        let mut rows = Vec::with_capacity(items.len());
        for (idx, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(row) => rows.push(row),
                other => {
                    return Err(ScancatError::InvalidValue(format!(
                        "slice table row {} is not an object (found {})",
                        idx, other
                    )))
                }
            }
        }
        Ok(Self { rows })
    }

    pub fn push(&mut self, row: Map<String, Value>) {
        self.rows.push(row);
    }

    /// Number of images
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Map<String, Value>] {
        &self.rows
    }

    /// Whether any row carries `name`
    pub fn has_column(&self, name: &str) -> bool {
        self.rows.iter().any(|row| row.contains_key(name))
    }

    /// Returns the column `name`, or `None` if no row carries it
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        if !self.has_column(name) {
            return None;
        }
        Some(
            self.rows
                .iter()
                .map(|row| row.get(name).unwrap_or(&NULL))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_positions() {
        let table = SliceTable::from_positions([[0.0, 0.0, 1.0], [0.0, 0.0, 2.0]]);
        assert_eq!(table.len(), 2);
        assert!(table.has_column(IMAGE_POSITION_PATIENT));
        let column = table.column(IMAGE_POSITION_PATIENT).unwrap();
        assert_eq!(column[1], &json!([0.0, 0.0, 2.0]));
    }

    #[test]
    fn test_sparse_column_reads_null() {
        let table = SliceTable::from_json(json!([
            {"ImagePositionPatient": [0, 0, 1]},
            {"InstanceNumber": 2}
        ]))
        .unwrap();
        let column = table.column(IMAGE_POSITION_PATIENT).unwrap();
        assert_eq!(column.len(), 2);
        assert!(column[1].is_null());
        assert!(table.column(IMAGE_ORIENTATION_PATIENT).is_none());
    }

    #[test]
    fn test_from_json_rejects_non_table() {
        assert!(SliceTable::from_json(json!({"a": 1})).is_err());
        assert!(SliceTable::from_json(json!([1, 2])).is_err());
        assert!(SliceTable::from_json(json!([])).unwrap().is_empty());
    }
}
