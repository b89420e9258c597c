//! Dataset representation for assessment.
//!
//! This module provides types for representing the tabular data to be
//! assessed. A dataset is an in-memory collection of rows; a missing key in a
//! row is treated as a null value.

use std::collections::{BTreeSet, HashMap};

/// A value in a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// Null/missing value
    Null,
    /// String value
    String(String),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Timestamp value (ISO 8601 string)
    Timestamp(String),
}

impl DataValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Null => "null",
            DataValue::String(_) => "string",
            DataValue::Int(_) => "integer",
            DataValue::Float(_) => "float",
            DataValue::Bool(_) => "boolean",
            DataValue::Timestamp(_) => "timestamp",
        }
    }

    /// Attempts to get this value as a string.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            DataValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as a float. Integers widen; strings are
    /// never parsed, so a numeric-looking string stays non-numeric.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            DataValue::Float(f) => Some(*f),
            DataValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempts to get this value as a date string (String or Timestamp).
    pub fn as_date_str(&self) -> Option<&str> {
        match self {
            DataValue::String(s) => Some(s),
            DataValue::Timestamp(s) => Some(s),
            _ => None,
        }
    }

    /// Canonical string form used for key building and display.
    pub fn display(&self) -> String {
        match self {
            DataValue::Null => "NULL".to_string(),
            DataValue::String(s) => s.clone(),
            DataValue::Int(i) => i.to_string(),
            DataValue::Float(f) => f.to_string(),
            DataValue::Bool(b) => b.to_string(),
            DataValue::Timestamp(ts) => ts.clone(),
        }
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::String(s)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::String(s.to_string())
    }
}

impl From<i64> for DataValue {
    fn from(i: i64) -> Self {
        DataValue::Int(i)
    }
}

impl From<f64> for DataValue {
    fn from(f: f64) -> Self {
        DataValue::Float(f)
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        DataValue::Bool(b)
    }
}

/// A single row of data.
pub type DataRow = HashMap<String, DataValue>;

/// A dataset containing multiple rows.
#[derive(Debug, Clone)]
pub struct DataSet {
    rows: Vec<DataRow>,
}

impl DataSet {
    /// Creates a new empty dataset.
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    /// Creates a new dataset from rows.
    pub fn from_rows(rows: Vec<DataRow>) -> Self {
        Self { rows }
    }

    /// Builds a dataset from a JSON array of objects.
    ///
    /// Thin boundary loader for CLI consumers. Objects map to rows; JSON
    /// null/number/string/bool map to the corresponding `DataValue`.
    pub fn from_json_records(value: &serde_json::Value) -> Result<Self, String> {
        let records = value
            .as_array()
            .ok_or_else(|| "expected a JSON array of objects".to_string())?;

        let mut rows = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            let object = record
                .as_object()
                .ok_or_else(|| format!("record {idx} is not a JSON object"))?;
            let mut row = DataRow::with_capacity(object.len());
            for (key, val) in object {
                row.insert(key.clone(), json_to_value(val)?);
            }
            rows.push(row);
        }
        Ok(Self { rows })
    }

    /// Returns the number of rows in the dataset.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns an iterator over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &DataRow> {
        self.rows.iter()
    }

    /// Gets a specific row by index.
    pub fn get_row(&self, index: usize) -> Option<&DataRow> {
        self.rows.get(index)
    }

    /// Adds a row to the dataset.
    pub fn add_row(&mut self, row: DataRow) {
        self.rows.push(row);
    }

    /// Value of `field` in `row`; a missing key counts as null.
    pub fn value<'a>(&self, row: &'a DataRow, field: &str) -> &'a DataValue {
        row.get(field).unwrap_or(&DataValue::Null)
    }

    /// Sorted union of all field names across rows.
    pub fn field_names(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .rows
            .iter()
            .flat_map(|row| row.keys().map(|k| k.as_str()))
            .collect();
        names.into_iter().map(|s| s.to_string()).collect()
    }

    /// (rows, columns) shape of the dataset.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.field_names().len())
    }

    /// Takes a sample of rows from the dataset.
    ///
    /// If `size` is greater than the number of rows, returns all rows.
    pub fn sample(&self, size: usize) -> DataSet {
        let sample_size = size.min(self.rows.len());
        DataSet {
            rows: self.rows.iter().take(sample_size).cloned().collect(),
        }
    }
}

fn json_to_value(val: &serde_json::Value) -> Result<DataValue, String> {
    match val {
        serde_json::Value::Null => Ok(DataValue::Null),
        serde_json::Value::Bool(b) => Ok(DataValue::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(DataValue::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(DataValue::Float(f))
            } else {
                Err(format!("unrepresentable number: {n}"))
            }
        }
        serde_json::Value::String(s) => Ok(DataValue::String(s.clone())),
        other => Err(format!(
            "unsupported value type in record: {}",
            match other {
                serde_json::Value::Array(_) => "array",
                _ => "object",
            }
        )),
    }
}

impl Default for DataSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<DataRow> for DataSet {
    fn from_iter<T: IntoIterator<Item = DataRow>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_value_types() {
        assert_eq!(DataValue::Null.type_name(), "null");
        assert_eq!(DataValue::String("test".into()).type_name(), "string");
        assert_eq!(DataValue::Int(42).type_name(), "integer");
        assert_eq!(DataValue::Float(3.5).type_name(), "float");
        assert_eq!(DataValue::Bool(true).type_name(), "boolean");
    }

    #[test]
    fn test_as_float_never_parses_strings() {
        assert_eq!(DataValue::Int(42).as_float(), Some(42.0));
        assert_eq!(DataValue::Float(1.5).as_float(), Some(1.5));
        assert_eq!(DataValue::String("42".into()).as_float(), None);
        assert_eq!(DataValue::Bool(true).as_float(), None);
    }

    #[test]
    fn test_missing_key_is_null() {
        let mut row = DataRow::new();
        row.insert("a".to_string(), DataValue::Int(1));
        let dataset = DataSet::from_rows(vec![row]);
        let row = dataset.get_row(0).unwrap();

        assert!(!dataset.value(row, "a").is_null());
        assert!(dataset.value(row, "missing").is_null());
    }

    #[test]
    fn test_field_names_sorted_union() {
        let mut r1 = DataRow::new();
        r1.insert("b".to_string(), DataValue::Int(1));
        let mut r2 = DataRow::new();
        r2.insert("a".to_string(), DataValue::Int(2));
        r2.insert("c".to_string(), DataValue::Null);

        let dataset = DataSet::from_rows(vec![r1, r2]);
        assert_eq!(dataset.field_names(), vec!["a", "b", "c"]);
        assert_eq!(dataset.shape(), (2, 3));
    }

    #[test]
    fn test_from_json_records() {
        let json = serde_json::json!([
            {"id": "a", "age": 30, "score": 1.5, "active": true, "note": null},
            {"id": "b"}
        ]);
        let dataset = DataSet::from_json_records(&json).unwrap();

        assert_eq!(dataset.len(), 2);
        let row = dataset.get_row(0).unwrap();
        assert_eq!(row.get("id"), Some(&DataValue::String("a".into())));
        assert_eq!(row.get("age"), Some(&DataValue::Int(30)));
        assert_eq!(row.get("score"), Some(&DataValue::Float(1.5)));
        assert_eq!(row.get("note"), Some(&DataValue::Null));
    }

    #[test]
    fn test_from_json_records_rejects_non_array() {
        let json = serde_json::json!({"id": "a"});
        assert!(DataSet::from_json_records(&json).is_err());

        let json = serde_json::json!([{"nested": {"x": 1}}]);
        assert!(DataSet::from_json_records(&json).is_err());
    }

    #[test]
    fn test_dataset_sample() {
        let mut dataset = DataSet::empty();
        for i in 0..10 {
            let mut row = DataRow::new();
            row.insert("id".to_string(), DataValue::Int(i));
            dataset.add_row(row);
        }

        assert_eq!(dataset.sample(5).len(), 5);
        assert_eq!(dataset.sample(100).len(), 10);
    }
}
