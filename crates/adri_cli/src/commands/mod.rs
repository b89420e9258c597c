pub mod assess;
pub mod check;
pub mod explain;

use adri_engine::DataSet;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Loads a JSON array of records into a dataset.
pub fn load_dataset(data_path: &str) -> Result<DataSet> {
    let raw = fs::read_to_string(Path::new(data_path))
        .with_context(|| format!("Failed to read data file: {data_path}"))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON data: {data_path}"))?;
    DataSet::from_json_records(&value)
        .map_err(|error| anyhow::anyhow!("Invalid data file {data_path}: {error}"))
}
