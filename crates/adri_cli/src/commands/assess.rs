use adri_core::StandardSource;
use adri_engine::{AssessmentEngine, ReportGenerator};
use adri_parser::load_standard;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::commands::load_dataset;
use crate::output;

pub fn execute(
    standard_path: &str,
    data_path: &str,
    format: &str,
    output_path: Option<&str>,
) -> Result<()> {
    info!("Assessing {} against {}", data_path, standard_path);

    let standard = load_standard(Path::new(standard_path))
        .with_context(|| format!("Failed to load standard: {standard_path}"))?;
    let dataset = load_dataset(data_path)?;

    let source = StandardSource::Loaded(standard);
    let engine = AssessmentEngine::new();
    let result = engine
        .assess(&source, &dataset)
        .with_context(|| format!("Assessment failed for {data_path}"))?;

    let report = ReportGenerator::new().generate(&result);
    output::print_assessment(&result, &report, format);

    if let Some(path) = output_path {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json).with_context(|| format!("Failed to write report: {path}"))?;
        output::print_info(&format!("Report written to {path}"));
    }

    if !result.passed {
        std::process::exit(1);
    }
    Ok(())
}
