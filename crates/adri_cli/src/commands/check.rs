use adri_parser::{parse_file, validate_standard};
use anyhow::{Context, Result};
use serde_json::json;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(standard_path: &str, format: &str) -> Result<()> {
    info!("Checking standard definition: {}", standard_path);

    let path = Path::new(standard_path);
    let standard = parse_file(path)
        .with_context(|| format!("Failed to parse standard file: {standard_path}"))?;
    validate_standard(&standard)
        .with_context(|| format!("Standard definition is invalid: {standard_path}"))?;

    if format == "json" {
        let summary = json!({
            "valid": true,
            "id": standard.standards.id,
            "version": standard.standards.version,
            "authority": standard.standards.authority,
            "overall_minimum": standard.requirements.overall_minimum,
            "field_count": standard.requirements.field_requirements.len(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    output::print_info(&format!(
        "Standard loaded: {} v{} (authority: {})",
        standard.standards.id, standard.standards.version, standard.standards.authority
    ));
    output::print_success("Standard definition is valid");

    println!("\nStandard Summary:");
    println!("  Id:              {}", standard.standards.id);
    println!("  Name:            {}", standard.standards.name);
    println!("  Version:         {}", standard.standards.version);
    println!("  Authority:       {}", standard.standards.authority);
    println!(
        "  Effective date:  {}",
        standard.standards.effective_date.as_deref().unwrap_or("N/A")
    );
    println!("  Overall minimum: {}", standard.requirements.overall_minimum);
    println!(
        "  Fields:          {}",
        standard.requirements.field_requirements.len()
    );

    let mut sections = Vec::new();
    if standard.requirements.consistency.is_some() {
        sections.push("consistency");
    }
    if standard.requirements.freshness.is_some() {
        sections.push("freshness");
    }
    if standard.requirements.plausibility.is_some() {
        sections.push("plausibility");
    }
    if !sections.is_empty() {
        println!("  Rule sections:   {}", sections.join(", "));
    }

    Ok(())
}
