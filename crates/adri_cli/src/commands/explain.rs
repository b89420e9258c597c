use adri_core::{DIMENSIONS, StandardSource};
use adri_engine::AssessmentEngine;
use adri_parser::load_standard;
use anyhow::{Context, Result, bail};
use colored::*;
use std::path::Path;
use tracing::info;

use crate::commands::load_dataset;

pub fn execute(standard_path: &str, data_path: &str, dimension: Option<&str>) -> Result<()> {
    if let Some(name) = dimension {
        if !DIMENSIONS.contains(&name) {
            bail!(
                "unknown dimension '{name}', expected one of: {}",
                DIMENSIONS.join(", ")
            );
        }
    }

    info!("Explaining assessment of {} against {}", data_path, standard_path);

    let standard = load_standard(Path::new(standard_path))
        .with_context(|| format!("Failed to load standard: {standard_path}"))?;
    let dataset = load_dataset(data_path)?;

    let source = StandardSource::Loaded(standard);
    let result = AssessmentEngine::new()
        .assess(&source, &dataset)
        .with_context(|| format!("Assessment failed for {data_path}"))?;

    for (name, score) in &result.dimension_scores {
        if dimension.is_some_and(|d| d != name) {
            continue;
        }
        let details = &score.details;

        println!("\n{}", format!("{name}  {:.1}/20", score.score).bold());
        println!(
            "  pass rate: {:.1}%  ({}/{} checks passed)",
            details.pass_rate * 100.0,
            details.rule_counts.passed,
            details.rule_counts.total
        );

        if !details.per_field.is_empty() {
            println!("  per field:");
            for (field, counts) in &details.per_field {
                println!(
                    "    {:<20} {:>4}/{} passed",
                    field, counts.passed, counts.total
                );
            }
        }
        if !details.rule_weights.is_empty() {
            println!("  rule weights:");
            for (rule, weight) in &details.rule_weights {
                println!("    {rule:<28} {weight}");
            }
        }
        for issue in &score.issues {
            println!("  {} {}", "!".yellow().bold(), issue);
        }
    }

    println!(
        "\n{}",
        format!(
            "overall {:.1}/100  ({})",
            result.overall_score,
            if result.passed { "PASSED" } else { "FAILED" }
        )
        .bold()
    );
    Ok(())
}
