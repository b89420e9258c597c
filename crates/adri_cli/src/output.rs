use adri_core::AssessmentResult;
use adri_engine::AdriReport;
use colored::*;

pub fn print_assessment(result: &AssessmentResult, report: &AdriReport, format: &str) {
    match format {
        "json" => print_json_report(report),
        _ => print_text_report(result),
    }
}

fn print_text_report(result: &AssessmentResult) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  DATA READINESS ASSESSMENT".bold());
    println!("{}", "═".repeat(60));

    if result.passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            format!("PASSED  {:.1}/100", result.overall_score).green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            format!("FAILED  {:.1}/100", result.overall_score).red().bold()
        );
    }

    println!("\n{}", "Dimensions:".bold());
    for (name, score) in &result.dimension_scores {
        let rendered = format!("{:<14} {:>5.1}/20", name, score.score);
        if score.score >= 18.0 {
            println!("  {}", rendered.green());
        } else if score.score >= 14.0 {
            println!("  {}", rendered.yellow());
        } else {
            println!("  {}", rendered.red());
        }
    }

    let issues: Vec<&String> = result
        .dimension_scores
        .values()
        .flat_map(|d| d.issues.iter())
        .collect();
    if !issues.is_empty() {
        println!("\n{}", "Issues:".yellow().bold());
        for (i, issue) in issues.iter().enumerate() {
            println!("  {}. {}", i + 1, issue);
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Standard:        {}", result.standard_id);
    println!("  Rows assessed:   {}", result.dataset_info.rows);
    println!("  Rules executed:  {}", result.execution_stats.rules_executed);
    println!("  Duration:        {} ms", result.execution_stats.duration_ms);
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &AdriReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{json}"),
        Err(error) => print_error(&format!("failed to serialize report: {error}")),
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
