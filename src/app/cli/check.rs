//! Check command output.

use std::path::PathBuf;

use crate::app::api::{self, CheckReport};
use crate::domain::AppError;

pub fn run_check(model: PathBuf, json: bool) -> Result<(), AppError> {
    let report = api::check(model)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    print_summary(&report);
    Ok(())
}

fn print_summary(report: &CheckReport) {
    println!("✅ {} is valid", report.model.display());
    println!("  optimiser: {}", if report.optimiser { "yes" } else { "no" });
    println!("  sources: {}", report.sources.len());
    for (i, source) in report.sources.iter().enumerate() {
        let profiles = if source.light_profiles.is_empty() {
            "none".to_string()
        } else {
            source.light_profiles.join(", ")
        };
        println!("  [{i}] {}, light profiles: {profiles}", source.distance);
    }
    if !report.warnings.is_empty() {
        println!("⚠️  Warnings:");
        for warning in &report.warnings {
            println!("  • {}", warning);
        }
    }
}
