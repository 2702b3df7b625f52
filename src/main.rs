// Case Continuity CLI
// Reads a raw intake JSON file, runs the full analysis pipeline, and prints
// the attorney review packet to stdout.

use std::env;
use std::fs;

use anyhow::{bail, Context, Result};

use case_continuity::{build_attorney_review_packet, CasePipeline, Severity};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let path = match args.get(1) {
        Some(p) => p,
        None => {
            eprintln!("Usage: case-continuity <intake.json> [--validate-petitioner]");
            std::process::exit(2);
        }
    };
    let validate_petitioner = args.iter().any(|a| a == "--validate-petitioner");

    let text = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let raw: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parsing {path} as JSON"))?;
    if !raw.is_object() {
        bail!("{path}: top-level JSON value must be an object");
    }

    let pipeline = CasePipeline::new().with_petitioner_validation(validate_petitioner);
    let result = pipeline.build(&raw, None);

    let high = count(&result.issues, Severity::High);
    let medium = count(&result.issues, Severity::Medium);
    let low = count(&result.issues, Severity::Low);
    eprintln!(
        "📋 Analyzed window {} to {}: {} issue(s) ({} high, {} medium, {} low)",
        result.window_start,
        result.window_end,
        result.issues.len(),
        high,
        medium,
        low
    );

    let packet = build_attorney_review_packet(&result);
    println!("{}", serde_json::to_string_pretty(&packet)?);

    Ok(())
}

fn count(issues: &[case_continuity::Issue], severity: Severity) -> usize {
    issues.iter().filter(|i| i.severity == severity).count()
}
