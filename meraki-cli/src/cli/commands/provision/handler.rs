//! Provision command handler

use std::time::Instant;

use anyhow::{Context, Result};
use colored::*;

use crate::api::{MerakiClient, Operation};
use crate::config::Settings;
use crate::provision::excel::{read_workbook, write_workbook};
use crate::provision::{self, RunReport, SectionSummary};

/// Read the workbook, run every enabled section and save the annotated copy
pub async fn handle_provision_command(settings: &Settings) -> Result<()> {
    let sections = settings.options.sections;
    if !sections.any() {
        println!("{}", "All sections are disabled, nothing to do.".yellow());
        return Ok(());
    }

    if settings.verbose {
        println!(
            "Reading workbook: {}",
            settings.input_file.display().to_string().cyan()
        );
    }
    let mut workbook = read_workbook(&settings.input_file).with_context(|| {
        format!(
            "Please ensure the file exists or the correct filename was entered with -i ({})",
            settings.input_file.display()
        )
    })?;

    let client = MerakiClient::from_context(&settings.context, &settings.base_url, settings.timeout)?;

    if settings.dry_run {
        let operations = provision::plan(&client, &settings.context, &settings.options, &workbook)
            .await
            .context("Failed to build requests")?;
        print_plan(&operations)?;
        return Ok(());
    }

    let start = Instant::now();
    let report = provision::run(&client, &settings.context, &settings.options, &mut workbook).await;

    println!("{}", "*".repeat(60).dimmed());
    println!(
        "Saving the file to: {}",
        settings.output_file.display().to_string().bright_green()
    );
    write_workbook(&workbook, &settings.output_file)?;

    print_report(&report);
    if settings.verbose {
        println!("Total time: {:.2}s", start.elapsed().as_secs_f64());
    }

    Ok(())
}

fn print_plan(operations: &[Operation]) -> Result<()> {
    if operations.is_empty() {
        println!("No requests to send.");
        return Ok(());
    }
    for operation in operations {
        println!(
            "{} {}",
            operation.http_method().bold(),
            operation.path().cyan()
        );
        if let Some(body) = operation.body() {
            println!(
                "{}",
                serde_json::to_string_pretty(body).context("Failed to format JSON output")?
            );
        }
        println!();
    }
    println!("{} request(s) would be sent.", operations.len());
    Ok(())
}

fn print_summary(summary: &SectionSummary) {
    let failed = if summary.failed > 0 {
        summary.failed.to_string().red().to_string()
    } else {
        summary.failed.to_string()
    };
    let mut line = format!(
        "{:<24} {} ok, {} failed",
        summary.section,
        summary.succeeded.to_string().green(),
        failed
    );
    if summary.skipped > 0 {
        line.push_str(&format!(", {} skipped", summary.skipped));
    }
    println!("{}", line);
}

fn print_report(report: &RunReport) {
    println!();
    for summary in &report.summaries {
        print_summary(summary);
    }
    for (section, reason) in &report.skipped {
        println!("{:<24} {}", section, format!("not run: {}", reason).yellow());
    }
    if report.has_failures() {
        println!(
            "{}",
            "Some records failed; see the error columns in the saved workbook.".yellow()
        );
    }
}
