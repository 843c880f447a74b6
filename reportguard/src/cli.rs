//! File-based `check` and `amend` commands.
//!
//! Output goes to caller-supplied writers so the binary can route results to
//! stdout and diagnostics to stderr.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::ReportData;
use crate::review::generate_contradiction_report;
use crate::services::{ReviewOutcome, ReviewService};

/// Read a report snapshot from a JSON file.
pub fn read_report(path: &Path) -> Result<ReportData> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Check the report at `path` and write the text report, or the JSON result
/// when `json` is set. Returns whether any contradictions were found.
pub fn check_file(
    service: &ReviewService,
    path: &Path,
    json: bool,
    out: &mut impl Write,
) -> Result<bool> {
    let report = read_report(path)?;
    let result = service.check(&report);

    if json {
        serde_json::to_writer_pretty(&mut *out, &result)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", generate_contradiction_report(&result))?;
    }

    Ok(result.has_contradictions)
}

/// Review the report at `path` and write the amended report JSON to
/// `output` (or `out` when no output file is given). A summary of the
/// amendments and the final report text go to `log`.
pub async fn amend_file(
    service: &ReviewService,
    path: &Path,
    output: Option<&Path>,
    max_passes: Option<u32>,
    out: &mut impl Write,
    log: &mut impl Write,
) -> Result<ReviewOutcome> {
    let report = read_report(path)?;
    let outcome = service.review(&report, max_passes).await;

    let amended = serde_json::to_string_pretty(&outcome.amendment.amended_data)?;
    match output {
        Some(target) => {
            fs::write(target, format!("{amended}\n"))?;
            tracing::info!(path = %target.display(), "Amended report written");
        }
        None => writeln!(out, "{amended}")?,
    }

    write_summary(&outcome, log)?;
    Ok(outcome)
}

fn write_summary(outcome: &ReviewOutcome, log: &mut impl Write) -> Result<()> {
    let amendment = &outcome.amendment;
    writeln!(
        log,
        "Applied {} amendment(s) in {} pass(es)",
        amendment.amendments.len(),
        outcome.passes
    )?;
    for applied in &amendment.amendments {
        writeln!(
            log,
            "  [{}/{}] {}: {}",
            applied.amendment_type, applied.confidence, applied.field, applied.description
        )?;
    }
    if !amendment.unresolved.is_empty() {
        writeln!(log, "Unresolved:")?;
        for message in &amendment.unresolved {
            writeln!(log, "  {message}")?;
        }
    }
    writeln!(log)?;
    writeln!(log, "{}", outcome.report)?;
    Ok(())
}
