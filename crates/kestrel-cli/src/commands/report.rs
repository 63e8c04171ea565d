use super::{build_report, render};
use crate::OutputFormat;
use anyhow::Result;
use console::style;
use kestrel_core::analysis::AuditReport;
use kestrel_core::lighthouse::ResponseReader;
use kestrel_export::{ExportStyle, write_workbook_file};
use std::path::Path;

/// Build a report from a saved PageSpeed response file. Network-free.
pub fn report_from_file(file: &Path) -> Result<AuditReport> {
    tracing::debug!("Reading saved response: {}", file.display());

    let response = ResponseReader::from_file(file)?;
    ResponseReader::validate(&response)?;

    Ok(build_report(&response)?)
}

pub fn execute(file: &Path, export: Option<&Path>, format: OutputFormat) -> Result<()> {
    tracing::info!("Building report from {}", file.display());

    let report = report_from_file(file)?;
    render::render_report(&report, format)?;

    if let Some(path) = export {
        write_workbook_file(&report, &ExportStyle::default(), path)?;
        println!(
            "{} {}",
            style("Wrote spreadsheet report to").green(),
            path.display()
        );
    }

    Ok(())
}
