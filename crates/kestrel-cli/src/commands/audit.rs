use super::{build_report, render};
use crate::{DeviceStrategy, OutputFormat};
use anyhow::Result;
use console::style;
use kestrel_client::PsiClient;
use kestrel_export::{ExportStyle, write_workbook_file};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    url: &str,
    strategy: DeviceStrategy,
    api_key: Option<&str>,
    timeout: u64,
    categories: Vec<String>,
    export: Option<&Path>,
    save: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    tracing::info!("Auditing {}", url);

    let client = PsiClient::new(timeout)?.with_categories(categories);
    let response = client.fetch(url, strategy.to_strategy(), api_key)?;

    if let Some(path) = save {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &response)?;
        println!("{} {}", style("Saved raw response to").dim(), path.display());
    }

    let report = build_report(&response)?;
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
