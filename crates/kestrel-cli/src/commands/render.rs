use crate::OutputFormat;
use anyhow::Result;
use console::style;
use kestrel_core::analysis::{AuditReport, Priority};

pub fn render_report(report: &AuditReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => output_json(report),
        OutputFormat::Table => output_table(report),
        OutputFormat::Pretty => output_pretty(report),
    }
}

fn output_pretty(report: &AuditReport) -> Result<()> {
    println!("\n{}", style("PageSpeed Audit Report").bold().cyan());
    println!("{}", style("======================").cyan());

    if let Some(url) = &report.scores.final_url {
        println!("  URL:     {}", url);
    }
    if let Some(fetched) = &report.scores.fetch_time {
        println!("  Fetched: {}", fetched);
    }

    println!("\n{}", style("Scores:").bold());
    for category in &report.scores.categories {
        match category.display_score() {
            Some(score) => {
                let rendered = format!("{:.0}/100", score);
                let colored = if score >= 90.0 {
                    style(rendered).green()
                } else if score >= 50.0 {
                    style(rendered).yellow()
                } else {
                    style(rendered).red()
                };
                println!("  {:<22} {}", category.title, colored);
            }
            None => println!("  {:<22} N/A", category.title),
        }
    }

    if let Some(field) = &report.scores.field_data {
        println!("\n{}", style("Field Data (CrUX):").bold());
        if let Some(v) = field.largest_contentful_paint_ms {
            println!("  Largest Contentful Paint:  {:.0} ms", v);
        }
        if let Some(v) = field.interaction_to_next_paint_ms {
            println!("  Interaction to Next Paint: {:.0} ms", v);
        }
        if let Some(v) = field.cumulative_layout_shift {
            println!("  Cumulative Layout Shift:   {:.2}", v);
        }
        if let Some(v) = field.first_contentful_paint_ms {
            println!("  First Contentful Paint:    {:.0} ms", v);
        }
        if let Some(overall) = &field.overall_category {
            println!("  Overall:                   {}", overall);
        }
    }

    if report.findings.is_empty() {
        println!("\n{}", style("No significant issues found.").green().bold());
        println!();
        return Ok(());
    }

    let count_line = format!("Found {} issues/opportunities:", report.findings.len());
    println!("\n{}", style(count_line).bold());

    for finding in &report.findings {
        let tag = match finding.priority {
            Priority::High => style("[High]").red().bold(),
            Priority::Medium => style("[Medium]").yellow(),
            Priority::Informational => style("[Info]").dim(),
        };
        println!(
            "\n{} {} {}",
            tag,
            style(&finding.title).bold(),
            style(format!("({})", finding.category)).dim()
        );

        if let Some(value) = &finding.display_value {
            println!("  {}", style(value).italic());
        }
        if !finding.description.is_empty() {
            println!("  {}", finding.description);
        }
        if let Some(link) = &finding.reference_link {
            println!("  {}", style(link).dim());
        }
        if let Some(evidence) = &finding.evidence {
            println!("  {}", style(evidence.headings.join(" | ")).dim());
            for row in &evidence.rows {
                println!("  {}", row.join(" | "));
            }
        }
    }

    println!(); // trailing newline
    Ok(())
}

fn output_json(report: &AuditReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}

fn output_table(report: &AuditReport) -> Result<()> {
    // Simple table format
    println!("Category,Score");
    for category in &report.scores.categories {
        match category.display_score() {
            Some(score) => println!("{},{:.0}", category.title, score),
            None => println!("{},N/A", category.title),
        }
    }

    println!();
    println!("Category,Priority,Issue,Score,Display Value");
    for finding in &report.findings {
        let score = finding
            .score
            .map(|s| format!("{:.2}", s))
            .unwrap_or_else(|| "N/A".to_string());
        println!(
            "{},{},{},{},{}",
            finding.category,
            finding.priority.as_str(),
            finding.title,
            score,
            finding.display_value.as_deref().unwrap_or("")
        );
    }

    Ok(())
}
