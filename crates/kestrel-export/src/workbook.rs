use crate::error::Result;
use crate::style::ExportStyle;
use kestrel_core::analysis::{AuditReport, Finding, ScoreSummary};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;

const FINDINGS_HEADERS: [&str; 7] = [
    "Category",
    "Priority",
    "Issue Name",
    "Description",
    "Display Value",
    "Technical Breakdown",
    "Reference Link",
];

/// Serialize a report into xlsx bytes
pub fn write_workbook(report: &AuditReport, style: &ExportStyle) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(report, style)?;
    let buffer = workbook.save_to_buffer()?;

    tracing::info!("Serialized workbook: {} bytes", buffer.len());

    Ok(buffer)
}

/// Write a report workbook to the given path
pub fn write_workbook_file(report: &AuditReport, style: &ExportStyle, path: &Path) -> Result<()> {
    let mut workbook = build_workbook(report, style)?;
    workbook.save(path)?;

    tracing::info!(
        "Wrote workbook with {} findings to {}",
        report.findings.len(),
        path.display()
    );

    Ok(())
}

struct Formats {
    header: Format,
    cell: Format,
    bad_cell: Format,
}

impl Formats {
    fn from_style(style: &ExportStyle) -> Self {
        let header = Format::new()
            .set_bold()
            .set_font_color(Color::RGB(style.header_font))
            .set_background_color(Color::RGB(style.header_background))
            .set_border(FormatBorder::Thin);

        let cell = Format::new()
            .set_text_wrap()
            .set_align(FormatAlign::Top)
            .set_border(FormatBorder::Thin);

        let bad_cell = Format::new()
            .set_text_wrap()
            .set_align(FormatAlign::Top)
            .set_border(FormatBorder::Thin)
            .set_background_color(Color::RGB(style.bad_cell_background))
            .set_font_color(Color::RGB(style.bad_cell_font));

        Self {
            header,
            cell,
            bad_cell,
        }
    }
}

fn build_workbook(report: &AuditReport, style: &ExportStyle) -> Result<Workbook> {
    let formats = Formats::from_style(style);
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Findings")?;
    write_findings_sheet(sheet, &report.findings, style, &formats)?;

    let sheet = workbook.add_worksheet();
    sheet.set_name("Scores")?;
    write_scores_sheet(sheet, &report.scores, style, &formats)?;

    Ok(workbook)
}

fn write_findings_sheet(
    sheet: &mut Worksheet,
    findings: &[Finding],
    style: &ExportStyle,
    formats: &Formats,
) -> Result<()> {
    for (col, header) in FINDINGS_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &formats.header)?;
    }

    for (idx, finding) in findings.iter().enumerate() {
        let row = (idx + 1) as u32;

        let severe = finding
            .score
            .is_some_and(|score| score < style.severity_threshold);
        let priority_format = if severe {
            &formats.bad_cell
        } else {
            &formats.cell
        };

        sheet.write_string_with_format(row, 0, &finding.category, &formats.cell)?;
        sheet.write_string_with_format(row, 1, finding.priority.as_str(), priority_format)?;
        sheet.write_string_with_format(row, 2, &finding.title, &formats.cell)?;
        sheet.write_string_with_format(row, 3, &finding.description, &formats.cell)?;
        sheet.write_string_with_format(
            row,
            4,
            finding.display_value.as_deref().unwrap_or(""),
            &formats.cell,
        )?;
        sheet.write_string_with_format(row, 5, &evidence_lines(finding), &formats.cell)?;
        sheet.write_string_with_format(
            row,
            6,
            finding.reference_link.as_deref().unwrap_or(""),
            &formats.cell,
        )?;
    }

    for (col, width) in style.findings_column_widths.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }

    Ok(())
}

/// Evidence rows collapsed into one wrapped cell, one line per row
fn evidence_lines(finding: &Finding) -> String {
    let Some(evidence) = &finding.evidence else {
        return String::new();
    };

    let mut lines = Vec::with_capacity(evidence.rows.len() + 1);
    lines.push(evidence.headings.join(" | "));
    for row in &evidence.rows {
        lines.push(row.join(" | "));
    }
    lines.join("\n")
}

fn write_scores_sheet(
    sheet: &mut Worksheet,
    scores: &ScoreSummary,
    style: &ExportStyle,
    formats: &Formats,
) -> Result<()> {
    sheet.write_string_with_format(0, 0, "Metric", &formats.header)?;
    sheet.write_string_with_format(0, 1, "Value", &formats.header)?;

    let mut row: u32 = 1;

    for category in &scores.categories {
        sheet.write_string_with_format(row, 0, &category.title, &formats.cell)?;
        match category.display_score() {
            Some(score) => {
                let format = if score < style.severity_threshold * 100.0 {
                    &formats.bad_cell
                } else {
                    &formats.cell
                };
                sheet.write_number_with_format(row, 1, score.round(), format)?;
            }
            None => {
                sheet.write_string_with_format(row, 1, "N/A", &formats.cell)?;
            }
        }
        row += 1;
    }

    if let Some(field) = &scores.field_data {
        let mut field_row = |label: &str, value: Option<String>, row: &mut u32| -> Result<()> {
            if let Some(value) = value {
                sheet.write_string_with_format(*row, 0, label, &formats.cell)?;
                sheet.write_string_with_format(*row, 1, &value, &formats.cell)?;
                *row += 1;
            }
            Ok(())
        };

        field_row(
            "Largest Contentful Paint (field)",
            field.largest_contentful_paint_ms.map(|v| format!("{:.0} ms", v)),
            &mut row,
        )?;
        field_row(
            "Interaction to Next Paint (field)",
            field.interaction_to_next_paint_ms.map(|v| format!("{:.0} ms", v)),
            &mut row,
        )?;
        field_row(
            "Cumulative Layout Shift (field)",
            field.cumulative_layout_shift.map(|v| format!("{:.2}", v)),
            &mut row,
        )?;
        field_row(
            "First Contentful Paint (field)",
            field.first_contentful_paint_ms.map(|v| format!("{:.0} ms", v)),
            &mut row,
        )?;
    }

    sheet.set_column_width(0, 34.0)?;
    sheet.set_column_width(1, 14.0)?;

    Ok(())
}
