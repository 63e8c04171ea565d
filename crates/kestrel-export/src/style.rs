/// Presentation knobs for the exported workbook. Everything cosmetic lives
/// here so the writer takes it as an argument instead of baking constants
/// into module scope.
#[derive(Debug, Clone)]
pub struct ExportStyle {
    pub header_background: u32,
    pub header_font: u32,
    pub bad_cell_background: u32,
    pub bad_cell_font: u32,
    /// Findings scoring below this get the bad-cell treatment
    pub severity_threshold: f64,
    /// Widths for the findings sheet columns, in order
    pub findings_column_widths: [f64; 7],
}

impl Default for ExportStyle {
    fn default() -> Self {
        Self {
            header_background: 0x4F81BD,
            header_font: 0xFFFFFF,
            bad_cell_background: 0xFFC7CE,
            bad_cell_font: 0x9C0006,
            severity_threshold: 0.5,
            // Category, Priority, Issue Name, Description, Display Value,
            // Technical Breakdown, Reference Link
            findings_column_widths: [15.0, 10.0, 30.0, 50.0, 20.0, 45.0, 30.0],
        }
    }
}
