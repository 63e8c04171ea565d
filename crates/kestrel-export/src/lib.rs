pub mod error;
mod style;
mod workbook;

pub use error::{ExportError, Result};
pub use style::ExportStyle;
pub use workbook::{write_workbook, write_workbook_file};
