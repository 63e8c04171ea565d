mod cell;
mod reader;
mod types;

pub use cell::CellValue;
pub use reader::ResponseReader;
pub use types::*;
