pub mod analysis;
pub mod error;
pub mod lighthouse;

pub use error::{Error, Result};
