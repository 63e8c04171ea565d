pub mod error;
mod psi;

pub use error::{ClientError, Result};
pub use psi::{PsiClient, Strategy};
