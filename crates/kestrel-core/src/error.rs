use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read response file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse PageSpeed response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid response structure: {0}")]
    InvalidStructure(String),

    #[error("Analysis error: {0}")]
    Analysis(String),
}

pub type Result<T> = std::result::Result<T, Error>;
