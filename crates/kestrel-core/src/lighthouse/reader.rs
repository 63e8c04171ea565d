use super::types::PagespeedResponse;
use crate::{Error, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub struct ResponseReader;

impl ResponseReader {
    /// Read and parse a saved PageSpeed response from the given path
    pub fn from_file(path: &Path) -> Result<PagespeedResponse> {
        tracing::debug!("Reading PageSpeed response from: {}", path.display());

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let response: PagespeedResponse = serde_json::from_reader(reader)?;

        tracing::info!(
            "Successfully parsed response with {} audits",
            response.lighthouse_result.audits.len()
        );

        Ok(response)
    }

    /// Parse a PageSpeed response from a JSON string
    pub fn from_str(content: &str) -> Result<PagespeedResponse> {
        tracing::debug!("Parsing PageSpeed response from string");

        let response: PagespeedResponse = serde_json::from_str(content)?;

        tracing::info!(
            "Successfully parsed response with {} audits",
            response.lighthouse_result.audits.len()
        );

        Ok(response)
    }

    /// Validate that a response is well-formed enough to analyze
    pub fn validate(response: &PagespeedResponse) -> Result<()> {
        tracing::debug!("Validating PageSpeed response structure");

        let lighthouse = &response.lighthouse_result;

        if lighthouse.categories.is_empty() && lighthouse.audits.is_empty() {
            return Err(Error::InvalidStructure(
                "Response carries no Lighthouse categories or audits".to_string(),
            ));
        }

        if lighthouse.audits.is_empty() {
            tracing::warn!("Response contains no audits");
        }

        // Audit records repeat their map key; a mismatch means a mangled response
        for (key, audit) in &lighthouse.audits {
            if !audit.id.is_empty() && audit.id != *key {
                return Err(Error::InvalidStructure(format!(
                    "Audit '{}' carries mismatched id '{}'",
                    key, audit.id
                )));
            }
        }

        tracing::debug!("Response structure is valid");
        Ok(())
    }
}
