pub mod audit;
pub mod render;
pub mod report;

use kestrel_core::analysis::{Analyzer, AuditReport, FindingsAnalyzer, ScoresAnalyzer};
use kestrel_core::lighthouse::PagespeedResponse;

/// Run both analyzers over a parsed response and assemble the report
pub fn build_report(response: &PagespeedResponse) -> kestrel_core::Result<AuditReport> {
    let scores = ScoresAnalyzer.analyze(response)?;
    let findings = FindingsAnalyzer.analyze(response)?;

    Ok(AuditReport { scores, findings })
}
