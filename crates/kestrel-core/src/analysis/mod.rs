mod findings;
mod flatten;
mod markdown;
mod scores;

pub use findings::FindingsAnalyzer;
pub use flatten::flatten_details;
pub use markdown::strip_markdown_links;
pub use scores::ScoresAnalyzer;

use crate::lighthouse::PagespeedResponse;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub scores: ScoreSummary,
    pub findings: Vec<Finding>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub final_url: Option<String>,
    pub fetch_time: Option<String>,
    pub categories: Vec<CategoryScore>,
    pub field_data: Option<FieldData>,
}

/// Top-level category score, surfaced on the 0-100 scale users know
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    pub id: String,
    pub title: String,
    pub score: Option<f64>,
}

impl CategoryScore {
    pub fn display_score(&self) -> Option<f64> {
        self.score.map(|s| s * 100.0)
    }
}

/// Real-user (CrUX) percentile metrics. Every metric is independently
/// optional; a URL without enough field traffic reports none of them.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FieldData {
    pub overall_category: Option<String>,
    pub largest_contentful_paint_ms: Option<f64>,
    pub interaction_to_next_paint_ms: Option<f64>,
    pub cumulative_layout_shift: Option<f64>,
    pub first_contentful_paint_ms: Option<f64>,
}

impl FieldData {
    pub fn is_empty(&self) -> bool {
        self.largest_contentful_paint_ms.is_none()
            && self.interaction_to_next_paint_ms.is_none()
            && self.cumulative_layout_shift.is_none()
            && self.first_contentful_paint_ms.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Informational,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Informational => "Info",
        }
    }
}

/// A normalized, presentation-ready record derived from one relevant audit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    pub category: String,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub score: Option<f64>,
    pub display_value: Option<String>,
    pub reference_link: Option<String>,
    pub evidence: Option<EvidenceTable>,
}

impl Finding {
    /// Sort key: worst first. Informational findings (no score) sort as 1.0,
    /// after every scored finding.
    pub fn sort_score(&self) -> f64 {
        self.score.unwrap_or(1.0)
    }
}

/// Flattened evidence rows derived from an audit's detail payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvidenceTable {
    pub headings: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub trait Analyzer {
    type Output;

    fn analyze(&self, response: &PagespeedResponse) -> crate::Result<Self::Output>;
}
