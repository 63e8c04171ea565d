use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Top-level PageSpeed Insights v5 response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagespeedResponse {
    #[serde(rename = "lighthouseResult")]
    pub lighthouse_result: LighthouseResult,
    #[serde(rename = "loadingExperience", default, skip_serializing_if = "Option::is_none")]
    pub loading_experience: Option<LoadingExperience>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Lab (Lighthouse) portion of the response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LighthouseResult {
    #[serde(rename = "finalUrl", default, skip_serializing_if = "Option::is_none")]
    pub final_url: Option<String>,
    #[serde(rename = "fetchTime", default, skip_serializing_if = "Option::is_none")]
    pub fetch_time: Option<String>,
    #[serde(default)]
    pub categories: BTreeMap<String, Category>,
    #[serde(default)]
    pub audits: BTreeMap<String, AuditRecord>,
}

/// Top-level scoring category (performance, accessibility, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(rename = "auditRefs", default, skip_serializing_if = "Vec::is_empty")]
    pub audit_refs: Vec<AuditRef>,
}

/// Membership of an audit in a category
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuditRef {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// One named Lighthouse check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(rename = "scoreDisplayMode", default)]
    pub score_display_mode: ScoreDisplayMode,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "displayValue", default, skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<DetailPayload>,
}

/// How Lighthouse intends an audit's score to be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ScoreDisplayMode {
    Binary,
    #[default]
    Numeric,
    Informative,
    NotApplicable,
    Manual,
    Error,
    #[serde(other)]
    Unknown,
}

/// Polymorphic audit detail payload. Tables carry `headings` + `items`,
/// critical-request-chain audits carry `chains`; everything is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DetailPayload {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub detail_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headings: Option<Vec<Heading>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<DetailItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chains: Option<BTreeMap<String, ChainNode>>,
}

/// Column descriptor for a tabular detail payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Heading {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "valueType", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
}

impl Heading {
    /// Display label: `text`, else `label`, else the raw key.
    pub fn display_label(&self) -> &str {
        self.text
            .as_deref()
            .or(self.label.as_deref())
            .or(self.key.as_deref())
            .unwrap_or("")
    }
}

/// One row of a tabular detail payload. Cell values stay raw JSON until
/// classified as a [`super::CellValue`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DetailItem {
    #[serde(rename = "subItems", default, skip_serializing_if = "Option::is_none")]
    pub sub_items: Option<SubItems>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

/// Nested sub-table carried by a parent row (one level deep)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SubItems {
    #[serde(default)]
    pub items: Vec<DetailItem>,
}

/// Node of a critical-request-chain tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainNode {
    pub request: ChainRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<BTreeMap<String, ChainNode>>,
}

/// Resource described by a chain node
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChainRequest {
    #[serde(default)]
    pub url: String,
    #[serde(rename = "transferSize", default)]
    pub transfer_size: f64,
    #[serde(rename = "startTime", default)]
    pub start_time: f64,
    #[serde(rename = "endTime", default)]
    pub end_time: f64,
}

/// Field-data (CrUX) portion of the response
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoadingExperience {
    #[serde(default)]
    pub metrics: BTreeMap<String, MetricPercentile>,
    #[serde(rename = "overall_category", default, skip_serializing_if = "Option::is_none")]
    pub overall_category: Option<String>,
}

/// One aggregated real-user metric
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MetricPercentile {
    #[serde(default)]
    pub percentile: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}
