use super::{Analyzer, Finding, Priority, flatten_details, strip_markdown_links};
use crate::Result;
use crate::lighthouse::{AuditRecord, PagespeedResponse, ScoreDisplayMode};
use std::collections::HashMap;

const HIGH_PRIORITY_BELOW: f64 = 0.5;
const RELEVANT_BELOW: f64 = 0.9;

pub struct FindingsAnalyzer;

impl Analyzer for FindingsAnalyzer {
    type Output = Vec<Finding>;

    fn analyze(&self, response: &PagespeedResponse) -> Result<Self::Output> {
        let audits = &response.lighthouse_result.audits;
        tracing::debug!("Classifying {} audits", audits.len());

        // Categories name their member audits; anything unclaimed is shown
        // under Performance, the category this endpoint always returns
        let mut category_of: HashMap<&str, &str> = HashMap::new();
        for category in response.lighthouse_result.categories.values() {
            for audit_ref in &category.audit_refs {
                category_of
                    .entry(audit_ref.id.as_str())
                    .or_insert(category.title.as_str());
            }
        }

        let mut findings: Vec<Finding> = audits
            .iter()
            .filter_map(|(id, audit)| {
                classify(id, audit, category_of.get(id.as_str()).copied())
            })
            .collect();

        // Worst first; ties broken by id so output is stable
        findings.sort_by(|a, b| {
            a.sort_score()
                .partial_cmp(&b.sort_score())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });

        tracing::info!(
            "Classification complete: {} findings from {} audits",
            findings.len(),
            audits.len()
        );

        Ok(findings)
    }
}

fn classify(id: &str, audit: &AuditRecord, category: Option<&str>) -> Option<Finding> {
    if audit.score_display_mode == ScoreDisplayMode::NotApplicable {
        return None;
    }

    let has_detail_table = audit.details.as_ref().is_some_and(|d| {
        d.items.as_ref().is_some_and(|items| !items.is_empty())
            || d.chains.as_ref().is_some_and(|chains| !chains.is_empty())
    });

    let relevant = match audit.score {
        Some(score) => score < RELEVANT_BELOW,
        None => {
            audit.score_display_mode == ScoreDisplayMode::Informative
                && (audit.display_value.is_some() || has_detail_table)
        }
    };
    if !relevant {
        return None;
    }

    let priority = match audit.score {
        Some(score) if score < HIGH_PRIORITY_BELOW => Priority::High,
        Some(_) => Priority::Medium,
        None => Priority::Informational,
    };

    let (description, reference_link) = strip_markdown_links(&audit.description);
    let evidence = audit.details.as_ref().and_then(flatten_details);

    Some(Finding {
        id: id.to_string(),
        category: category.unwrap_or("Performance").to_string(),
        priority,
        title: audit.title.clone(),
        description,
        score: audit.score,
        display_value: audit.display_value.clone(),
        reference_link,
        evidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lighthouse::ResponseReader;

    fn analyze(json: &str) -> Vec<Finding> {
        let response = ResponseReader::from_str(json).unwrap();
        FindingsAnalyzer.analyze(&response).unwrap()
    }

    fn audit_json(id: &str, score: &str, mode: &str, extra: &str) -> String {
        format!(
            r#""{id}": {{"id": "{id}", "title": "{id}", "score": {score},
                "scoreDisplayMode": "{mode}", "description": "d"{extra}}}"#
        )
    }

    fn response_json(audits: &[String]) -> String {
        format!(
            r#"{{"lighthouseResult": {{"categories": {{}}, "audits": {{{}}}}}}}"#,
            audits.join(",")
        )
    }

    #[test]
    fn test_low_score_is_high_priority() {
        let findings = analyze(&response_json(&[audit_json("a", "0.3", "numeric", "")]));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].priority, Priority::High);
    }

    #[test]
    fn test_mid_score_is_medium_priority() {
        let findings = analyze(&response_json(&[audit_json("a", "0.7", "numeric", "")]));
        assert_eq!(findings[0].priority, Priority::Medium);
    }

    #[test]
    fn test_passing_score_excluded() {
        let findings = analyze(&response_json(&[audit_json("a", "0.95", "numeric", "")]));
        assert!(findings.is_empty());
    }

    #[test]
    fn test_boundary_scores() {
        let findings = analyze(&response_json(&[
            audit_json("at-half", "0.5", "numeric", ""),
            audit_json("at-ninety", "0.9", "numeric", ""),
        ]));
        // 0.9 is out; 0.5 is in, at medium
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "at-half");
        assert_eq!(findings[0].priority, Priority::Medium);
    }

    #[test]
    fn test_not_applicable_always_excluded() {
        let findings = analyze(&response_json(&[
            audit_json("na", "0.1", "notApplicable", ""),
        ]));
        assert!(findings.is_empty());
    }

    #[test]
    fn test_informative_needs_display_value_or_table() {
        let with_value = audit_json("info", "null", "informative", r#", "displayValue": "3 chains""#);
        let without = audit_json("bare", "null", "informative", "");

        let findings = analyze(&response_json(&[with_value, without]));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "info");
        assert_eq!(findings[0].priority, Priority::Informational);
    }

    #[test]
    fn test_null_score_non_informative_excluded() {
        let findings = analyze(&response_json(&[
            audit_json("m", "null", "manual", r#", "displayValue": "x""#),
        ]));
        assert!(findings.is_empty());
    }

    #[test]
    fn test_findings_sorted_worst_first_informational_last() {
        let findings = analyze(&response_json(&[
            audit_json("medium", "0.7", "numeric", ""),
            audit_json("worst", "0.1", "numeric", ""),
            audit_json("info", "null", "informative", r#", "displayValue": "v""#),
        ]));

        let order: Vec<&str> = findings.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(order, vec!["worst", "medium", "info"]);
    }

    #[test]
    fn test_description_cleaned_and_link_captured() {
        let audit = r#""a": {"id": "a", "title": "t", "score": 0.2, "scoreDisplayMode": "numeric",
                "description": "Reduce unused CSS. [Learn more](https://x.test)"}"#
            .to_string();
        let findings = analyze(&response_json(&[audit]));
        assert_eq!(findings[0].description, "Reduce unused CSS.");
        assert_eq!(findings[0].reference_link.as_deref(), Some("https://x.test"));
    }

    #[test]
    fn test_category_resolved_from_audit_refs() {
        let json = r#"{
            "lighthouseResult": {
                "categories": {
                    "performance": {
                        "id": "performance", "title": "Performance", "score": 0.6,
                        "auditRefs": [{"id": "slow-audit"}]
                    }
                },
                "audits": {
                    "slow-audit": {"id": "slow-audit", "title": "Slow", "score": 0.4,
                                   "scoreDisplayMode": "numeric", "description": ""}
                }
            }
        }"#;

        let findings = analyze(json);
        assert_eq!(findings[0].category, "Performance");
    }
}
