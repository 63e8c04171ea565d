use super::{Analyzer, CategoryScore, FieldData, ScoreSummary};
use crate::Result;
use crate::lighthouse::{LoadingExperience, PagespeedResponse};

pub struct ScoresAnalyzer;

impl Analyzer for ScoresAnalyzer {
    type Output = ScoreSummary;

    fn analyze(&self, response: &PagespeedResponse) -> Result<Self::Output> {
        tracing::debug!("Summarizing category scores");

        let lighthouse = &response.lighthouse_result;

        let categories: Vec<CategoryScore> = lighthouse
            .categories
            .iter()
            .map(|(key, category)| CategoryScore {
                id: category.id.clone().unwrap_or_else(|| key.clone()),
                title: if category.title.is_empty() {
                    key.clone()
                } else {
                    category.title.clone()
                },
                score: category.score,
            })
            .collect();

        let field_data = response
            .loading_experience
            .as_ref()
            .map(field_data_from)
            .filter(|fd| !fd.is_empty() || fd.overall_category.is_some());

        tracing::info!(
            "Score summary complete: {} categories, field data {}",
            categories.len(),
            if field_data.is_some() { "present" } else { "absent" }
        );

        Ok(ScoreSummary {
            final_url: lighthouse.final_url.clone(),
            fetch_time: lighthouse.fetch_time.clone(),
            categories,
            field_data,
        })
    }
}

fn field_data_from(experience: &LoadingExperience) -> FieldData {
    let percentile = |key: &str| experience.metrics.get(key).map(|m| m.percentile);

    FieldData {
        overall_category: experience.overall_category.clone(),
        largest_contentful_paint_ms: percentile("LARGEST_CONTENTFUL_PAINT_MS"),
        interaction_to_next_paint_ms: percentile("INTERACTION_TO_NEXT_PAINT"),
        // CrUX reports layout shift scaled by 100
        cumulative_layout_shift: percentile("CUMULATIVE_LAYOUT_SHIFT_SCORE").map(|v| v / 100.0),
        first_contentful_paint_ms: percentile("FIRST_CONTENTFUL_PAINT_MS"),
    }
}
