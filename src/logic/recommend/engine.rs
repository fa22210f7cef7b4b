//! Recommendation Engine
//!
//! Static action lists per category plus top-N highlighted projects for the
//! two upper tiers. No randomness, no external calls.

use super::types::{CategoryRecommendation, HighlightLimits, HighlightedProject, RecommendationSet};
use crate::logic::features::ProjectRecord;
use crate::logic::hotspot::RiskCategory;

/// Canonical actions, more urgent tiers first in horizon and intervention
pub fn actions(category: RiskCategory) -> &'static [&'static str] {
    match category {
        RiskCategory::Critical => &[
            "Immediate project review and intervention required",
            "Consider project postponement or scope reduction",
            "Allocate additional resources and expert teams",
            "Implement daily monitoring and reporting",
            "Prepare contingency plans and risk mitigation strategies",
        ],
        RiskCategory::High => &[
            "Enhanced project monitoring and control",
            "Regular risk assessment reviews",
            "Consider resource reallocation",
            "Implement preventive measures",
            "Weekly progress reviews with stakeholders",
        ],
        RiskCategory::Medium => &[
            "Standard project monitoring procedures",
            "Monthly risk assessments",
            "Maintain current resource allocation",
            "Regular progress tracking",
            "Identify potential risk factors early",
        ],
        RiskCategory::Low => &[
            "Standard project management procedures",
            "Quarterly risk reviews",
            "Focus on efficiency improvements",
            "Share best practices with other projects",
            "Consider as benchmark projects",
        ],
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    limits: HighlightLimits,
}

impl RecommendationEngine {
    pub fn new(limits: HighlightLimits) -> Self {
        Self { limits }
    }

    /// Highlight budget for a tier; zero outside High/Critical
    pub fn top_n(&self, category: RiskCategory) -> usize {
        match category {
            RiskCategory::Critical => self.limits.critical,
            RiskCategory::High => self.limits.high,
            RiskCategory::Medium | RiskCategory::Low => 0,
        }
    }

    pub fn recommend(
        &self,
        records: &[ProjectRecord],
        scores: &[f64],
        categories: &[RiskCategory],
    ) -> RecommendationSet {
        let mut set = RecommendationSet::new();

        for category in RiskCategory::BY_URGENCY {
            let mut members: Vec<usize> = (0..categories.len())
                .filter(|i| categories[*i] == category)
                .collect();
            if members.is_empty() {
                continue;
            }

            let avg_risk_score = members.iter().map(|i| scores[*i]).sum::<f64>() / members.len() as f64;

            // Descending score, ascending index on ties
            members.sort_by(|a, b| scores[*b].total_cmp(&scores[*a]).then(a.cmp(b)));

            let top_projects = members
                .iter()
                .take(self.top_n(category))
                .map(|&index| {
                    let record = records.get(index);
                    HighlightedProject {
                        index,
                        project_id: record.and_then(|r| r.project_id.clone()),
                        project_type: record.and_then(|r| r.project_type.clone()),
                        location: record.and_then(|r| r.location.clone()),
                        hotspot_score: scores[index],
                    }
                })
                .collect();

            set.insert(
                category,
                CategoryRecommendation {
                    category,
                    count: members.len(),
                    avg_risk_score,
                    recommendations: actions(category).iter().map(|s| s.to_string()).collect(),
                    top_projects,
                },
            );
        }

        log::info!("Generated recommendations for {} risk categories", set.len());
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<ProjectRecord> {
        (0..n)
            .map(|i| ProjectRecord::new().with_id(format!("P{}", i)).with_type("substation"))
            .collect()
    }

    #[test]
    fn test_every_category_has_five_actions() {
        for category in RiskCategory::BY_URGENCY {
            assert_eq!(actions(category).len(), 5);
        }
        assert!(actions(RiskCategory::Critical)[0].starts_with("Immediate"));
    }

    #[test]
    fn test_only_present_categories_listed() {
        let scores = [10.0, 90.0, 15.0];
        let categories = [RiskCategory::Low, RiskCategory::Critical, RiskCategory::Low];
        let set = RecommendationEngine::default().recommend(&records(3), &scores, &categories);

        assert_eq!(set.len(), 2);
        assert_eq!(set[&RiskCategory::Low].count, 2);
        assert!((set[&RiskCategory::Low].avg_risk_score - 12.5).abs() < 1e-12);
        assert!(set[&RiskCategory::Low].top_projects.is_empty());
        assert_eq!(set[&RiskCategory::Critical].top_projects[0].project_id.as_deref(), Some("P1"));
        assert!(!set.contains_key(&RiskCategory::Medium));
    }

    #[test]
    fn test_top_n_ordering_and_limit() {
        let scores = [80.0, 95.0, 80.0, 100.0];
        let categories = [RiskCategory::Critical; 4];
        let engine = RecommendationEngine::new(HighlightLimits { critical: 3, high: 10 });
        let set = engine.recommend(&records(4), &scores, &categories);

        let top: Vec<usize> = set[&RiskCategory::Critical].top_projects.iter().map(|p| p.index).collect();
        assert_eq!(top, vec![3, 1, 0]);
        assert_eq!(set[&RiskCategory::Critical].count, 4);
    }

    #[test]
    fn test_high_risk_default_limit_is_ten() {
        let scores: Vec<f64> = (0..12).map(|i| 50.0 + i as f64).collect();
        let categories = vec![RiskCategory::High; 12];
        let set = RecommendationEngine::default().recommend(&records(12), &scores, &categories);
        assert_eq!(set[&RiskCategory::High].top_projects.len(), 10);
        assert_eq!(set[&RiskCategory::High].top_projects[0].index, 11);
    }
}
