// src/insights.rs - Market-level summary derived from the merged table and leaderboards
use serde::Serialize;

use crate::models::{KeywordCount, MergedCompany, ScoredCompany};
use crate::ranking::rank_by_volume;
use crate::utils::constants::CONCENTRATION_TOP_N;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyVolume {
    pub name: String,
    pub reviews_total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessInsights {
    pub total_companies: usize,
    pub companies_in_both_sources: usize,
    pub most_reviewed: Option<CompanyVolume>,
    pub rating_range: Option<RatingRange>,
    /// Percentage of all reviews held by the highest-volume companies
    pub top3_share: f64,
    pub top_risk: Vec<String>,
    pub top_rated: Vec<String>,
    pub top_keywords: Vec<String>,
}

impl BusinessInsights {
    /// Nothing to report: no company in the segment has a single review.
    pub fn is_empty(&self) -> bool {
        self.total_companies == 0
    }
}

pub fn compute_insights(
    companies: &[MergedCompany],
    risk_leaders: &[ScoredCompany],
    rating_leaders: &[ScoredCompany],
    keywords: &[KeywordCount],
    list_size: usize,
) -> BusinessInsights {
    let rankable: Vec<&MergedCompany> = companies.iter().filter(|c| c.is_rankable()).collect();
    let total_reviews: u64 = rankable.iter().map(|c| c.reviews_total).sum();

    let by_volume = rank_by_volume(companies, CONCENTRATION_TOP_N);
    let top_reviews: u64 = by_volume.iter().map(|c| c.reviews_total).sum();
    let top3_share = if total_reviews > 0 {
        top_reviews as f64 / total_reviews as f64 * 100.0
    } else {
        0.0
    };

    let rating_range = rankable
        .iter()
        .filter_map(|c| c.rating_weighted)
        .fold(None, |range: Option<RatingRange>, r| match range {
            Some(RatingRange { min, max }) => Some(RatingRange {
                min: min.min(r),
                max: max.max(r),
            }),
            None => Some(RatingRange { min: r, max: r }),
        });

    BusinessInsights {
        total_companies: rankable.len(),
        companies_in_both_sources: rankable.iter().filter(|c| c.in_both_sources()).count(),
        most_reviewed: by_volume.first().map(|c| CompanyVolume {
            name: c.name.clone(),
            reviews_total: c.reviews_total,
        }),
        rating_range,
        top3_share,
        top_risk: risk_leaders.iter().take(list_size).map(|c| c.name.clone()).collect(),
        top_rated: rating_leaders.iter().take(list_size).map(|c| c.name.clone()).collect(),
        top_keywords: keywords.iter().take(list_size).map(|k| k.keyword.clone()).collect(),
    }
}
