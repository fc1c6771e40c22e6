// src/ranking/leaderboard.rs - Volume, reputation-risk and rating leaderboards
use std::cmp::Ordering;

use crate::models::{MergedCompany, ScoredCompany};

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Companies with at least one review, by descending combined volume.
/// Equal volumes keep their merge order.
pub fn rank_by_volume(companies: &[MergedCompany], top_n: usize) -> Vec<MergedCompany> {
    let mut ranked: Vec<&MergedCompany> = companies.iter().filter(|c| c.is_rankable()).collect();
    ranked.sort_by(|a, b| b.reviews_total.cmp(&a.reviews_total));
    ranked.into_iter().take(top_n).cloned().collect()
}

/// Complaint rate in percent scaled by the square root of volume, so a large
/// brand with the same complaint rate as a small one scores higher.
pub fn risk_score(low_rating_share: f64, reviews_total: u64) -> f64 {
    (low_rating_share * 100.0) * (reviews_total as f64).sqrt()
}

fn eligible(company: &MergedCompany, min_reviews: u64) -> bool {
    company.is_rankable() && company.reviews_total >= min_reviews
}

pub fn rank_by_risk(companies: &[MergedCompany], min_reviews: u64, top_k: usize) -> Vec<ScoredCompany> {
    let mut scored: Vec<ScoredCompany> = companies
        .iter()
        .filter(|c| eligible(c, min_reviews))
        .filter_map(|c| {
            c.low_rating_share.map(|share| ScoredCompany {
                name: c.name.clone(),
                reviews_total: c.reviews_total,
                score: risk_score(share, c.reviews_total),
            })
        })
        .collect();
    scored.sort_by(|a, b| descending(a.score, b.score));
    scored.truncate(top_k);
    scored
}

pub fn rank_by_rating(companies: &[MergedCompany], min_reviews: u64, top_k: usize) -> Vec<ScoredCompany> {
    let mut scored: Vec<ScoredCompany> = companies
        .iter()
        .filter(|c| eligible(c, min_reviews))
        .filter_map(|c| {
            c.rating_weighted.map(|rating| ScoredCompany {
                name: c.name.clone(),
                reviews_total: c.reviews_total,
                score: rating,
            })
        })
        .collect();
    scored.sort_by(|a, b| descending(a.score, b.score));
    scored.truncate(top_k);
    scored
}
