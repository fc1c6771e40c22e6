// src/models/records.rs
// Record types for the two harvested sources and the merged per-company view

use serde::{Deserialize, Serialize};

/// A company as listed by source A (keyed by URL slug).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceARecord {
    pub slug: String,
    pub name: Option<String>,
    pub category_slug: Option<String>,
    pub category_name: Option<String>,
    pub rating_value: Option<f64>,
    pub review_count: u64,
}

/// A company as listed by source B (keyed only by display name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceBRecord {
    pub name: Option<String>,
    pub category: Option<String>,
    pub overall_rating: Option<f64>,
    pub total_reviews: u64,
}

/// An individual review harvested from source A.
///
/// `rating` is `None` when the upstream value was missing, unparseable or
/// outside 1..=5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub company_slug: String,
    pub rating: Option<u8>,
    pub review_text: Option<String>,
}

impl ReviewRecord {
    pub fn is_low_rating(&self) -> bool {
        matches!(self.rating, Some(1) | Some(2))
    }
}

/// Per-company review statistics on one side of the merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideMetrics {
    pub name: String,
    pub review_count: u64,
    pub avg_rating: Option<f64>,
    pub low_share: Option<f64>,
}

/// One row of the reconciled table, one per distinct normalized name key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedCompany {
    pub name: String,
    #[serde(skip_serializing)]
    pub name_key: String,
    pub reviews_from_a: u64,
    pub reviews_from_b: u64,
    pub reviews_total: u64,
    pub rating_from_a: Option<f64>,
    pub rating_from_b: Option<f64>,
    pub rating_weighted: Option<f64>,
    pub low_rating_share: Option<f64>,
    pub has_a: bool,
    pub has_b: bool,
}

impl MergedCompany {
    /// Rows with no reviews on either side take no part in any ranking.
    pub fn is_rankable(&self) -> bool {
        self.reviews_total > 0
    }

    pub fn in_both_sources(&self) -> bool {
        self.reviews_from_a > 0 && self.reviews_from_b > 0
    }
}

/// A company paired with the score it was ranked by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCompany {
    pub name: String,
    pub reviews_total: u64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}
