// src/models/stats_models.rs
use chrono::NaiveDateTime;
use serde::Serialize;

/// Bookkeeping for a single reconciliation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub run_id: String,
    pub run_timestamp: NaiveDateTime,
    pub description: Option<String>,
    pub source_a_rows: usize,
    pub source_b_rows: usize,
    pub review_rows: usize,
    pub rows_skipped: usize,
    pub segment_a_companies: usize,
    pub segment_b_companies: usize,
    pub segment_reviews: usize,
    pub merged_companies: usize,
    pub companies_in_both_sources: usize,
    pub load_time: f64,
    pub filter_time: f64,
    pub aggregation_time: f64,
    pub merge_time: f64,
    pub ranking_time: f64,
    pub total_processing_time: f64,
    pub stage_stats: Vec<StageStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StageType {
    Load,
    Filter,
    Aggregate,
    Merge,
    Rank,
    Report,
}

impl StageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageType::Load => "load",
            StageType::Filter => "filter",
            StageType::Aggregate => "aggregate",
            StageType::Merge => "merge",
            StageType::Rank => "rank",
            StageType::Report => "report",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StageStats {
    pub stage_type: StageType,
    pub rows_in: usize,
    pub rows_out: usize,
    pub duration_secs: f64,
}
