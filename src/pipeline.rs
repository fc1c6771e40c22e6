// src/pipeline.rs - Stage coordination for one category segment
use indicatif::ProgressBar;
use serde::Serialize;

use crate::aggregation::{aggregate_reviews, source_b_metrics};
use crate::insights::{compute_insights, BusinessInsights};
use crate::matching::{membership_counts, KeyedTable};
use crate::models::stats_models::{StageStats, StageType};
use crate::models::{KeywordCount, MergedCompany, ReviewRecord, ScoredCompany, SourceARecord, SourceBRecord};
use crate::ranking::{rank_by_rating, rank_by_risk, rank_by_volume, top_keywords};
use crate::utils::category_filter::{filter_reviews_for_companies, SegmentFilterConfig};
use crate::utils::engine_config::EngineConfig;
use crate::utils::progress_bars::logging::StageLogger;

/// The three harvested tables, fully loaded.
#[derive(Debug, Clone, Default)]
pub struct SegmentInputs {
    pub companies_a: Vec<SourceARecord>,
    pub companies_b: Vec<SourceBRecord>,
    pub reviews: Vec<ReviewRecord>,
}

/// Everything the reporting layer consumes for one segment.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentAnalysis {
    pub companies: Vec<MergedCompany>,
    pub volume_leaders: Vec<MergedCompany>,
    pub risk_leaders: Vec<ScoredCompany>,
    pub rating_leaders: Vec<ScoredCompany>,
    pub keywords: Vec<KeywordCount>,
    pub insights: BusinessInsights,
    #[serde(skip)]
    pub segment_reviews: usize,
    #[serde(skip)]
    pub segment_a_companies: usize,
    #[serde(skip)]
    pub segment_b_companies: usize,
    #[serde(skip)]
    pub stage_stats: Vec<StageStats>,
}

impl SegmentAnalysis {
    pub fn has_results(&self) -> bool {
        !self.insights.is_empty()
    }
}

fn finish_stage(
    stages: &mut Vec<StageStats>,
    pb: Option<&ProgressBar>,
    logger: StageLogger,
    stage_type: StageType,
    rows_in: usize,
    rows_out: usize,
) {
    let duration = logger.log_completion();
    if let Some(pb) = pb {
        pb.inc(1);
        pb.set_message(format!("{} done ({} rows)", stage_type.as_str(), rows_out));
    }
    stages.push(StageStats {
        stage_type,
        rows_in,
        rows_out,
        duration_secs: duration.as_secs_f64(),
    });
}

/// Filters, aggregates, merges and ranks one segment. Never fails: malformed
/// or missing values have already been classified as absent at load time.
pub fn analyze_segment(
    inputs: &SegmentInputs,
    segment: &SegmentFilterConfig,
    config: &EngineConfig,
) -> SegmentAnalysis {
    analyze_segment_with_progress(inputs, segment, config, None)
}

/// Same as [`analyze_segment`], advancing `pb` by one step per completed stage.
pub fn analyze_segment_with_progress(
    inputs: &SegmentInputs,
    segment: &SegmentFilterConfig,
    config: &EngineConfig,
    pb: Option<&ProgressBar>,
) -> SegmentAnalysis {
    let mut stages = Vec::new();

    let logger = StageLogger::new(StageType::Filter);
    logger.log_start(None);
    let companies_a = segment.filter_source_a(&inputs.companies_a);
    let companies_b = segment.filter_source_b(&inputs.companies_b);
    let reviews = filter_reviews_for_companies(&inputs.reviews, &companies_a);
    segment.log_segment_sizes(
        inputs.companies_a.len(),
        companies_a.len(),
        inputs.companies_b.len(),
        companies_b.len(),
    );
    logger.log_counts(inputs.reviews.len(), reviews.len(), "reviews");
    let rows_in = inputs.companies_a.len() + inputs.companies_b.len();
    finish_stage(&mut stages, pb, logger, StageType::Filter, rows_in, companies_a.len() + companies_b.len());

    let logger = StageLogger::new(StageType::Aggregate);
    logger.log_start(Some("per-company review statistics"));
    let metrics_a = aggregate_reviews(&reviews, &companies_a);
    let metrics_b = source_b_metrics(&companies_b);
    let table_a = KeyedTable::from_metrics(&metrics_a);
    let table_b = KeyedTable::from_metrics(&metrics_b);
    logger.log_debug(&format!(
        "{} A groups → {} keys, {} B rows → {} keys",
        metrics_a.len(),
        table_a.len(),
        metrics_b.len(),
        table_b.len()
    ));
    finish_stage(&mut stages, pb, logger, StageType::Aggregate, reviews.len() + companies_b.len(), table_a.len() + table_b.len());

    let logger = StageLogger::new(StageType::Merge);
    logger.log_start(Some("full outer join on normalized name"));
    let companies = crate::matching::merge(&table_a, &table_b);
    let (both, only_a, only_b) = membership_counts(&companies);
    logger.log_debug(&format!("{} in both sources, {} only in A, {} only in B", both, only_a, only_b));
    finish_stage(&mut stages, pb, logger, StageType::Merge, table_a.len() + table_b.len(), companies.len());

    let logger = StageLogger::new(StageType::Rank);
    logger.log_start(Some(&format!("min reviews {}", config.min_reviews)));
    let volume_leaders = rank_by_volume(&companies, config.volume_slice_size);
    let risk_leaders = rank_by_risk(&companies, config.min_reviews, config.leaderboard_size);
    let rating_leaders = rank_by_rating(&companies, config.min_reviews, config.leaderboard_size);
    let keywords = top_keywords(
        reviews.iter().filter_map(|r| r.review_text.as_deref()),
        &config.keywords,
    );
    let insights = compute_insights(
        &companies,
        &risk_leaders,
        &rating_leaders,
        &keywords,
        config.leaderboard_size,
    );
    logger.log_counts(companies.len(), volume_leaders.len(), "companies");
    finish_stage(&mut stages, pb, logger, StageType::Rank, companies.len(), volume_leaders.len());

    SegmentAnalysis {
        companies,
        volume_leaders,
        risk_leaders,
        rating_leaders,
        keywords,
        insights,
        segment_reviews: reviews.len(),
        segment_a_companies: companies_a.len(),
        segment_b_companies: companies_b.len(),
        stage_stats: stages,
    }
}
