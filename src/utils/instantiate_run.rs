use crate::models::stats_models::RunStats;
use chrono::NaiveDateTime;
use log::info;

pub fn create_initial_run_stats(
    run_id: &str,
    run_timestamp: NaiveDateTime,
    description: Option<&str>,
) -> RunStats {
    info!("Created run record with ID: {}", run_id);

    RunStats {
        run_id: run_id.to_string(),
        run_timestamp,
        description: description.map(|s| s.to_string()),
        source_a_rows: 0,
        source_b_rows: 0,
        review_rows: 0,
        rows_skipped: 0,
        segment_a_companies: 0,
        segment_b_companies: 0,
        segment_reviews: 0,
        merged_companies: 0,
        companies_in_both_sources: 0,
        load_time: 0.0,
        filter_time: 0.0,
        aggregation_time: 0.0,
        merge_time: 0.0,
        ranking_time: 0.0,
        total_processing_time: 0.0,
        stage_stats: Vec::new(),
    }
}
