use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use log::{info, warn};
use reconcile_lib::ingest::{load_reviews, load_source_a, load_source_b};
use reconcile_lib::models::stats_models::{StageStats, StageType};
use reconcile_lib::pipeline::{analyze_segment_with_progress, SegmentInputs};
use reconcile_lib::report::write_reports;
use reconcile_lib::utils::category_filter::SegmentFilterConfig;
use reconcile_lib::utils::engine_config::EngineConfig;
use reconcile_lib::utils::env::load_env;
use reconcile_lib::utils::instantiate_run::create_initial_run_stats;
use reconcile_lib::utils::progress_bars::logging::{log_pipeline_completion, log_pipeline_start, StageLogger};
use reconcile_lib::utils::progress_bars::progress_config::ProgressConfig;
use std::path::PathBuf;
use std::time::Instant;
use uuid::Uuid;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Source A company listing (CSV)
    #[arg(long, default_value = "data/beledchi_az_companies.csv")]
    companies: PathBuf,

    /// Source A individual reviews (CSV)
    #[arg(long, default_value = "data/beledchi_az_feedbacks.csv")]
    reviews: PathBuf,

    /// Source B company listing (CSV)
    #[arg(long, default_value = "data/bildir_az_data.csv")]
    source_b: PathBuf,

    /// Directory receiving REPORT.md, insights.json and companies.json
    #[arg(long, default_value = "report")]
    output_dir: PathBuf,

    /// Heading used in the report
    #[arg(long, default_value = "Bank")]
    segment_label: String,

    /// Override MIN_REVIEWS
    #[arg(long)]
    min_reviews: Option<u64>,

    /// Override LEADERBOARD_SIZE
    #[arg(long)]
    top_k: Option<usize>,
}

fn main() -> Result<()> {
    // Initialize logging and environment
    env_logger::init();
    info!("Starting cross-source review reconciliation");
    load_env();
    let args = Args::parse();

    let segment = SegmentFilterConfig::from_env();
    segment.log_config();

    let mut engine_config = EngineConfig::from_env();
    if let Some(min_reviews) = args.min_reviews {
        engine_config.min_reviews = min_reviews;
    }
    if let Some(top_k) = args.top_k {
        engine_config.leaderboard_size = top_k;
    }
    engine_config.log_config();

    let progress_config = ProgressConfig::from_env();
    let main_pb = progress_config.create_stage_bar(6);

    let run_id = Uuid::new_v4().to_string();
    let run_timestamp = Utc::now().naive_utc();
    let description = format!("{} segment reconciliation", args.segment_label);
    let mut stats = create_initial_run_stats(&run_id, run_timestamp, Some(description.as_str()));
    log_pipeline_start(&run_id, &args.segment_label);
    let run_start = Instant::now();

    // Stage 1: load the three harvested tables
    if let Some(pb) = &main_pb {
        pb.set_message("Loading input tables...");
    }
    let logger = StageLogger::new(StageType::Load);
    logger.log_start(None);
    let companies_a = load_source_a(&args.companies).context("Failed to load source A companies")?;
    let companies_b = load_source_b(&args.source_b).context("Failed to load source B companies")?;
    let reviews = load_reviews(&args.reviews).context("Failed to load reviews")?;

    stats.source_a_rows = companies_a.rows.len();
    stats.source_b_rows = companies_b.rows.len();
    stats.review_rows = reviews.rows.len();
    stats.rows_skipped =
        companies_a.stats.rows_skipped + companies_b.stats.rows_skipped + reviews.stats.rows_skipped;
    logger.log_skipped(stats.rows_skipped, "missing key or undecodable CSV record");

    let rows_read = companies_a.stats.rows_read + companies_b.stats.rows_read + reviews.stats.rows_read;
    let rows_loaded = stats.source_a_rows + stats.source_b_rows + stats.review_rows;
    logger.log_counts(rows_read, rows_loaded, "rows");
    let load_duration = logger.log_completion();
    stats.load_time = load_duration.as_secs_f64();
    stats.stage_stats.push(StageStats {
        stage_type: StageType::Load,
        rows_in: rows_read,
        rows_out: rows_loaded,
        duration_secs: stats.load_time,
    });

    if let Some(pb) = &main_pb {
        pb.inc(1);
        pb.set_message(progress_config.stage_message("Analyzing segment", rows_loaded));
    }

    // Stage 2: filter, aggregate, merge and rank
    let inputs = SegmentInputs {
        companies_a: companies_a.rows,
        companies_b: companies_b.rows,
        reviews: reviews.rows,
    };
    let analysis = analyze_segment_with_progress(&inputs, &segment, &engine_config, main_pb.as_ref());

    stats.segment_a_companies = analysis.segment_a_companies;
    stats.segment_b_companies = analysis.segment_b_companies;
    stats.segment_reviews = analysis.segment_reviews;
    stats.merged_companies = analysis.companies.len();
    stats.companies_in_both_sources = analysis.insights.companies_in_both_sources;
    for stage in &analysis.stage_stats {
        match stage.stage_type {
            StageType::Filter => stats.filter_time = stage.duration_secs,
            StageType::Aggregate => stats.aggregation_time = stage.duration_secs,
            StageType::Merge => stats.merge_time = stage.duration_secs,
            StageType::Rank => stats.ranking_time = stage.duration_secs,
            StageType::Load | StageType::Report => {}
        }
    }
    stats.stage_stats.extend(analysis.stage_stats.iter().cloned());

    if !analysis.has_results() {
        warn!("⚠️ No company in the segment has reviews; the report will contain placeholders only");
    }

    if let Some(pb) = &main_pb {
        pb.set_message(progress_config.stage_message("Writing reports", analysis.companies.len()));
    }

    // Stage 3: reports
    let logger = StageLogger::new(StageType::Report);
    logger.log_start(Some(&args.output_dir.display().to_string()));
    stats.total_processing_time = run_start.elapsed().as_secs_f64();
    let written = write_reports(
        &args.output_dir,
        &analysis,
        &stats,
        &engine_config,
        &args.segment_label,
    )
    .context("Failed to write reports")?;
    let report_duration = logger.log_completion();
    stats.stage_stats.push(StageStats {
        stage_type: StageType::Report,
        rows_in: analysis.companies.len(),
        rows_out: written.len(),
        duration_secs: report_duration.as_secs_f64(),
    });
    stats.total_processing_time = run_start.elapsed().as_secs_f64();

    if let Some(pb) = &main_pb {
        pb.inc(1);
        pb.finish_with_message(format!("Done: {} companies", analysis.companies.len()));
    }

    log_pipeline_completion(&stats);
    info!("Reconciliation completed successfully!");
    Ok(())
}
