// src/utils/progress_bars/logging.rs - Logging helpers for pipeline stages
use log::{debug, info, warn};
use std::time::{Duration, Instant};

use crate::models::stats_models::{RunStats, StageType};

#[derive(Clone)]
pub struct StageLogger {
    stage_name: &'static str,
    stage_emoji: &'static str,
    start_time: Instant,
}

impl StageLogger {
    pub fn new(stage_type: StageType) -> Self {
        let (stage_name, stage_emoji) = match stage_type {
            StageType::Load => ("LOAD", "📥"),
            StageType::Filter => ("FILTER", "🔍"),
            StageType::Aggregate => ("AGGREGATE", "🧮"),
            StageType::Merge => ("MERGE", "🔗"),
            StageType::Rank => ("RANK", "🏆"),
            StageType::Report => ("REPORT", "📝"),
        };

        Self {
            stage_name,
            stage_emoji,
            start_time: Instant::now(),
        }
    }

    pub fn log_start(&self, details: Option<&str>) {
        match details {
            Some(details) => info!(
                "[{}] {} 🚀 Starting {} - {}",
                self.stage_name,
                self.stage_emoji,
                self.stage_name.to_lowercase(),
                details
            ),
            None => info!(
                "[{}] {} 🚀 Starting {}",
                self.stage_name,
                self.stage_emoji,
                self.stage_name.to_lowercase()
            ),
        }
    }

    pub fn log_counts(&self, rows_in: usize, rows_out: usize, what: &str) {
        info!(
            "[{}] {} 📊 {} {} in → {} out [+{:.2}s]",
            self.stage_name,
            self.stage_emoji,
            rows_in,
            what,
            rows_out,
            self.start_time.elapsed().as_secs_f32()
        );
    }

    pub fn log_skipped(&self, count: usize, reason: &str) {
        if count > 0 {
            warn!(
                "[{}] {} ⚠️  Skipped {} rows: {}",
                self.stage_name, self.stage_emoji, count, reason
            );
        }
    }

    pub fn log_debug(&self, message: &str) {
        debug!("[{}] {} {}", self.stage_name, self.stage_emoji, message);
    }

    pub fn log_completion(&self) -> Duration {
        let elapsed = self.start_time.elapsed();
        info!(
            "[{}] {} ✅ Completed in {:.2?}",
            self.stage_name, self.stage_emoji, elapsed
        );
        elapsed
    }
}

pub fn log_pipeline_start(run_id: &str, segment: &str) {
    info!("🚀 ===== REVIEW RECONCILIATION STARTING =====");
    info!("📅 Run ID: {}", run_id);
    info!("🎯 Segment: {}", segment);
    info!("=============================================");
}

pub fn log_pipeline_completion(stats: &RunStats) {
    info!("🎉 ===== REVIEW RECONCILIATION COMPLETED =====");
    info!("📅 Run ID: {}", stats.run_id);
    info!("⏱️  Total Duration: {:.2}s", stats.total_processing_time);
    info!(
        "📥 Input rows: {} source A, {} source B, {} reviews ({} skipped)",
        stats.source_a_rows, stats.source_b_rows, stats.review_rows, stats.rows_skipped
    );
    info!(
        "🔍 Segment: {} source A companies, {} source B companies, {} reviews",
        stats.segment_a_companies, stats.segment_b_companies, stats.segment_reviews
    );
    info!(
        "🔗 Merged companies: {} ({} present in both sources)",
        stats.merged_companies, stats.companies_in_both_sources
    );
    info!("📈 Stage Breakdown:");
    for stage in &stats.stage_stats {
        info!(
            "  • {}: {} → {} rows in {:.3}s",
            stage.stage_type.as_str(),
            stage.rows_in,
            stage.rows_out,
            stage.duration_secs
        );
    }
    info!("==============================================");
}
