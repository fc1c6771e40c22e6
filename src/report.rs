// src/report.rs - Markdown and JSON output for a segment analysis
use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::stats_models::RunStats;
use crate::pipeline::SegmentAnalysis;
use crate::utils::engine_config::EngineConfig;

const PLACEHOLDER: &str = "N/A";

fn format_list(items: &[String]) -> String {
    if items.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        items.join(", ")
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Renders the business summary. Any missing figure or empty list is shown as `N/A`.
pub fn render_markdown(analysis: &SegmentAnalysis, config: &EngineConfig, segment_label: &str) -> String {
    let insights = &analysis.insights;

    let top_company_line = match &insights.most_reviewed {
        Some(top) => format!(
            "Most reviewed company: {} ({} total reviews)",
            top.name, top.reviews_total
        ),
        None => format!("Most reviewed company: {}", PLACEHOLDER),
    };
    let rating_range_line = match &insights.rating_range {
        Some(range) => format!(
            "Rating range (weighted average): {:.2} to {:.2}",
            range.min, range.max
        ),
        None => format!("Rating range (weighted average): {}", PLACEHOLDER),
    };

    let mut out = String::new();
    out.push_str(&format!("# {} Review Insights\n\n", segment_label));
    if !analysis.has_results() {
        out.push_str("_No companies in this segment have reviews in either source._\n\n");
    }

    out.push_str("**Overview**\n");
    out.push_str(&format!("- Total companies with reviews: {}\n", insights.total_companies));
    out.push_str(&format!(
        "- Companies represented in both sources: {}\n",
        insights.companies_in_both_sources
    ));
    out.push_str(&format!("- {}\n", top_company_line));
    out.push_str(&format!("- {}\n", rating_range_line));
    out.push_str(&format!(
        "- Review volume concentration: top 3 companies account for {:.1}% of all reviews\n\n",
        insights.top3_share
    ));

    out.push_str("## 1. Review Volume Concentration\n\n");
    if analysis.volume_leaders.is_empty() {
        out.push_str(&format!("{}\n\n", PLACEHOLDER));
    } else {
        out.push_str("| Company | Source A | Source B | Total |\n|---|---:|---:|---:|\n");
        for company in &analysis.volume_leaders {
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                escape_cell(&company.name),
                company.reviews_from_a, company.reviews_from_b, company.reviews_total
            ));
        }
        out.push('\n');
    }

    out.push_str("## 2. Reputation Risk (Scale vs Low-Rating Share)\n\n");
    out.push_str(&format!(
        "- Highest-risk companies: {}.\n\n",
        format_list(&insights.top_risk)
    ));

    out.push_str("## 3. Competitive Positioning (Material Volume Only)\n\n");
    out.push_str(&format!(
        "- Only companies with at least {} reviews are compared.\n",
        config.min_reviews
    ));
    out.push_str(&format!(
        "- Rating leaders in this group: {}.\n\n",
        format_list(&insights.top_rated)
    ));

    out.push_str("## 4. Customer Experience Pain Points\n\n");
    out.push_str(&format!(
        "- Most frequent complaint keywords: {}.\n",
        format_list(&insights.top_keywords)
    ));

    out
}

#[derive(Serialize)]
struct InsightsDocument<'a> {
    run: &'a RunStats,
    segment: &'a str,
    min_reviews: u64,
    analysis: &'a SegmentAnalysis,
}

/// Writes `REPORT.md`, `insights.json` and `companies.json` into `dir`.
pub fn write_reports(
    dir: &Path,
    analysis: &SegmentAnalysis,
    stats: &RunStats,
    config: &EngineConfig,
    segment_label: &str,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let markdown_path = dir.join("REPORT.md");
    fs::write(&markdown_path, render_markdown(analysis, config, segment_label))
        .with_context(|| format!("Failed to write {}", markdown_path.display()))?;

    let document = InsightsDocument {
        run: stats,
        segment: segment_label,
        min_reviews: config.min_reviews,
        analysis,
    };
    let insights_path = dir.join("insights.json");
    let insights_json =
        serde_json::to_string_pretty(&document).context("Failed to serialize insights")?;
    fs::write(&insights_path, insights_json)
        .with_context(|| format!("Failed to write {}", insights_path.display()))?;

    let companies_path = dir.join("companies.json");
    let companies_json = serde_json::to_string_pretty(&analysis.companies)
        .context("Failed to serialize merged companies")?;
    fs::write(&companies_path, companies_json)
        .with_context(|| format!("Failed to write {}", companies_path.display()))?;

    info!("📝 Reports written to {}", dir.display());
    Ok(vec![markdown_path, insights_path, companies_path])
}
