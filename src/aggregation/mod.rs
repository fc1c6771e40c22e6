// src/aggregation/mod.rs
pub mod reviews;

pub use reviews::{aggregate_reviews, source_b_metrics, summarize_reviews, weighted_rating, ReviewSummary};
