// src/ranking/mod.rs
pub mod keywords;
pub mod leaderboard;

// Re-export main ranking functions for clean API
pub use keywords::{tokenize, top_keywords, KeywordConfig};
pub use leaderboard::{rank_by_rating, rank_by_risk, rank_by_volume, risk_score};
