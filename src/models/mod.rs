// src/models/mod.rs
pub mod records;
pub mod stats_models;

pub use records::{
    KeywordCount, MergedCompany, ReviewRecord, ScoredCompany, SideMetrics, SourceARecord,
    SourceBRecord,
};
